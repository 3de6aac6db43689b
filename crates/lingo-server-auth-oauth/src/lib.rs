// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Locale carryover across OAuth 2.0 round-trips.
//!
//! A user who starts signing in from `/ja/...` should land back on a Japanese
//! page, even though the provider's callback carries no locale of its own.
//!
//! # Flow
//!
//! ```text
//! GET /auth/github?locale=ja
//!   └─ prepare_oauth_locale_params ─┬─ outbound params {lang: "ja"}
//!                                   └─ session {oauth_locale, oauth_locale_timestamp}
//!        ... provider round-trip ...
//! GET /auth/github/callback
//!   └─ OAuthLocaleResolver::determine_oauth_locale
//!        provider params → session carryover → user → Accept-Language → default
//! ```
//!
//! The session carryover is single-use and expires after
//! [`OAUTH_LOCALE_TTL_SECS`] seconds.

mod authorize;
mod carrier;
mod params;
mod resolver;

pub use authorize::{generate_state, AuthorizeEndpoint, OAuthError};
pub use carrier::{
	restore_oauth_locale_from_session, OAuthLocaleCarrier, OAUTH_LOCALE_KEY,
	OAUTH_LOCALE_TIMESTAMP_KEY, OAUTH_LOCALE_TTL_SECS,
};
pub use params::{
	extract_provider_locale, prepare_oauth_locale_params, LANG_PARAM, LOCALE_PARAM,
	PROVIDER_PARAMS_KEY,
};
pub use resolver::OAuthLocaleResolver;
