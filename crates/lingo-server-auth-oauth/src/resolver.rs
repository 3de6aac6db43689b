// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Locale resolution at the OAuth callback.

use chrono::{DateTime, Utc};
use http::HeaderMap;
use lingo_common_i18n::{LocaleCatalog, LocalePreference, LocaleResolver, Resolution, ResolutionSource};
use lingo_server_session::Session;
use serde_json::Value;
use tracing::{info, instrument};

use crate::carrier::{restore_oauth_locale_from_session, OAUTH_LOCALE_TTL_SECS};
use crate::params::extract_provider_locale;

/// Resolves the locale at an OAuth callback.
///
/// Resolution order (highest to lowest priority):
/// 1. Locale echoed in the provider parameters (`lang`, then `locale`)
/// 2. Session carryover written when the flow began
/// 3. User's stored locale preference
/// 4. `Accept-Language` negotiation
/// 5. Catalog default
///
/// The session carryover is consumed on every call, including when a
/// higher-priority source wins.
#[derive(Debug, Clone, Copy)]
pub struct OAuthLocaleResolver<'a, C: ?Sized> {
	catalog: &'a C,
	ttl_secs: i64,
	now: DateTime<Utc>,
}

impl<'a, C: LocaleCatalog + ?Sized> OAuthLocaleResolver<'a, C> {
	pub fn new(catalog: &'a C) -> Self {
		Self {
			catalog,
			ttl_secs: OAUTH_LOCALE_TTL_SECS,
			now: Utc::now(),
		}
	}

	pub fn with_ttl_secs(mut self, ttl_secs: i64) -> Self {
		self.ttl_secs = ttl_secs;
		self
	}

	/// Evaluate carrier expiry against `now` instead of the wall clock.
	pub fn at(mut self, now: DateTime<Utc>) -> Self {
		self.now = now;
		self
	}

	#[instrument(level = "debug", skip_all)]
	pub fn determine_oauth_locale<S: Session + ?Sized>(
		&self,
		provider_params: Option<&Value>,
		session: &mut S,
		user: Option<&dyn LocalePreference>,
		headers: &HeaderMap,
	) -> Resolution {
		let carried =
			restore_oauth_locale_from_session(self.catalog, session, self.now, self.ttl_secs);
		let base = LocaleResolver::new(self.catalog);

		let resolution = provider_params
			.and_then(|params| extract_provider_locale(self.catalog, params))
			.map(|locale| Resolution::new(locale, ResolutionSource::OauthParams))
			.or_else(|| carried.map(|locale| Resolution::new(locale, ResolutionSource::Session)))
			.or_else(|| base.from_user(user))
			.or_else(|| base.from_accept_language(headers))
			.unwrap_or_else(|| base.fallback());

		info!(
			locale = %resolution.locale,
			source = %resolution.source,
			"resolved OAuth callback locale"
		);
		resolution
	}
}
