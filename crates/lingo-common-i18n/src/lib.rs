// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Locale selection support for Lingo.
//!
//! This crate decides *which* of the application's supported languages applies
//! to a request. It does not translate strings; the catalog of translations is
//! an external collaborator seen only through [`LocaleCatalog`].
//!
//! # Resolution Order
//!
//! ```text
//! ?locale=ja  →  user preference  →  Accept-Language  →  catalog default
//! ```
//!
//! Each step is consulted only when every earlier step produced no valid
//! candidate. Invalid candidates are skipped silently; resolution never fails.
//!
//! # Example
//!
//! ```
//! use http::HeaderMap;
//! use lingo_common_i18n::{LocaleResolver, ResolutionSource, StaticCatalog};
//!
//! let catalog = StaticCatalog::new(["en", "ja"], "en").unwrap();
//! let resolver = LocaleResolver::new(&catalog);
//!
//! let mut headers = HeaderMap::new();
//! headers.insert(http::header::ACCEPT_LANGUAGE, "fr,ja;q=0.8".parse().unwrap());
//!
//! let resolution = resolver.determine_locale(None, &headers, None);
//! assert_eq!(resolution.locale, "ja");
//! assert_eq!(resolution.source, ResolutionSource::AcceptLanguageHeader);
//! ```

mod accept_language;
mod error;
mod locale;
mod resolve;
mod validate;

pub use accept_language::{
	negotiate, negotiate_from_headers, parse_accept_language, AcceptLanguageError,
	LanguagePreference,
};
pub use error::{CatalogError, LocaleError};
pub use locale::{
	locale_info, Locale, LocaleCatalog, LocaleInfo, StaticCatalog, DEFAULT_AVAILABLE_LOCALES,
	DEFAULT_LOCALE, LOCALES,
};
pub use resolve::{LocalePreference, LocaleResolver, Resolution, ResolutionSource};
pub use validate::{is_valid_locale, valid_locale, validate_locale_code};
