// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Locale resolution for ordinary (non-OAuth) requests.

use std::fmt;

use http::HeaderMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::accept_language::negotiate_from_headers;
use crate::locale::{Locale, LocaleCatalog};
use crate::validate::valid_locale;

/// Which signal produced a resolved locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionSource {
	Param,
	UserPreference,
	Session,
	OauthParams,
	AcceptLanguageHeader,
	Default,
}

impl ResolutionSource {
	pub fn as_str(&self) -> &'static str {
		match self {
			ResolutionSource::Param => "param",
			ResolutionSource::UserPreference => "user_preference",
			ResolutionSource::Session => "session",
			ResolutionSource::OauthParams => "oauth_params",
			ResolutionSource::AcceptLanguageHeader => "accept_language_header",
			ResolutionSource::Default => "default",
		}
	}
}

impl fmt::Display for ResolutionSource {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A resolved locale and the signal it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
	pub locale: Locale,
	pub source: ResolutionSource,
}

impl Resolution {
	pub fn new(locale: Locale, source: ResolutionSource) -> Self {
		Self { locale, source }
	}
}

/// Anything that may carry a saved language preference, typically a user.
pub trait LocalePreference {
	fn preferred_locale(&self) -> Option<&str>;
}

/// Resolves the effective locale for a request against a catalog.
///
/// Resolution order (highest to lowest priority):
/// 1. Explicit `locale` request parameter (if valid)
/// 2. User's stored locale preference (if valid)
/// 3. `Accept-Language` negotiation (if it yields a supported locale)
/// 4. Catalog default
#[derive(Debug, Clone, Copy)]
pub struct LocaleResolver<'a, C: ?Sized> {
	catalog: &'a C,
}

impl<'a, C: LocaleCatalog + ?Sized> LocaleResolver<'a, C> {
	pub fn new(catalog: &'a C) -> Self {
		Self { catalog }
	}

	/// Determine the locale for an ordinary request. Total: never fails.
	#[instrument(level = "debug", skip_all)]
	pub fn determine_locale(
		&self,
		param: Option<&Value>,
		headers: &HeaderMap,
		user: Option<&dyn LocalePreference>,
	) -> Resolution {
		let resolution = self
			.from_param(param)
			.or_else(|| self.from_user(user))
			.or_else(|| self.from_accept_language(headers))
			.unwrap_or_else(|| self.fallback());

		debug!(
			locale = %resolution.locale,
			source = %resolution.source,
			"resolved request locale"
		);
		resolution
	}

	pub fn from_param(&self, param: Option<&Value>) -> Option<Resolution> {
		param
			.and_then(|value| valid_locale(self.catalog, value))
			.map(|locale| Resolution::new(locale, ResolutionSource::Param))
	}

	pub fn from_user(&self, user: Option<&dyn LocalePreference>) -> Option<Resolution> {
		user.and_then(|user| user.preferred_locale())
			.filter(|code| !code.is_empty())
			.and_then(|code| self.catalog.find(code))
			.map(|locale| Resolution::new(locale.clone(), ResolutionSource::UserPreference))
	}

	pub fn from_accept_language(&self, headers: &HeaderMap) -> Option<Resolution> {
		negotiate_from_headers(self.catalog, headers)
			.filter(|locale| self.catalog.contains(locale.as_str()))
			.map(|locale| Resolution::new(locale, ResolutionSource::AcceptLanguageHeader))
	}

	pub fn fallback(&self) -> Resolution {
		Resolution::new(self.catalog.default_locale().clone(), ResolutionSource::Default)
	}
}
