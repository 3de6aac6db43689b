// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! `Accept-Language` parsing and negotiation against a catalog.
//!
//! Negotiation rules:
//! - ranges are tried in descending `q` order; equal `q` keeps header order
//! - a range matches a catalog code case-insensitively, first exactly, then
//!   by its primary subtag (`ja-JP` → `ja`)
//! - `*` matches the first catalog locale (declaration order) not excluded
//! - `q=0` excludes a locale
//! - any malformed entry makes the whole header yield no candidate

use http::header::ACCEPT_LANGUAGE;
use http::HeaderMap;
use tracing::trace;

use crate::locale::{Locale, LocaleCatalog};

/// A language range with its quality value.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguagePreference {
	/// The language range as sent (e.g., "en-US", "fr", "*")
	pub range: String,
	/// Quality value from 0.0 to 1.0 (default is 1.0)
	pub quality: f32,
}

impl LanguagePreference {
	fn is_wildcard(&self) -> bool {
		self.range == "*"
	}

	fn primary_subtag(&self) -> &str {
		self.range.split('-').next().unwrap_or(&self.range)
	}
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AcceptLanguageError {
	#[error("invalid language range '{0}'")]
	InvalidRange(String),

	#[error("invalid quality value '{0}'")]
	InvalidQuality(String),
}

/// Parse an `Accept-Language` value into preferences, highest quality first.
///
/// Ranges with equal quality keep their header order.
pub fn parse_accept_language(header: &str) -> Result<Vec<LanguagePreference>, AcceptLanguageError> {
	let mut preferences = Vec::new();

	for part in header.split(',') {
		let part = part.trim();
		if part.is_empty() {
			continue;
		}

		let mut pieces = part.split(';');
		let range = pieces.next().unwrap_or_default().trim();
		if !is_language_range(range) {
			return Err(AcceptLanguageError::InvalidRange(range.to_string()));
		}

		let mut quality = 1.0_f32;
		for param in pieces {
			let param = param.trim();
			let Some((name, value)) = param.split_once('=') else {
				return Err(AcceptLanguageError::InvalidQuality(param.to_string()));
			};
			if !name.trim().eq_ignore_ascii_case("q") {
				continue;
			}
			let value = value.trim();
			quality = value
				.parse::<f32>()
				.ok()
				.filter(|q| q.is_finite() && (0.0..=1.0).contains(q))
				.ok_or_else(|| AcceptLanguageError::InvalidQuality(value.to_string()))?;
		}

		preferences.push(LanguagePreference {
			range: range.to_string(),
			quality,
		});
	}

	// sort_by is stable, so equal qualities keep header order
	preferences.sort_by(|a, b| b.quality.total_cmp(&a.quality));
	Ok(preferences)
}

fn is_language_range(range: &str) -> bool {
	if range == "*" {
		return true;
	}
	!range.is_empty()
		&& range
			.split('-')
			.all(|sub| !sub.is_empty() && sub.len() <= 8 && sub.chars().all(|c| c.is_ascii_alphanumeric()))
}

/// Pick the best catalog locale for an `Accept-Language` value.
///
/// Returns `None` when the header is malformed or nothing acceptable is
/// supported.
pub fn negotiate<C: LocaleCatalog + ?Sized>(catalog: &C, header: &str) -> Option<Locale> {
	let preferences = match parse_accept_language(header) {
		Ok(preferences) => preferences,
		Err(e) => {
			trace!(error = %e, "ignoring malformed Accept-Language header");
			return None;
		}
	};

	let excluded: Vec<&Locale> = preferences
		.iter()
		.filter(|p| p.quality == 0.0 && !p.is_wildcard())
		.filter_map(|p| find_ignore_case(catalog, &p.range))
		.collect();
	let allowed = |locale: &&Locale| !excluded.contains(locale);

	for preference in preferences.iter().filter(|p| p.quality > 0.0) {
		let candidate = if preference.is_wildcard() {
			catalog.available_locales().iter().find(allowed)
		} else {
			find_ignore_case(catalog, &preference.range)
				.filter(allowed)
				.or_else(|| find_ignore_case(catalog, preference.primary_subtag()).filter(allowed))
		};

		if let Some(locale) = candidate {
			return Some(locale.clone());
		}
	}

	None
}

/// Negotiate using every `Accept-Language` header on a request.
pub fn negotiate_from_headers<C: LocaleCatalog + ?Sized>(
	catalog: &C,
	headers: &HeaderMap,
) -> Option<Locale> {
	let mut values = Vec::new();
	for value in headers.get_all(ACCEPT_LANGUAGE) {
		values.push(value.to_str().ok()?);
	}
	if values.is_empty() {
		return None;
	}
	negotiate(catalog, &values.join(","))
}

fn find_ignore_case<'c, C: LocaleCatalog + ?Sized>(catalog: &'c C, range: &str) -> Option<&'c Locale> {
	catalog
		.available_locales()
		.iter()
		.find(|l| l.as_str().eq_ignore_ascii_case(range))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::locale::StaticCatalog;
	use http::HeaderValue;

	fn catalog() -> StaticCatalog {
		StaticCatalog::new(["en", "ja"], "en").unwrap()
	}

	mod parse {
		use super::*;

		#[test]
		fn orders_by_quality() {
			let prefs = parse_accept_language("fr;q=0.5, ja, en;q=0.8").unwrap();
			let ranges: Vec<_> = prefs.iter().map(|p| p.range.as_str()).collect();
			assert_eq!(ranges, vec!["ja", "en", "fr"]);
		}

		#[test]
		fn equal_quality_keeps_header_order() {
			let prefs = parse_accept_language("ja;q=0.7, en;q=0.7, fr").unwrap();
			let ranges: Vec<_> = prefs.iter().map(|p| p.range.as_str()).collect();
			assert_eq!(ranges, vec!["fr", "ja", "en"]);
		}

		#[test]
		fn skips_empty_entries() {
			let prefs = parse_accept_language(" , en ,, ").unwrap();
			assert_eq!(prefs.len(), 1);
			assert_eq!(prefs[0].quality, 1.0);
		}

		#[test]
		fn ignores_unknown_parameters() {
			let prefs = parse_accept_language("en;level=1;q=0.4").unwrap();
			assert_eq!(prefs[0].quality, 0.4);
		}

		#[test]
		fn rejects_malformed_input() {
			assert!(parse_accept_language("en;q=abc").is_err());
			assert!(parse_accept_language("en;q=1.5").is_err());
			assert!(parse_accept_language("en;q=-0.1").is_err());
			assert!(parse_accept_language("en;q=NaN").is_err());
			assert!(parse_accept_language("en;q").is_err());
			assert!(parse_accept_language("en_US").is_err());
			assert!(parse_accept_language("<script>").is_err());
		}
	}

	mod negotiate {
		use super::*;

		#[test]
		fn picks_highest_quality_supported_tag() {
			assert_eq!(negotiate(&catalog(), "fr,ja;q=0.8"), Some(Locale::new("ja")));
			assert_eq!(negotiate(&catalog(), "ja;q=0.2,en;q=0.9"), Some(Locale::new("en")));
		}

		#[test]
		fn tie_goes_to_header_order() {
			assert_eq!(negotiate(&catalog(), "ja;q=0.5,en;q=0.5"), Some(Locale::new("ja")));
			assert_eq!(negotiate(&catalog(), "en;q=0.5,ja;q=0.5"), Some(Locale::new("en")));
		}

		#[test]
		fn falls_back_to_primary_subtag() {
			assert_eq!(negotiate(&catalog(), "ja-JP,en;q=0.5"), Some(Locale::new("ja")));
		}

		#[test]
		fn matches_case_insensitively_but_returns_canonical_code() {
			let catalog = StaticCatalog::new(["en", "zh-CN"], "en").unwrap();
			assert_eq!(negotiate(&catalog, "ZH-cn"), Some(Locale::new("zh-CN")));
		}

		#[test]
		fn wildcard_uses_catalog_order_and_respects_exclusions() {
			assert_eq!(negotiate(&catalog(), "fr,*;q=0.1"), Some(Locale::new("en")));
			assert_eq!(negotiate(&catalog(), "en;q=0,*"), Some(Locale::new("ja")));
		}

		#[test]
		fn zero_quality_is_not_acceptable() {
			assert_eq!(negotiate(&catalog(), "ja;q=0"), None);
			assert_eq!(negotiate(&catalog(), "ja-JP,ja;q=0"), None);
		}

		#[test]
		fn nothing_supported_yields_none() {
			assert_eq!(negotiate(&catalog(), "fr,de;q=0.9"), None);
			assert_eq!(negotiate(&catalog(), ""), None);
		}

		#[test]
		fn malformed_header_yields_none() {
			assert_eq!(negotiate(&catalog(), "ja;q=oops"), None);
		}
	}

	mod from_headers {
		use super::*;

		#[test]
		fn missing_header_yields_none() {
			assert_eq!(negotiate_from_headers(&catalog(), &HeaderMap::new()), None);
		}

		#[test]
		fn combines_repeated_headers() {
			let mut headers = HeaderMap::new();
			headers.append(ACCEPT_LANGUAGE, HeaderValue::from_static("fr"));
			headers.append(ACCEPT_LANGUAGE, HeaderValue::from_static("ja;q=0.3"));
			assert_eq!(negotiate_from_headers(&catalog(), &headers), Some(Locale::new("ja")));
		}

		#[test]
		fn non_ascii_header_yields_none() {
			let mut headers = HeaderMap::new();
			headers.insert(
				ACCEPT_LANGUAGE,
				HeaderValue::from_bytes("ja,\u{e9}".as_bytes()).unwrap(),
			);
			assert_eq!(negotiate_from_headers(&catalog(), &headers), None);
		}
	}
}
