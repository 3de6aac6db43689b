// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Locale candidate validation.
//!
//! Candidates arrive from untrusted input (query strings, OAuth provider
//! echoes, session values) as untyped JSON values. Only strings can name a
//! locale; numbers, arrays, objects, booleans and null are rejected without
//! being coerced.

use serde_json::Value;

use crate::locale::{Locale, LocaleCatalog};

/// Returns true if `value` is a string naming a supported locale.
///
/// Never panics and never errors, whatever the shape of `value`.
pub fn is_valid_locale<C: LocaleCatalog + ?Sized>(catalog: &C, value: &Value) -> bool {
	valid_locale(catalog, value).is_some()
}

/// Returns the catalog's canonical locale for `value` if it is valid.
pub fn valid_locale<C: LocaleCatalog + ?Sized>(catalog: &C, value: &Value) -> Option<Locale> {
	match value {
		Value::String(code) if !code.is_empty() => catalog.find(code).cloned(),
		_ => None,
	}
}

/// Check that a locale code is usable as a catalog entry.
///
/// Accepts BCP 47-shaped codes: ASCII alphanumeric subtags of 1 to 8
/// characters joined by single hyphens. This keeps every code safe to use as
/// a URL path segment.
pub fn validate_locale_code(code: &str) -> Result<(), String> {
	if code.is_empty() {
		return Err("empty locale code".into());
	}

	if let Some(c) = code.chars().find(|c| !c.is_ascii_alphanumeric() && *c != '-') {
		return Err(format!("invalid character {c:?} in locale code"));
	}

	for subtag in code.split('-') {
		if subtag.is_empty() {
			return Err("empty subtag in locale code".into());
		}
		if subtag.len() > 8 {
			return Err(format!("subtag '{subtag}' is too long (max 8 chars)"));
		}
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::locale::StaticCatalog;
	use proptest::prelude::*;
	use serde_json::json;

	fn catalog() -> StaticCatalog {
		StaticCatalog::new(["en", "ja"], "en").unwrap()
	}

	mod is_valid_locale {
		use super::*;

		#[test]
		fn accepts_catalog_members() {
			assert!(is_valid_locale(&catalog(), &json!("en")));
			assert!(is_valid_locale(&catalog(), &json!("ja")));
		}

		#[test]
		fn rejects_unknown_and_empty_strings() {
			assert!(!is_valid_locale(&catalog(), &json!("fr")));
			assert!(!is_valid_locale(&catalog(), &json!("")));
			assert!(!is_valid_locale(&catalog(), &json!("JA")));
			assert!(!is_valid_locale(&catalog(), &json!(" ja")));
		}

		#[test]
		fn rejects_non_string_values() {
			let c = catalog();
			assert!(!is_valid_locale(&c, &Value::Null));
			assert!(!is_valid_locale(&c, &json!(42)));
			assert!(!is_valid_locale(&c, &json!(1.5)));
			assert!(!is_valid_locale(&c, &json!(true)));
			assert!(!is_valid_locale(&c, &json!(["ja"])));
			assert!(!is_valid_locale(&c, &json!({ "locale": "ja" })));
		}

		#[test]
		fn valid_locale_returns_canonical_entry() {
			assert_eq!(valid_locale(&catalog(), &json!("ja")), Some(Locale::new("ja")));
			assert_eq!(valid_locale(&catalog(), &json!(["ja"])), None);
		}
	}

	mod validate_locale_code {
		use super::*;

		#[test]
		fn accepts_common_codes() {
			for code in ["en", "ja", "zh-CN", "sr-Latn-RS", "x-custom"] {
				assert!(validate_locale_code(code).is_ok(), "{code} should be valid");
			}
		}

		#[test]
		fn rejects_path_hostile_codes() {
			for code in ["", "en/us", "..", "en us", "en\n", "en_US", "-en", "en-", "en--US"] {
				assert!(validate_locale_code(code).is_err(), "{code:?} should be invalid");
			}
		}

		#[test]
		fn rejects_long_subtags() {
			assert!(validate_locale_code("en-abcdefghi").is_err());
		}
	}

	fn arbitrary_json() -> impl Strategy<Value = Value> {
		let leaf = prop_oneof![
			Just(Value::Null),
			any::<bool>().prop_map(Value::Bool),
			any::<i64>().prop_map(|n| json!(n)),
			any::<f64>().prop_map(|f| json!(f)),
			".*".prop_map(Value::String),
		];
		leaf.prop_recursive(3, 16, 4, |inner| {
			prop_oneof![
				prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
				prop::collection::hash_map("[a-z]{1,6}", inner, 0..4)
					.prop_map(|m| Value::Object(m.into_iter().collect())),
			]
		})
	}

	proptest! {
		/// The validator is total over every JSON shape.
		#[test]
		fn validator_is_total(value in arbitrary_json()) {
			let valid = is_valid_locale(&catalog(), &value);
			if valid {
				prop_assert!(value.is_string());
			}
		}

		/// Only exact catalog members pass.
		#[test]
		fn only_members_pass(code in "[a-zA-Z-]{0,8}") {
			let expected = code == "en" || code == "ja";
			prop_assert_eq!(is_valid_locale(&catalog(), &Value::String(code)), expected);
		}
	}
}
