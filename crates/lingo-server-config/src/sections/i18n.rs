// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Locale catalog configuration.

use std::collections::BTreeMap;

use lingo_common_i18n::{StaticCatalog, DEFAULT_AVAILABLE_LOCALES, DEFAULT_LOCALE};
use serde::Deserialize;

use crate::error::ConfigError;

/// Resolved locale configuration: a validated catalog.
#[derive(Debug, Clone, Default)]
pub struct I18nConfig {
	pub catalog: StaticCatalog,
}

/// Locale configuration layer (partial, for merging).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct I18nConfigLayer {
	/// Ordered list of supported locale codes.
	#[serde(default)]
	pub available_locales: Option<Vec<String>>,
	#[serde(default)]
	pub default_locale: Option<String>,
	/// Language-switcher labels keyed by locale code.
	#[serde(default)]
	pub display_names: Option<BTreeMap<String, String>>,
}

impl I18nConfigLayer {
	/// The locale list is replaced as a whole; display names merge per code.
	pub fn merge(&mut self, other: I18nConfigLayer) {
		if other.available_locales.is_some() {
			self.available_locales = other.available_locales;
		}
		if other.default_locale.is_some() {
			self.default_locale = other.default_locale;
		}
		match (&mut self.display_names, other.display_names) {
			(Some(names), Some(other_names)) => names.extend(other_names),
			(None, Some(other_names)) => self.display_names = Some(other_names),
			_ => {}
		}
	}

	/// Build the catalog.
	///
	/// Without an explicit default, [`DEFAULT_LOCALE`] is used when it is in
	/// the list and the first listed locale otherwise.
	pub fn finalize(self) -> Result<I18nConfig, ConfigError> {
		let locales = self.available_locales.unwrap_or_else(|| {
			DEFAULT_AVAILABLE_LOCALES
				.iter()
				.map(|code| code.to_string())
				.collect()
		});

		let default_locale = match self.default_locale {
			Some(code) => code,
			None if locales.iter().any(|code| code == DEFAULT_LOCALE) => DEFAULT_LOCALE.to_string(),
			None => locales.first().cloned().unwrap_or_default(),
		};

		let catalog = StaticCatalog::new(locales, &default_locale)
			.map_err(|e| ConfigError::Validation(format!("i18n: {e}")))?
			.with_display_names(self.display_names.unwrap_or_default());

		Ok(I18nConfig { catalog })
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use lingo_common_i18n::{Locale, LocaleCatalog};

	#[test]
	fn test_defaults() {
		let config = I18nConfigLayer::default().finalize().unwrap();
		let codes: Vec<_> = config
			.catalog
			.available_locales()
			.iter()
			.map(Locale::as_str)
			.collect();
		assert_eq!(codes, ["en", "ja"]);
		assert_eq!(config.catalog.default_locale().as_str(), "en");
	}

	#[test]
	fn test_default_falls_back_to_first_listed() {
		let layer = I18nConfigLayer {
			available_locales: Some(vec!["ja".to_string(), "ko".to_string()]),
			..Default::default()
		};
		let config = layer.finalize().unwrap();
		assert_eq!(config.catalog.default_locale().as_str(), "ja");
	}

	#[test]
	fn test_rejects_default_outside_list() {
		let layer = I18nConfigLayer {
			available_locales: Some(vec!["en".to_string()]),
			default_locale: Some("ja".to_string()),
			..Default::default()
		};
		let err = layer.finalize().unwrap_err();
		assert!(matches!(err, ConfigError::Validation(_)));
		assert!(err.to_string().contains("not in the catalog"));
	}

	#[test]
	fn test_rejects_empty_and_duplicate_lists() {
		for locales in [vec![], vec!["en".to_string(), "en".to_string()]] {
			let layer = I18nConfigLayer {
				available_locales: Some(locales),
				default_locale: Some("en".to_string()),
				..Default::default()
			};
			assert!(layer.finalize().is_err());
		}
	}

	#[test]
	fn test_display_names_merge_per_code() {
		let mut base = I18nConfigLayer {
			display_names: Some(BTreeMap::from([
				("en".to_string(), "English".to_string()),
				("ja".to_string(), "Japanese".to_string()),
			])),
			..Default::default()
		};
		base.merge(I18nConfigLayer {
			display_names: Some(BTreeMap::from([("ja".to_string(), "日本語".to_string())])),
			..Default::default()
		});
		let config = base.finalize().unwrap();
		assert_eq!(config.catalog.display_name(&Locale::new("en")), Some("English"));
		assert_eq!(config.catalog.display_name(&Locale::new("ja")), Some("日本語"));
	}

	#[test]
	fn test_deserialize_from_toml() {
		let layer: I18nConfigLayer = toml::from_str(
			r#"
available_locales = ["en", "ja", "zh-CN"]
default_locale = "ja"

[display_names]
zh-CN = "简体中文"
"#,
		)
		.unwrap();
		let config = layer.finalize().unwrap();
		assert!(config.catalog.contains("zh-CN"));
		assert_eq!(config.catalog.default_locale().as_str(), "ja");
	}
}
