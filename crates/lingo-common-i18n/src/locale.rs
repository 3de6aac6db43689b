// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Locale codes, metadata and the catalog seam.

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, LocaleError};
use crate::validate::validate_locale_code;

/// Default locale used when no configuration overrides it.
pub const DEFAULT_LOCALE: &str = "en";

/// Locales served when no configuration overrides them, in declaration order.
pub const DEFAULT_AVAILABLE_LOCALES: &[&str] = &["en", "ja"];

/// A locale code such as `en` or `ja`.
///
/// Equality is case-sensitive on the canonical form. A `Locale` on its own
/// carries no validity guarantee; values handed out by a [`LocaleCatalog`] are
/// members of that catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Locale(String);

impl Locale {
	pub fn new(code: impl Into<String>) -> Self {
		Self(code.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	pub fn into_string(self) -> String {
		self.0
	}
}

impl fmt::Display for Locale {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl AsRef<str> for Locale {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

impl PartialEq<str> for Locale {
	fn eq(&self, other: &str) -> bool {
		self.0 == other
	}
}

impl PartialEq<&str> for Locale {
	fn eq(&self, other: &&str) -> bool {
		self.0 == *other
	}
}

/// Metadata about a well-known locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleInfo {
	/// Locale code (e.g., "en", "ja", "zh-CN")
	pub code: &'static str,
	/// English name of the language
	pub name: &'static str,
	/// Native name of the language, used as the display name
	pub native_name: &'static str,
}

/// Well-known locales. Display names for catalog entries default to these.
pub const LOCALES: &[LocaleInfo] = &[
	LocaleInfo {
		code: "en",
		name: "English",
		native_name: "English",
	},
	LocaleInfo {
		code: "ja",
		name: "Japanese",
		native_name: "日本語",
	},
	LocaleInfo {
		code: "es",
		name: "Spanish",
		native_name: "Español",
	},
	LocaleInfo {
		code: "fr",
		name: "French",
		native_name: "Français",
	},
	LocaleInfo {
		code: "de",
		name: "German",
		native_name: "Deutsch",
	},
	LocaleInfo {
		code: "ko",
		name: "Korean",
		native_name: "한국어",
	},
	LocaleInfo {
		code: "pt",
		name: "Portuguese",
		native_name: "Português",
	},
	LocaleInfo {
		code: "zh",
		name: "Chinese",
		native_name: "中文",
	},
	LocaleInfo {
		code: "zh-CN",
		name: "Chinese (Simplified)",
		native_name: "简体中文",
	},
	LocaleInfo {
		code: "zh-TW",
		name: "Chinese (Traditional)",
		native_name: "繁體中文",
	},
];

/// Look up well-known metadata for a locale code.
pub fn locale_info(code: &str) -> Option<&'static LocaleInfo> {
	LOCALES.iter().find(|info| info.code == code)
}

/// Read-only view of the application's supported locales.
///
/// The catalog is loaded and validated elsewhere; this crate only reads it.
pub trait LocaleCatalog: Send + Sync {
	/// Supported locales in declaration order.
	fn available_locales(&self) -> &[Locale];

	/// The fallback locale. Always a member of [`Self::available_locales`].
	fn default_locale(&self) -> &Locale;

	/// Human-readable name for a supported locale.
	fn display_name(&self, locale: &Locale) -> Option<&str>;

	/// Find the catalog's canonical entry for `code` (exact, case-sensitive).
	fn find(&self, code: &str) -> Option<&Locale> {
		self.available_locales().iter().find(|l| l.as_str() == code)
	}

	fn contains(&self, code: &str) -> bool {
		self.find(code).is_some()
	}

	/// Return the canonical locale for `code`, or an error naming it.
	///
	/// Used when a value is about to become the active rendering locale.
	fn activate(&self, code: &str) -> Result<Locale, LocaleError> {
		self.find(code)
			.cloned()
			.ok_or_else(|| LocaleError::Unsupported(code.to_string()))
	}
}

/// Immutable, in-memory catalog built once at startup.
#[derive(Debug, Clone)]
pub struct StaticCatalog {
	locales: Vec<Locale>,
	default_locale: Locale,
	display_names: HashMap<Locale, String>,
}

impl StaticCatalog {
	/// Build a catalog from locale codes in declaration order.
	///
	/// # Errors
	///
	/// Fails if the list is empty, a code is malformed or repeated, or the
	/// default is not one of the codes.
	pub fn new<I, S>(codes: I, default_locale: &str) -> Result<Self, CatalogError>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let mut seen = HashSet::new();
		let mut locales = Vec::new();

		for code in codes {
			let code = code.into();
			validate_locale_code(&code).map_err(|reason| CatalogError::InvalidCode {
				code: code.clone(),
				reason,
			})?;
			if !seen.insert(code.clone()) {
				return Err(CatalogError::Duplicate(code));
			}
			locales.push(Locale::new(code));
		}

		if locales.is_empty() {
			return Err(CatalogError::Empty);
		}

		let default_locale = locales
			.iter()
			.find(|l| l.as_str() == default_locale)
			.cloned()
			.ok_or_else(|| CatalogError::DefaultNotAvailable(default_locale.to_string()))?;

		let display_names = locales
			.iter()
			.map(|locale| {
				let name = locale_info(locale.as_str())
					.map(|info| info.native_name.to_string())
					.unwrap_or_else(|| locale.to_string());
				(locale.clone(), name)
			})
			.collect();

		Ok(Self {
			locales,
			default_locale,
			display_names,
		})
	}

	/// Override display names. Entries for codes outside the catalog are ignored.
	pub fn with_display_names<I, K, V>(mut self, names: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: AsRef<str>,
		V: Into<String>,
	{
		for (code, name) in names {
			if let Some(locale) = self.find(code.as_ref()).cloned() {
				self.display_names.insert(locale, name.into());
			}
		}
		self
	}
}

impl Default for StaticCatalog {
	fn default() -> Self {
		Self {
			locales: DEFAULT_AVAILABLE_LOCALES
				.iter()
				.map(|code| Locale::new(*code))
				.collect(),
			default_locale: Locale::new(DEFAULT_LOCALE),
			display_names: DEFAULT_AVAILABLE_LOCALES
				.iter()
				.filter_map(|code| locale_info(code))
				.map(|info| (Locale::new(info.code), info.native_name.to_string()))
				.collect(),
		}
	}
}

impl LocaleCatalog for StaticCatalog {
	fn available_locales(&self) -> &[Locale] {
		&self.locales
	}

	fn default_locale(&self) -> &Locale {
		&self.default_locale
	}

	fn display_name(&self, locale: &Locale) -> Option<&str> {
		self.display_names.get(locale).map(String::as_str)
	}
}
