// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Per-request rendering context.
//!
//! The active locale is carried explicitly in a [`PageContext`] value and
//! handed to whatever renders the page.

use lingo_common_i18n::{Locale, LocaleCatalog};
use lingo_common_path::PathLocaleCodec;
use serde::Serialize;
use tracing::warn;

/// A language-switcher link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alternate {
	pub locale: Locale,
	pub display_name: String,
	pub href: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageContext {
	pub locale: Locale,
	pub display_name: String,
	/// Request path and query, as received.
	pub path: String,
	pub alternates: Vec<Alternate>,
}

impl PageContext {
	/// Build the context for rendering `path` in `code`.
	///
	/// A code outside the catalog is logged and replaced by the default.
	pub fn build<C: LocaleCatalog + ?Sized>(catalog: &C, code: &str, path: &str) -> Self {
		let locale = catalog.activate(code).unwrap_or_else(|e| {
			warn!(error = %e, "unsupported locale at render time, using default");
			catalog.default_locale().clone()
		});

		let codec = PathLocaleCodec::new(catalog);
		let alternates = catalog
			.available_locales()
			.iter()
			.map(|alternate| Alternate {
				locale: alternate.clone(),
				display_name: display_name(catalog, alternate),
				href: codec.current_path_with_locale(path, alternate),
			})
			.collect();

		Self {
			display_name: display_name(catalog, &locale),
			locale,
			path: path.to_string(),
			alternates,
		}
	}
}

fn display_name<C: LocaleCatalog + ?Sized>(catalog: &C, locale: &Locale) -> String {
	catalog
		.display_name(locale)
		.map(str::to_string)
		.unwrap_or_else(|| locale.to_string())
}

#[cfg(test)]
mod tests {
	use super::*;
	use lingo_common_i18n::StaticCatalog;

	fn catalog() -> StaticCatalog {
		StaticCatalog::new(["en", "ja"], "en").unwrap()
	}

	#[test]
	fn lists_alternates_in_catalog_order() {
		let context = PageContext::build(&catalog(), "ja", "/ja/messages?page=2");
		assert_eq!(context.locale, "ja");
		assert_eq!(context.display_name, "日本語");
		let hrefs: Vec<_> = context.alternates.iter().map(|a| a.href.as_str()).collect();
		assert_eq!(hrefs, ["/en/messages?page=2", "/ja/messages?page=2"]);
	}

	#[test]
	fn unsupported_locale_renders_default() {
		let context = PageContext::build(&catalog(), "fr", "/fr");
		assert_eq!(context.locale, "en");
	}
}
