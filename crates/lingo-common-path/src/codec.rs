// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Add, strip and replace the leading locale segment of a path.
//!
//! The locale segment is always the first path segment. It is matched as a
//! whole segment (terminated by `/`, `?`, `#` or end of input) against the
//! catalog, so `zh` never matches the start of `/zh-CN/...`. Query strings and
//! fragments are carried through unchanged.

use lingo_common_i18n::{Locale, LocaleCatalog};

/// Pure string codec over a locale catalog.
#[derive(Debug, Clone, Copy)]
pub struct PathLocaleCodec<'a, C: ?Sized> {
	catalog: &'a C,
}

impl<'a, C: LocaleCatalog + ?Sized> PathLocaleCodec<'a, C> {
	pub fn new(catalog: &'a C) -> Self {
		Self { catalog }
	}

	/// The catalog locale named by the first path segment, if any.
	pub fn locale_of(&self, path: &str) -> Option<&'a Locale> {
		let (segment, _) = split_first_segment(path)?;
		self.catalog.find(segment)
	}

	/// Remove leading locale segments from `path`.
	///
	/// Blank input and `/` yield `/`. Runs of `/` in the path part are
	/// collapsed first. Every consecutive leading locale segment is removed,
	/// so stripping twice gives the same result as stripping once.
	pub fn strip_locale_prefix(&self, path: &str) -> String {
		if path.trim().is_empty() || path == "/" {
			return "/".to_string();
		}

		let mut path = collapse_slashes(path);
		while let Some(remainder) = self.strip_one(&path) {
			path = remainder;
		}
		path
	}

	/// Prefix `path` with `/{locale}`, replacing any existing locale segment.
	pub fn add_locale_prefix(&self, path: &str, locale: &Locale) -> String {
		let clean = self.strip_locale_prefix(path);

		if clean == "/" {
			format!("/{locale}")
		} else if clean.starts_with("/?") || clean.starts_with("/#") {
			format!("/{locale}{}", &clean[1..])
		} else if clean.starts_with(['/', '?', '#']) {
			format!("/{locale}{clean}")
		} else {
			format!("/{locale}/{clean}")
		}
	}

	/// Switch a (possibly locale-prefixed) path to `locale`.
	pub fn current_path_with_locale(&self, path: &str, locale: &Locale) -> String {
		self.add_locale_prefix(&self.strip_locale_prefix(path), locale)
	}

	fn strip_one(&self, path: &str) -> Option<String> {
		let (segment, remainder) = split_first_segment(path)?;
		self.catalog.find(segment)?;

		Some(match remainder.chars().next() {
			None => "/".to_string(),
			Some('/') => remainder.to_string(),
			Some(_) => format!("/{remainder}"),
		})
	}
}

/// Split `/seg<rest>` into `seg` and `<rest>`; `None` without a leading slash.
fn split_first_segment(path: &str) -> Option<(&str, &str)> {
	let rest = path.strip_prefix('/')?;
	let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
	Some(rest.split_at(end))
}

/// Collapse runs of `/` in the path part, leaving query and fragment alone.
fn collapse_slashes(path: &str) -> String {
	let split = path.find(['?', '#']).unwrap_or(path.len());
	let (path_part, tail) = path.split_at(split);

	let mut collapsed = String::with_capacity(path.len());
	let mut previous_slash = false;
	for c in path_part.chars() {
		if c == '/' && previous_slash {
			continue;
		}
		previous_slash = c == '/';
		collapsed.push(c);
	}
	collapsed.push_str(tail);
	collapsed
}
