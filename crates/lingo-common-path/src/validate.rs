// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Strict validation for externally supplied paths.
//!
//! Run [`validate_path`] on any path that did not come from the application's
//! own routes (a `Referer`, a `redirect_to` parameter) before rewriting or
//! redirecting to it.

use tracing::warn;

use crate::error::{MalformedReason, PathError};

/// Check that `path` is a well-formed local path.
///
/// Blank input means "no path supplied" and passes. Otherwise the path must
/// start with `/` and must not contain `//`, `\`, control or whitespace
/// characters, or a `..` segment (also when percent-encoded).
pub fn validate_path(path: &str) -> Result<(), PathError> {
	if path.trim().is_empty() {
		return Ok(());
	}

	if !path.starts_with('/') {
		return Err(MalformedReason::MissingLeadingSlash.into());
	}

	if path.contains("//") {
		return Err(MalformedReason::DuplicateSlash.into());
	}

	if path.chars().any(|c| c.is_control() || c.is_whitespace()) {
		return Err(MalformedReason::ControlOrWhitespace.into());
	}

	if path.contains('\\') {
		return Err(MalformedReason::Backslash.into());
	}

	let path_part = path.split(['?', '#']).next().unwrap_or(path);
	if path_part.split('/').any(is_traversal_segment) {
		return Err(MalformedReason::Traversal.into());
	}

	Ok(())
}

/// [`validate_path`] for optional input; `None` passes.
pub fn validate_optional_path(path: Option<&str>) -> Result<(), PathError> {
	path.map_or(Ok(()), validate_path)
}

/// Return `path` if it is present and valid, otherwise `fallback`.
///
/// Rejections are logged and never propagated.
pub fn safe_path(path: Option<&str>, fallback: &str) -> String {
	match path {
		Some(p) if !p.trim().is_empty() => match validate_path(p) {
			Ok(()) => p.to_string(),
			Err(e) => {
				warn!(reason = %e.reason(), "rejected external path, using fallback");
				fallback.to_string()
			}
		},
		_ => fallback.to_string(),
	}
}

fn is_traversal_segment(segment: &str) -> bool {
	segment == ".." || segment.eq_ignore_ascii_case("%2e%2e")
		|| segment.eq_ignore_ascii_case(".%2e")
		|| segment.eq_ignore_ascii_case("%2e.")
}
