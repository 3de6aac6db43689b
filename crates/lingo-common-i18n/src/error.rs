// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for catalog construction and locale activation.

/// Errors raised while building a [`crate::StaticCatalog`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
	#[error("locale catalog is empty")]
	Empty,

	#[error("invalid locale code '{code}': {reason}")]
	InvalidCode { code: String, reason: String },

	#[error("duplicate locale code '{0}'")]
	Duplicate(String),

	#[error("default locale '{0}' is not in the catalog")]
	DefaultNotAvailable(String),
}

/// Error returned when a locale that is not in the catalog is forced onto a
/// rendering context.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocaleError {
	#[error("unsupported locale '{0}'")]
	Unsupported(String),
}
