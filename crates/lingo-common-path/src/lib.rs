// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Locale-aware path rewriting for Lingo.
//!
//! Every rendered URL carries its locale as the first path segment
//! (`/ja/messages`). This crate adds, removes and replaces that segment, and
//! validates paths that come from outside the application before they are
//! rewritten or redirected to.
//!
//! # Example
//!
//! ```
//! use lingo_common_i18n::{Locale, StaticCatalog};
//! use lingo_common_path::{validate_path, PathLocaleCodec};
//!
//! let catalog = StaticCatalog::new(["en", "ja"], "en").unwrap();
//! let codec = PathLocaleCodec::new(&catalog);
//!
//! assert_eq!(codec.add_locale_prefix("/messages?page=1", &Locale::new("ja")), "/ja/messages?page=1");
//! assert_eq!(codec.current_path_with_locale("/ja/messages", &Locale::new("en")), "/en/messages");
//! assert!(validate_path("/foo/../bar").is_err());
//! ```

mod codec;
mod error;
mod validate;

pub use codec::PathLocaleCodec;
pub use error::{MalformedReason, PathError};
pub use validate::{safe_path, validate_optional_path, validate_path};
