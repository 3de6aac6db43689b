// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::fmt;

/// Why a path was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedReason {
	MissingLeadingSlash,
	DuplicateSlash,
	ControlOrWhitespace,
	Backslash,
	Traversal,
}

impl fmt::Display for MalformedReason {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let reason = match self {
			MalformedReason::MissingLeadingSlash => "path must start with '/'",
			MalformedReason::DuplicateSlash => "path contains '//'",
			MalformedReason::ControlOrWhitespace => "path contains control or whitespace characters",
			MalformedReason::Backslash => "path contains '\\'",
			MalformedReason::Traversal => "path contains a '..' segment",
		};
		f.write_str(reason)
	}
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
	#[error("malformed path: {reason}")]
	Malformed { reason: MalformedReason },
}

impl PathError {
	pub fn reason(&self) -> MalformedReason {
		match self {
			PathError::Malformed { reason } => *reason,
		}
	}
}

impl From<MalformedReason> for PathError {
	fn from(reason: MalformedReason) -> Self {
		PathError::Malformed { reason }
	}
}
