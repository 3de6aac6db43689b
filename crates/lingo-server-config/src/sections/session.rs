// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use serde::Deserialize;

use crate::error::ConfigError;

const DEFAULT_COOKIE_NAME: &str = "lingo_session";
const DEFAULT_MAX_AGE_SECS: u64 = 3600;

/// Session cookie configuration (runtime, fully resolved).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
	pub cookie_name: String,
	/// Idle lifetime of a stored session.
	pub max_age_secs: u64,
}

impl Default for SessionConfig {
	fn default() -> Self {
		Self {
			cookie_name: DEFAULT_COOKIE_NAME.to_string(),
			max_age_secs: DEFAULT_MAX_AGE_SECS,
		}
	}
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionConfigLayer {
	#[serde(default)]
	pub cookie_name: Option<String>,
	#[serde(default)]
	pub max_age_secs: Option<u64>,
}

impl SessionConfigLayer {
	pub fn merge(&mut self, other: SessionConfigLayer) {
		if other.cookie_name.is_some() {
			self.cookie_name = other.cookie_name;
		}
		if other.max_age_secs.is_some() {
			self.max_age_secs = other.max_age_secs;
		}
	}

	/// The cookie name must be a non-empty RFC 6265 token and the max age
	/// must be positive.
	pub fn finalize(self) -> Result<SessionConfig, ConfigError> {
		let cookie_name = self
			.cookie_name
			.unwrap_or_else(|| DEFAULT_COOKIE_NAME.to_string());

		let is_token = !cookie_name.is_empty()
			&& cookie_name.chars().all(|c| {
				c.is_ascii_graphic() && !"()<>@,;:\\\"/[]?={}".contains(c)
			});
		if !is_token {
			return Err(ConfigError::InvalidValue {
				key: "session.cookie_name".to_string(),
				message: format!("'{cookie_name}' is not a valid cookie name"),
			});
		}

		let max_age_secs = self.max_age_secs.unwrap_or(DEFAULT_MAX_AGE_SECS);
		if max_age_secs == 0 {
			return Err(ConfigError::InvalidValue {
				key: "session.max_age_secs".to_string(),
				message: "must be greater than zero".to_string(),
			});
		}

		Ok(SessionConfig {
			cookie_name,
			max_age_secs,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_default_cookie_name() {
		let config = SessionConfigLayer::default().finalize().unwrap();
		assert_eq!(config, SessionConfig::default());
		assert_eq!(config.cookie_name, "lingo_session");
		assert_eq!(config.max_age_secs, 3600);
	}

	#[test]
	fn test_rejects_invalid_cookie_names() {
		for name in ["", "a b", "a;b", "a=b"] {
			let layer = SessionConfigLayer {
				cookie_name: Some(name.to_string()),
				..Default::default()
			};
			assert!(layer.finalize().is_err(), "{name:?} should be rejected");
		}
	}

	#[test]
	fn test_rejects_zero_max_age() {
		let layer = SessionConfigLayer {
			max_age_secs: Some(0),
			..Default::default()
		};
		assert!(matches!(
			layer.finalize(),
			Err(ConfigError::InvalidValue { key, .. }) if key == "session.max_age_secs"
		));
	}

	#[test]
	fn test_merge_keeps_unset_fields() {
		let mut base = SessionConfigLayer {
			cookie_name: Some("base".to_string()),
			max_age_secs: Some(120),
		};
		base.merge(SessionConfigLayer {
			max_age_secs: Some(900),
			..Default::default()
		});
		let config = base.finalize().unwrap();
		assert_eq!(config.cookie_name, "base");
		assert_eq!(config.max_age_secs, 900);
	}
}
