// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! OAuth configuration: locale carryover lifetime and provider endpoints.

use std::collections::BTreeMap;

use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::error::ConfigError;

const DEFAULT_LOCALE_TTL_SECS: u64 = 600;

/// Authorize endpoints for providers that need no explicit `authorize_url`.
fn well_known_authorize_url(provider: &str) -> Option<&'static str> {
	match provider {
		"github" => Some("https://github.com/login/oauth/authorize"),
		"google" => Some("https://accounts.google.com/o/oauth2/v2/auth"),
		_ => None,
	}
}

fn default_scopes(provider: &str) -> Vec<String> {
	let scopes: &[&str] = match provider {
		"github" => &["user:email", "read:user"],
		"google" => &["openid", "email", "profile"],
		_ => &[],
	};
	scopes.iter().map(|s| s.to_string()).collect()
}

/// Configuration layer for one OAuth provider (all fields optional for layering).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OAuthProviderConfigLayer {
	pub authorize_url: Option<String>,
	pub client_id: Option<String>,
	/// The callback URL the provider redirects to after authorization.
	pub redirect_uri: Option<String>,
	pub scopes: Option<Vec<String>>,
}

impl OAuthProviderConfigLayer {
	pub fn merge(&mut self, other: OAuthProviderConfigLayer) {
		if other.authorize_url.is_some() {
			self.authorize_url = other.authorize_url;
		}
		if other.client_id.is_some() {
			self.client_id = other.client_id;
		}
		if other.redirect_uri.is_some() {
			self.redirect_uri = other.redirect_uri;
		}
		if other.scopes.is_some() {
			self.scopes = other.scopes;
		}
	}

	/// Build the provider config, returning None if no client_id is set.
	pub fn build(self, name: &str) -> Result<Option<OAuthProviderConfig>, ConfigError> {
		let Some(client_id) = self.client_id.filter(|s| !s.is_empty()) else {
			debug!(provider = name, "OAuth provider has no client_id, skipping");
			return Ok(None);
		};

		let authorize_url = self
			.authorize_url
			.or_else(|| well_known_authorize_url(name).map(str::to_string))
			.ok_or_else(|| {
				ConfigError::Validation(format!(
					"OAuth provider '{name}' requires authorize_url"
				))
			})?;

		Url::parse(&authorize_url).map_err(|e| {
			ConfigError::Validation(format!(
				"OAuth provider '{name}' authorize_url must be absolute: {e}"
			))
		})?;

		let redirect_uri = self.redirect_uri.filter(|s| !s.is_empty()).ok_or_else(|| {
			ConfigError::Validation(format!(
				"OAuth provider '{name}' redirect_uri is required when client_id is set"
			))
		})?;

		Ok(Some(OAuthProviderConfig {
			authorize_url,
			client_id,
			redirect_uri,
			scopes: self.scopes.unwrap_or_else(|| default_scopes(name)),
		}))
	}
}

/// Validated configuration for one OAuth provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthProviderConfig {
	pub authorize_url: String,
	pub client_id: String,
	pub redirect_uri: String,
	pub scopes: Vec<String>,
}

/// OAuth configuration layer (partial, for merging).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OAuthConfigLayer {
	#[serde(default)]
	pub locale_ttl_secs: Option<u64>,
	#[serde(default)]
	pub providers: Option<BTreeMap<String, OAuthProviderConfigLayer>>,
}

impl OAuthConfigLayer {
	/// Providers merge per name, and per field within a provider.
	pub fn merge(&mut self, other: OAuthConfigLayer) {
		if other.locale_ttl_secs.is_some() {
			self.locale_ttl_secs = other.locale_ttl_secs;
		}
		let Some(other_providers) = other.providers else {
			return;
		};
		let providers = self.providers.get_or_insert_with(BTreeMap::new);
		for (name, layer) in other_providers {
			providers.entry(name).or_default().merge(layer);
		}
	}

	pub fn finalize(self) -> Result<OAuthConfig, ConfigError> {
		let locale_ttl_secs = self.locale_ttl_secs.unwrap_or(DEFAULT_LOCALE_TTL_SECS);
		if locale_ttl_secs == 0 || i64::try_from(locale_ttl_secs).is_err() {
			return Err(ConfigError::Validation(format!(
				"oauth.locale_ttl_secs must be a positive number of seconds, got {locale_ttl_secs}"
			)));
		}

		let mut providers = BTreeMap::new();
		for (name, layer) in self.providers.unwrap_or_default() {
			if let Some(provider) = layer.build(&name)? {
				providers.insert(name, provider);
			}
		}

		Ok(OAuthConfig {
			locale_ttl_secs,
			providers,
		})
	}
}

/// Resolved OAuth configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthConfig {
	/// Lifetime of the session locale carrier.
	pub locale_ttl_secs: u64,
	pub providers: BTreeMap<String, OAuthProviderConfig>,
}

impl Default for OAuthConfig {
	fn default() -> Self {
		Self {
			locale_ttl_secs: DEFAULT_LOCALE_TTL_SECS,
			providers: BTreeMap::new(),
		}
	}
}

impl OAuthConfig {
	pub fn provider(&self, name: &str) -> Option<&OAuthProviderConfig> {
		self.providers.get(name)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn github_layer() -> OAuthProviderConfigLayer {
		OAuthProviderConfigLayer {
			client_id: Some("client".to_string()),
			redirect_uri: Some("https://lingo.example/auth/github/callback".to_string()),
			..Default::default()
		}
	}

	#[test]
	fn test_defaults() {
		let config = OAuthConfigLayer::default().finalize().unwrap();
		assert_eq!(config, OAuthConfig::default());
		assert_eq!(config.locale_ttl_secs, 600);
		assert!(config.providers.is_empty());
	}

	#[test]
	fn test_zero_ttl_rejected() {
		let layer = OAuthConfigLayer {
			locale_ttl_secs: Some(0),
			..Default::default()
		};
		assert!(matches!(layer.finalize(), Err(ConfigError::Validation(_))));
	}

	#[test]
	fn test_well_known_provider_defaults() {
		let provider = github_layer().build("github").unwrap().unwrap();
		assert_eq!(provider.authorize_url, "https://github.com/login/oauth/authorize");
		assert_eq!(provider.scopes, ["user:email", "read:user"]);
	}

	#[test]
	fn test_unknown_provider_needs_authorize_url() {
		let err = github_layer().build("acme").unwrap_err();
		assert!(err.to_string().contains("requires authorize_url"));
	}

	#[test]
	fn test_relative_authorize_url_rejected() {
		let layer = OAuthProviderConfigLayer {
			authorize_url: Some("/oauth/authorize".to_string()),
			..github_layer()
		};
		assert!(layer.build("acme").is_err());
	}

	#[test]
	fn test_missing_redirect_uri_rejected() {
		let layer = OAuthProviderConfigLayer {
			redirect_uri: None,
			..github_layer()
		};
		assert!(layer.build("github").is_err());
	}

	#[test]
	fn test_unconfigured_provider_skipped() {
		let layer = OAuthConfigLayer {
			providers: Some(BTreeMap::from([(
				"github".to_string(),
				OAuthProviderConfigLayer::default(),
			)])),
			..Default::default()
		};
		assert!(layer.finalize().unwrap().provider("github").is_none());
	}

	#[test]
	fn test_providers_merge_per_field() {
		let mut base = OAuthConfigLayer {
			providers: Some(BTreeMap::from([("github".to_string(), github_layer())])),
			..Default::default()
		};
		base.merge(OAuthConfigLayer {
			locale_ttl_secs: Some(120),
			providers: Some(BTreeMap::from([(
				"github".to_string(),
				OAuthProviderConfigLayer {
					client_id: Some("override".to_string()),
					..Default::default()
				},
			)])),
		});
		let config = base.finalize().unwrap();
		assert_eq!(config.locale_ttl_secs, 120);
		let github = config.provider("github").unwrap();
		assert_eq!(github.client_id, "override");
		assert_eq!(github.redirect_uri, "https://lingo.example/auth/github/callback");
	}
}
