// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Shared application state.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use lingo_common_i18n::StaticCatalog;
use lingo_server_auth_oauth::AuthorizeEndpoint;
use lingo_server_config::ServerConfig;
use lingo_server_session::SessionStore;

use crate::error::ServerError;

/// State handed to every handler. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
	pub config: Arc<ServerConfig>,
	pub sessions: SessionStore,
	providers: Arc<BTreeMap<String, AuthorizeEndpoint>>,
}

impl AppState {
	/// Build state from a loaded configuration.
	///
	/// Fails if a configured provider cannot be turned into an authorize
	/// endpoint.
	pub fn new(config: ServerConfig) -> Result<Self, ServerError> {
		let mut providers = BTreeMap::new();
		for (name, provider) in &config.oauth.providers {
			let endpoint = AuthorizeEndpoint::new(
				&provider.authorize_url,
				provider.client_id.clone(),
				provider.redirect_uri.clone(),
				provider.scopes.clone(),
			)?;
			providers.insert(name.clone(), endpoint);
		}

		let sessions = SessionStore::with_max_age(Duration::from_secs(config.session.max_age_secs));

		Ok(Self {
			config: Arc::new(config),
			sessions,
			providers: Arc::new(providers),
		})
	}

	pub fn catalog(&self) -> &StaticCatalog {
		&self.config.i18n.catalog
	}

	pub fn provider(&self, name: &str) -> Option<&AuthorizeEndpoint> {
		self.providers.get(name)
	}

	/// Carrier lifetime in seconds, as the resolvers expect it.
	pub fn locale_ttl_secs(&self) -> i64 {
		i64::try_from(self.config.oauth.locale_ttl_secs).unwrap_or(i64::MAX)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use lingo_server_config::OAuthProviderConfig;

	#[test]
	fn builds_endpoints_for_configured_providers() {
		let mut config = ServerConfig::default();
		config.oauth.providers.insert(
			"github".to_string(),
			OAuthProviderConfig {
				authorize_url: "https://github.com/login/oauth/authorize".to_string(),
				client_id: "client".to_string(),
				redirect_uri: "http://localhost:8080/auth/github/callback".to_string(),
				scopes: vec!["read:user".to_string()],
			},
		);
		let state = AppState::new(config).unwrap();
		assert!(state.provider("github").is_some());
		assert!(state.provider("google").is_none());
		assert_eq!(state.locale_ttl_secs(), 600);
		assert_eq!(state.sessions.max_age(), Duration::from_secs(3600));
	}
}
