// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Provider authorization endpoints.

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::instrument;
use url::Url;

/// Errors from configuring an authorization endpoint.
#[derive(Debug, Error)]
pub enum OAuthError {
	/// The authorize URL could not be parsed.
	#[error("invalid authorize URL '{url}': {source}")]
	InvalidAuthorizeUrl {
		url: String,
		#[source]
		source: url::ParseError,
	},

	/// The authorize URL is not an http(s) URL.
	#[error("authorize URL must use http or https: {0}")]
	UnsupportedScheme(String),

	/// A configuration value was empty or invalid.
	#[error("invalid configuration: {0}")]
	InvalidConfig(String),
}

/// An OAuth 2.0 authorization endpoint for one provider.
#[derive(Debug, Clone)]
pub struct AuthorizeEndpoint {
	authorize_url: Url,
	client_id: String,
	redirect_uri: String,
	scopes: Vec<String>,
}

impl AuthorizeEndpoint {
	pub fn new(
		authorize_url: &str,
		client_id: impl Into<String>,
		redirect_uri: impl Into<String>,
		scopes: Vec<String>,
	) -> Result<Self, OAuthError> {
		let parsed = Url::parse(authorize_url).map_err(|source| OAuthError::InvalidAuthorizeUrl {
			url: authorize_url.to_string(),
			source,
		})?;
		if !matches!(parsed.scheme(), "http" | "https") {
			return Err(OAuthError::UnsupportedScheme(authorize_url.to_string()));
		}

		let client_id = client_id.into();
		if client_id.trim().is_empty() {
			return Err(OAuthError::InvalidConfig("client_id cannot be empty".to_string()));
		}

		let redirect_uri = redirect_uri.into();
		if redirect_uri.trim().is_empty() {
			return Err(OAuthError::InvalidConfig("redirect_uri cannot be empty".to_string()));
		}

		Ok(Self {
			authorize_url: parsed,
			client_id,
			redirect_uri,
			scopes,
		})
	}

	fn scopes_string(&self) -> String {
		self.scopes.join(" ")
	}

	/// Build the URL the user is redirected to.
	///
	/// `extra` is appended after the standard parameters; string values are
	/// sent as-is, other JSON values in their serialized form.
	pub fn authorization_url(&self, state: &str, extra: &Map<String, Value>) -> String {
		let mut url = self.authorize_url.clone();

		{
			let mut query = url.query_pairs_mut();
			query
				.append_pair("client_id", &self.client_id)
				.append_pair("redirect_uri", &self.redirect_uri)
				.append_pair("response_type", "code")
				.append_pair("state", state);
			if !self.scopes.is_empty() {
				query.append_pair("scope", &self.scopes_string());
			}
			for (key, value) in extra {
				match value {
					Value::String(s) => query.append_pair(key, s),
					other => query.append_pair(key, &other.to_string()),
				};
			}
		}

		url.to_string()
	}
}

/// Generate an opaque CSRF state value for an authorization request.
#[instrument]
pub fn generate_state() -> String {
	let state = uuid::Uuid::new_v4().to_string();
	tracing::debug!("Generated OAuth state");
	state
}
