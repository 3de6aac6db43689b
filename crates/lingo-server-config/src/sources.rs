// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sources: environment variables and TOML files.

use std::collections::BTreeMap;
use std::path::PathBuf;

use tracing::{debug, trace};

use crate::error::ConfigError;
use crate::layer::ServerConfigLayer;
use crate::sections::{
	HttpConfigLayer, I18nConfigLayer, LoggingConfigLayer, OAuthConfigLayer,
	OAuthProviderConfigLayer, SessionConfigLayer,
};

/// Providers that can be configured through environment variables.
const ENV_PROVIDERS: &[&str] = &["github", "google"];

/// Source precedence levels (higher = overrides lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	ConfigFile = 20,
	Environment = 50,
}

/// Trait for configuration sources.
pub trait ConfigSource: Send + Sync {
	fn name(&self) -> &'static str;
	fn precedence(&self) -> Precedence;
	fn load(&self) -> Result<ServerConfigLayer, ConfigError>;
}

/// Built-in defaults source.
pub struct DefaultsSource;

impl ConfigSource for DefaultsSource {
	fn name(&self) -> &'static str {
		"defaults"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Defaults
	}

	fn load(&self) -> Result<ServerConfigLayer, ConfigError> {
		debug!("loading defaults");
		Ok(ServerConfigLayer::default())
	}
}

/// TOML file configuration source.
pub struct TomlSource {
	path: PathBuf,
}

impl TomlSource {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	pub fn system() -> Self {
		Self::new("/etc/lingo/server.toml")
	}
}

impl ConfigSource for TomlSource {
	fn name(&self) -> &'static str {
		"toml-config"
	}

	fn precedence(&self) -> Precedence {
		Precedence::ConfigFile
	}

	fn load(&self) -> Result<ServerConfigLayer, ConfigError> {
		if !self.path.exists() {
			debug!(path = %self.path.display(), "config file not found, skipping");
			return Ok(ServerConfigLayer::default());
		}

		debug!(path = %self.path.display(), "loading config file");
		let content = std::fs::read_to_string(&self.path).map_err(|e| ConfigError::FileRead {
			path: self.path.clone(),
			source: e,
		})?;

		let layer: ServerConfigLayer =
			toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
				path: self.path.clone(),
				source: e,
			})?;

		trace!("parsed config layer from TOML");
		Ok(layer)
	}
}

/// Environment variable source.
///
/// Convention: LINGO_SERVER_<SECTION>_<FIELD>
pub struct EnvSource;

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<ServerConfigLayer, ConfigError> {
		debug!("loading environment variables");
		Ok(ServerConfigLayer {
			http: Some(load_http_from_env()?),
			i18n: Some(load_i18n_from_env()),
			oauth: Some(load_oauth_from_env()?),
			session: Some(load_session_from_env()?),
			logging: Some(load_logging_from_env()),
		})
	}
}

fn env_var(name: &str) -> Option<String> {
	std::env::var(name).ok().filter(|s| !s.is_empty())
}

fn env_list(name: &str) -> Option<Vec<String>> {
	env_var(name).map(|s| {
		s.split(',')
			.map(|s| s.trim().to_string())
			.filter(|s| !s.is_empty())
			.collect()
	})
}

fn env_u16(name: &str) -> Result<Option<u16>, ConfigError> {
	match env_var(name) {
		Some(v) => v.parse().map(Some).map_err(|_| ConfigError::InvalidValue {
			key: name.to_string(),
			message: format!("invalid u16 value '{v}'"),
		}),
		None => Ok(None),
	}
}

fn env_u64(name: &str) -> Result<Option<u64>, ConfigError> {
	match env_var(name) {
		Some(v) => v.parse().map(Some).map_err(|_| ConfigError::InvalidValue {
			key: name.to_string(),
			message: format!("invalid u64 value '{v}'"),
		}),
		None => Ok(None),
	}
}

fn load_http_from_env() -> Result<HttpConfigLayer, ConfigError> {
	Ok(HttpConfigLayer {
		host: env_var("LINGO_SERVER_HOST"),
		port: env_u16("LINGO_SERVER_PORT")?,
		base_url: env_var("LINGO_SERVER_BASE_URL"),
	})
}

fn load_i18n_from_env() -> I18nConfigLayer {
	I18nConfigLayer {
		available_locales: env_list("LINGO_SERVER_LOCALES"),
		default_locale: env_var("LINGO_SERVER_DEFAULT_LOCALE"),
		display_names: None,
	}
}

fn load_oauth_from_env() -> Result<OAuthConfigLayer, ConfigError> {
	let mut providers = BTreeMap::new();
	for name in ENV_PROVIDERS {
		let prefix = format!("LINGO_SERVER_{}", name.to_uppercase());
		let layer = OAuthProviderConfigLayer {
			authorize_url: env_var(&format!("{prefix}_AUTHORIZE_URL")),
			client_id: env_var(&format!("{prefix}_CLIENT_ID")),
			redirect_uri: env_var(&format!("{prefix}_REDIRECT_URI")),
			scopes: env_list(&format!("{prefix}_SCOPES")),
		};
		let is_set = layer.authorize_url.is_some()
			|| layer.client_id.is_some()
			|| layer.redirect_uri.is_some()
			|| layer.scopes.is_some();
		if is_set {
			providers.insert(name.to_string(), layer);
		}
	}

	Ok(OAuthConfigLayer {
		locale_ttl_secs: env_u64("LINGO_SERVER_OAUTH_LOCALE_TTL_SECS")?,
		providers: (!providers.is_empty()).then_some(providers),
	})
}

fn load_session_from_env() -> Result<SessionConfigLayer, ConfigError> {
	Ok(SessionConfigLayer {
		cookie_name: env_var("LINGO_SERVER_SESSION_COOKIE_NAME"),
		max_age_secs: env_u64("LINGO_SERVER_SESSION_MAX_AGE_SECS")?,
	})
}

fn load_logging_from_env() -> LoggingConfigLayer {
	LoggingConfigLayer {
		level: env_var("LINGO_SERVER_LOG_LEVEL"),
	}
}
