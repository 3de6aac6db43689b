// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Centralized configuration management for Lingo server.
//!
//! This crate provides:
//! - Layered configuration from multiple sources (defaults, TOML file, environment)
//! - Type-safe configuration with validation, including the locale catalog
//! - Consistent environment variable naming (`LINGO_SERVER_*`)
//!
//! Configuration is loaded once at startup and passed around explicitly.
//!
//! # Usage
//!
//! ```ignore
//! use lingo_server_config::load_config;
//!
//! let config = load_config()?;
//! println!("Server listening on {}", config.socket_addr());
//! ```

pub mod error;
pub mod layer;
pub mod sections;
pub mod sources;

pub use error::ConfigError;
pub use layer::ServerConfigLayer;
pub use sections::*;
pub use sources::{ConfigSource, DefaultsSource, EnvSource, Precedence, TomlSource};

use lingo_common_i18n::LocaleCatalog;
use tracing::{debug, info};

/// Fully resolved server configuration.
#[derive(Debug, Clone, Default)]
pub struct ServerConfig {
	pub http: HttpConfig,
	pub i18n: I18nConfig,
	pub oauth: OAuthConfig,
	pub session: SessionConfig,
	pub logging: LoggingConfig,
}

impl ServerConfig {
	/// Get the socket address string for binding.
	pub fn socket_addr(&self) -> String {
		format!("{}:{}", self.http.host, self.http.port)
	}
}

/// Load configuration from all sources with standard precedence.
///
/// Precedence (highest to lowest):
/// 1. Environment variables (`LINGO_SERVER_*`)
/// 2. Config file (`/etc/lingo/server.toml`)
/// 3. Built-in defaults
pub fn load_config() -> Result<ServerConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::system()),
		Box::new(EnvSource),
	])
}

/// Load configuration with a custom config file path.
pub fn load_config_with_file(
	config_path: impl Into<std::path::PathBuf>,
) -> Result<ServerConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::new(config_path)),
		Box::new(EnvSource),
	])
}

/// Merge `sources` in precedence order and finalize the result.
pub fn load_from_sources(
	mut sources: Vec<Box<dyn ConfigSource>>,
) -> Result<ServerConfig, ConfigError> {
	sources.sort_by_key(|s| s.precedence());

	let mut merged = ServerConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		let layer = source.load()?;
		merged.merge(layer);
	}

	finalize(merged)
}

/// Finalize configuration layer into resolved config.
fn finalize(layer: ServerConfigLayer) -> Result<ServerConfig, ConfigError> {
	let http = layer.http.unwrap_or_default().finalize();
	let i18n = layer.i18n.unwrap_or_default().finalize()?;
	let oauth = layer.oauth.unwrap_or_default().finalize()?;
	let session = layer.session.unwrap_or_default().finalize()?;
	let logging = layer.logging.unwrap_or_default().finalize();

	validate_config(&http)?;

	info!(
		host = %http.host,
		port = http.port,
		locales = i18n.catalog.available_locales().len(),
		default_locale = %i18n.catalog.default_locale(),
		oauth_providers = oauth.providers.len(),
		locale_ttl_secs = oauth.locale_ttl_secs,
		"Server configuration loaded"
	);

	Ok(ServerConfig {
		http,
		i18n,
		oauth,
		session,
		logging,
	})
}

/// Validate cross-field configuration rules.
fn validate_config(http: &HttpConfig) -> Result<(), ConfigError> {
	let base_url = url::Url::parse(&http.base_url).map_err(|e| {
		ConfigError::Validation(format!("http.base_url '{}' is not absolute: {e}", http.base_url))
	})?;
	if !matches!(base_url.scheme(), "http" | "https") {
		return Err(ConfigError::Validation(format!(
			"http.base_url must use http or https, got '{}'",
			base_url.scheme()
		)));
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::sources::test_env::EnvGuard;
	use std::io::Write;

	struct LayerSource(Precedence, fn() -> ServerConfigLayer);

	impl ConfigSource for LayerSource {
		fn name(&self) -> &'static str {
			"test"
		}

		fn precedence(&self) -> Precedence {
			self.0
		}

		fn load(&self) -> Result<ServerConfigLayer, ConfigError> {
			Ok((self.1)())
		}
	}

	fn port_layer(port: u16) -> ServerConfigLayer {
		ServerConfigLayer {
			http: Some(HttpConfigLayer {
				port: Some(port),
				..Default::default()
			}),
			..Default::default()
		}
	}

	#[test]
	fn test_socket_addr() {
		let config = ServerConfig {
			http: HttpConfig {
				host: "127.0.0.1".to_string(),
				port: 9000,
				base_url: "http://localhost:9000".to_string(),
			},
			..Default::default()
		};
		assert_eq!(config.socket_addr(), "127.0.0.1:9000");
	}

	#[test]
	fn test_sources_applied_in_precedence_order() {
		let config = load_from_sources(vec![
			Box::new(LayerSource(Precedence::Environment, || port_layer(7000))),
			Box::new(LayerSource(Precedence::ConfigFile, || port_layer(8000))),
			Box::new(DefaultsSource),
		])
		.unwrap();
		assert_eq!(config.http.port, 7000);
	}

	#[test]
	fn test_invalid_base_url_rejected() {
		let http = HttpConfigLayer {
			base_url: Some("lingo.example".to_string()),
			..Default::default()
		}
		.finalize();
		assert!(matches!(validate_config(&http), Err(ConfigError::Validation(_))));
	}

	#[test]
	fn test_env_overrides_file() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(
			file,
			r#"
[i18n]
available_locales = ["en", "ja"]
default_locale = "en"

[session]
cookie_name = "from_file"
"#
		)
		.unwrap();

		let _env = EnvGuard::set(&[("LINGO_SERVER_DEFAULT_LOCALE", "ja")]);
		let config = load_config_with_file(file.path()).unwrap();
		assert_eq!(config.i18n.catalog.default_locale().as_str(), "ja");
		assert_eq!(config.session.cookie_name, "from_file");
	}

	#[test]
	fn test_invalid_locale_config_fails_load() {
		let _env = EnvGuard::set(&[
			("LINGO_SERVER_LOCALES", "en,ja"),
			("LINGO_SERVER_DEFAULT_LOCALE", "fr"),
		]);
		let err = load_config_with_file("/nonexistent/lingo.toml").unwrap_err();
		assert!(matches!(err, ConfigError::Validation(_)));
	}
}
