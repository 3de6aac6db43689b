// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Lingo server binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use lingo_common_i18n::LocaleCatalog;
use lingo_server::{create_router, AppState};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Lingo server - locale-prefixed routing with OAuth locale carryover.
#[derive(Parser, Debug)]
#[command(name = "lingo-server", about = "Lingo locale routing server", version)]
struct Args {
	/// Config file to load instead of /etc/lingo/server.toml
	#[arg(long, env = "LINGO_SERVER_CONFIG")]
	config: Option<PathBuf>,

	#[command(subcommand)]
	command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Show version information
	Version,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	if let Some(Command::Version) = args.command {
		println!("lingo-server version: {}", env!("CARGO_PKG_VERSION"));
		return Ok(());
	}

	dotenvy::dotenv().ok();

	let config = match args.config {
		Some(path) => lingo_server_config::load_config_with_file(path)?,
		None => lingo_server_config::load_config()?,
	};

	tracing_subscriber::registry()
		.with(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| config.logging.level.clone().into()),
		)
		.with(tracing_subscriber::fmt::layer())
		.init();

	tracing::info!(
		host = %config.http.host,
		port = config.http.port,
		default_locale = %config.i18n.catalog.default_locale(),
		"starting lingo-server"
	);

	let addr = config.socket_addr();
	let state = AppState::new(config)?;
	let app = create_router(state).layer(TraceLayer::new_for_http());

	tracing::info!("listening on {}", addr);
	let listener = tokio::net::TcpListener::bind(&addr).await?;

	tokio::select! {
		result = axum::serve(listener, app) => {
			if let Err(e) = result {
				tracing::error!(error = %e, "Server error");
			}
		}
		_ = tokio::signal::ctrl_c() => {
			tracing::info!("Received shutdown signal");
		}
	}

	tracing::info!("Server shutdown complete");
	Ok(())
}
