// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Server error types and HTTP response conversions.

use axum::{
	http::StatusCode,
	response::{IntoResponse, Response},
	Json,
};
use lingo_server_auth_oauth::OAuthError;
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
	/// No route or resource matched.
	#[error("Not found: {0}")]
	NotFound(String),

	/// The OAuth provider named in the path is not configured.
	#[error("Unknown OAuth provider: {0}")]
	UnknownProvider(String),

	/// A configured OAuth provider could not be turned into an endpoint.
	#[error("OAuth configuration error: {0}")]
	OAuthConfig(#[from] OAuthError),

	/// Internal server error.
	#[error("Internal error: {0}")]
	Internal(String),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
	pub error: String,
	pub message: String,
}

impl IntoResponse for ServerError {
	fn into_response(self) -> Response {
		let (status, error) = match &self {
			ServerError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
			ServerError::UnknownProvider(_) => (StatusCode::NOT_FOUND, "unknown_provider"),
			ServerError::OAuthConfig(e) => {
				tracing::error!(error = %e, "OAuth configuration error");
				(StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
			}
			ServerError::Internal(e) => {
				tracing::error!(error = %e, "internal error");
				(StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
			}
		};

		let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
			"An internal error occurred".to_string()
		} else {
			self.to_string()
		};

		(
			status,
			Json(ErrorResponse {
				error: error.to_string(),
				message,
			}),
		)
			.into_response()
	}
}
