// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! HTTP route handlers.

pub mod locale;
pub mod oauth;

use axum::{
	http::{header::LOCATION, HeaderValue, StatusCode},
	response::{IntoResponse, Response},
};

use crate::error::ServerError;

/// A redirect with an explicit status, since axum's `Redirect` has no 301/302.
pub(crate) fn redirect(status: StatusCode, location: &str) -> Result<Response, ServerError> {
	let location = HeaderValue::from_str(location)
		.map_err(|e| ServerError::Internal(format!("invalid redirect location: {e}")))?;
	Ok((status, [(LOCATION, location)]).into_response())
}
