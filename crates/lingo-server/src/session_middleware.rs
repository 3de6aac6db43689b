// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Cookie-backed session middleware.
//!
//! [`session_layer`] loads the session named by the session cookie (or starts
//! a fresh one), exposes it to handlers through [`RequestSession`], and writes
//! it back to the store once the handler has finished.

use std::sync::Arc;

use axum::{
	body::Body,
	extract::{FromRequestParts, State},
	http::{header::SET_COOKIE, request::Parts, HeaderValue, Request},
	middleware::Next,
	response::Response,
};
use lingo_server_session::{
	extract_session_cookie_with_name, session_cookie_header, MemorySession, SessionId,
};
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, instrument, warn};

use crate::{error::ServerError, state::AppState};

/// The current request's session.
#[derive(Debug, Clone)]
pub struct SessionHandle {
	id: SessionId,
	inner: Arc<Mutex<MemorySession>>,
}

impl SessionHandle {
	pub async fn lock(&self) -> MutexGuard<'_, MemorySession> {
		self.inner.lock().await
	}
}

/// Load the session for a request and persist it afterwards.
///
/// A `Set-Cookie` header is emitted only for a session created by this
/// request that still holds values; empty sessions are not stored.
#[instrument(
	name = "session_layer",
	skip(state, request, next),
	fields(session_new = tracing::field::Empty)
)]
pub async fn session_layer(
	State(state): State<AppState>,
	mut request: Request<Body>,
	next: Next,
) -> Response {
	let cookie_name = &state.config.session.cookie_name;

	let existing = match extract_session_cookie_with_name(request.headers(), cookie_name)
		.and_then(|value| value.parse::<SessionId>().ok())
	{
		Some(id) => state.sessions.load(&id).await.map(|session| (id, session)),
		None => None,
	};

	let is_new = existing.is_none();
	let (id, session) = existing.unwrap_or_else(|| (SessionId::generate(), MemorySession::new()));
	tracing::Span::current().record("session_new", is_new);

	let handle = SessionHandle {
		id,
		inner: Arc::new(Mutex::new(session)),
	};
	request.extensions_mut().insert(handle.clone());

	let mut response = next.run(request).await;

	let session = handle.inner.lock().await.clone();
	let persist = !session.is_empty();
	state.sessions.save(handle.id, session).await;

	if is_new && persist {
		match HeaderValue::from_str(&session_cookie_header(cookie_name, &handle.id)) {
			Ok(value) => {
				response.headers_mut().append(SET_COOKIE, value);
				debug!("issued new session cookie");
			}
			Err(e) => warn!(error = %e, "could not encode session cookie"),
		}
	}

	response
}

/// Extractor for the session installed by [`session_layer`].
pub struct RequestSession(pub SessionHandle);

impl<S> FromRequestParts<S> for RequestSession
where
	S: Send + Sync,
{
	type Rejection = ServerError;

	async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
		parts
			.extensions
			.get::<SessionHandle>()
			.cloned()
			.map(RequestSession)
			.ok_or_else(|| ServerError::Internal("session layer is not installed".to_string()))
	}
}
