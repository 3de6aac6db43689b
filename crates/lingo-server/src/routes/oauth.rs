// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! OAuth initiation and callback.
//!
//! Only the locale handling of the OAuth flow lives here: the code exchange and
//! account linking belong to the provider integrations.

use axum::{
	extract::{Path, RawQuery, State},
	http::{HeaderMap, StatusCode},
	response::Response,
};
use chrono::Utc;
use lingo_common_i18n::LocaleResolver;
use lingo_server_auth_oauth::{
	generate_state, prepare_oauth_locale_params, OAuthLocaleResolver, PROVIDER_PARAMS_KEY,
};
use lingo_server_session::Session;
use serde_json::{Map, Value};
use tracing::{info, instrument};

use super::{locale::LocaleQuery, redirect};
use crate::{
	auth::OptionalAuth, error::ServerError, session_middleware::RequestSession, state::AppState,
};

/// `GET /auth/{provider}`
///
/// Carries the active locale through the provider round-trip, then redirects
/// to the provider's authorize endpoint.
///
/// The generated `state` is only forwarded to the provider. Checking it on
/// return is part of the token exchange, which this server does not perform.
#[instrument(skip_all, fields(provider = %provider))]
pub async fn start(
	State(state): State<AppState>,
	Path(provider): Path<String>,
	RawQuery(raw_query): RawQuery,
	auth: OptionalAuth,
	headers: HeaderMap,
	RequestSession(session): RequestSession,
) -> Result<Response, ServerError> {
	let endpoint = state
		.provider(&provider)
		.ok_or_else(|| ServerError::UnknownProvider(provider.clone()))?;
	let catalog = state.catalog();

	let requested = LocaleQuery::parse(raw_query.as_deref()).locale.map(Value::String);
	let active = LocaleResolver::new(catalog).determine_locale(
		requested.as_ref(),
		&headers,
		auth.preference(),
	);

	let mut session = session.lock().await;
	let params = prepare_oauth_locale_params(
		catalog,
		requested.as_ref(),
		Some(&active.locale),
		&mut *session,
		Utc::now(),
	);
	if !params.is_empty() {
		session.insert(PROVIDER_PARAMS_KEY, Value::Object(params.clone()));
	}

	let csrf_state = generate_state();
	let location = endpoint.authorization_url(&csrf_state, &params);
	info!(locale = %active.locale, carried = params.contains_key("lang"), "starting OAuth flow");
	redirect(StatusCode::FOUND, &location)
}

/// `GET /auth/{provider}/callback`
///
/// Resolves the post-login locale and redirects to its root.
#[instrument(skip_all, fields(provider = %provider))]
pub async fn callback(
	State(state): State<AppState>,
	Path(provider): Path<String>,
	RawQuery(raw_query): RawQuery,
	auth: OptionalAuth,
	headers: HeaderMap,
	RequestSession(session): RequestSession,
) -> Result<Response, ServerError> {
	if state.provider(&provider).is_none() {
		return Err(ServerError::UnknownProvider(provider));
	}

	let mut session = session.lock().await;
	let provider_params = session
		.remove(PROVIDER_PARAMS_KEY)
		.unwrap_or_else(|| callback_params(raw_query.as_deref()));

	let resolution = OAuthLocaleResolver::new(state.catalog())
		.with_ttl_secs(state.locale_ttl_secs())
		.determine_oauth_locale(Some(&provider_params), &mut *session, auth.preference(), &headers);

	redirect(StatusCode::FOUND, &format!("/{}", resolution.locale))
}

/// Callback query parameters as a JSON object. The first occurrence of a key
/// wins.
fn callback_params(raw: Option<&str>) -> Value {
	let mut params = Map::new();
	for (key, value) in url::form_urlencoded::parse(raw.unwrap_or_default().as_bytes()) {
		params
			.entry(key.into_owned())
			.or_insert_with(|| Value::String(value.into_owned()));
	}
	Value::Object(params)
}
