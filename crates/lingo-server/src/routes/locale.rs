// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Locale-prefixed routing and the language switcher.

use axum::{
	extract::{RawQuery, State},
	http::{header::REFERER, HeaderMap, Method, StatusCode, Uri},
	response::{IntoResponse, Response},
	Json,
};
use lingo_common_i18n::LocaleResolver;
use lingo_common_path::{safe_path, PathLocaleCodec};
use serde_json::Value;
use tracing::{debug, instrument};

use super::redirect;
use crate::{auth::OptionalAuth, error::ServerError, page::PageContext, state::AppState};

/// The `locale` and `redirect_to` query parameters.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LocaleQuery {
	pub locale: Option<String>,
	pub redirect_to: Option<String>,
}

impl LocaleQuery {
	/// Read both parameters from a raw query string.
	///
	/// The first occurrence of a key wins. Repeated keys and undecodable
	/// bytes never fail the request.
	pub fn parse(raw: Option<&str>) -> Self {
		let mut query = Self::default();
		for (key, value) in url::form_urlencoded::parse(raw.unwrap_or_default().as_bytes()) {
			let slot = match key.as_ref() {
				"locale" => &mut query.locale,
				"redirect_to" => &mut query.redirect_to,
				_ => continue,
			};
			if slot.is_none() {
				*slot = Some(value.into_owned());
			}
		}
		query
	}

	fn locale_param(&self) -> Option<Value> {
		self.locale.clone().map(Value::String)
	}
}

/// Fallback handler for every path outside the fixed routes.
///
/// A path whose first segment is a catalog locale gets its [`PageContext`];
/// any other path is permanently redirected to the same path under the
/// resolved locale, query string included.
#[instrument(skip_all, fields(path = %uri.path()))]
pub async fn locale_dispatch(
	State(state): State<AppState>,
	method: Method,
	RawQuery(raw_query): RawQuery,
	auth: OptionalAuth,
	headers: HeaderMap,
	uri: Uri,
) -> Result<Response, ServerError> {
	if method != Method::GET && method != Method::HEAD {
		return Err(ServerError::NotFound(uri.path().to_string()));
	}

	let catalog = state.catalog();
	let codec = PathLocaleCodec::new(catalog);
	let path = uri.path_and_query().map_or("/", |pq| pq.as_str());

	if let Some(locale) = codec.locale_of(path) {
		let context = PageContext::build(catalog, locale.as_str(), path);
		return Ok(Json(context).into_response());
	}

	let query = LocaleQuery::parse(raw_query.as_deref());
	let resolution = LocaleResolver::new(catalog).determine_locale(
		query.locale_param().as_ref(),
		&headers,
		auth.preference(),
	);
	let target = codec.add_locale_prefix(path, &resolution.locale);
	debug!(target = %target, source = %resolution.source, "redirecting to locale prefix");
	redirect(StatusCode::MOVED_PERMANENTLY, &target)
}

/// `GET /locale?locale=<code>&redirect_to=<path>`
///
/// Switches the current page to another locale. The page comes from
/// `redirect_to`, else the `Referer`, else `/`; a malformed path is replaced
/// by `/`.
#[instrument(skip_all)]
pub async fn switch_locale(
	State(state): State<AppState>,
	RawQuery(raw_query): RawQuery,
	auth: OptionalAuth,
	headers: HeaderMap,
) -> Result<Response, ServerError> {
	let catalog = state.catalog();
	let query = LocaleQuery::parse(raw_query.as_deref());

	let candidate = query
		.redirect_to
		.clone()
		.filter(|path| !path.trim().is_empty())
		.or_else(|| referer_path(&headers));
	let path = safe_path(candidate.as_deref(), "/");

	let resolution = LocaleResolver::new(catalog).determine_locale(
		query.locale_param().as_ref(),
		&headers,
		auth.preference(),
	);
	let target = PathLocaleCodec::new(catalog).current_path_with_locale(&path, &resolution.locale);
	debug!(target = %target, source = %resolution.source, "switching locale");
	redirect(StatusCode::SEE_OTHER, &target)
}

/// Path and query of the `Referer` header, if it has one.
fn referer_path(headers: &HeaderMap) -> Option<String> {
	let referer = headers.get(REFERER)?.to_str().ok()?;
	if referer.starts_with('/') {
		return Some(referer.to_string());
	}

	let url = url::Url::parse(referer).ok()?;
	let mut path = url.path().to_string();
	if let Some(query) = url.query() {
		path.push('?');
		path.push_str(query);
	}
	Some(path)
}

#[cfg(test)]
mod tests {
	use super::*;
	use axum::http::HeaderValue;

	fn with_referer(value: &'static str) -> HeaderMap {
		let mut headers = HeaderMap::new();
		headers.insert(REFERER, HeaderValue::from_static(value));
		headers
	}

	#[test]
	fn referer_keeps_path_and_query() {
		let headers = with_referer("https://lingo.example/ja/boards?page=2#top");
		assert_eq!(referer_path(&headers).as_deref(), Some("/ja/boards?page=2"));
	}

	#[test]
	fn referer_may_be_relative() {
		assert_eq!(referer_path(&with_referer("/ja/boards")).as_deref(), Some("/ja/boards"));
	}

	#[test]
	fn unusable_referer_is_ignored() {
		assert_eq!(referer_path(&HeaderMap::new()), None);
		assert_eq!(referer_path(&with_referer("not a url")), None);
	}

	mod locale_query {
		use super::*;

		#[test]
		fn first_occurrence_wins() {
			let query = LocaleQuery::parse(Some("locale=ja&locale=en&redirect_to=/a&redirect_to=/b"));
			assert_eq!(query.locale.as_deref(), Some("ja"));
			assert_eq!(query.redirect_to.as_deref(), Some("/a"));
		}

		#[test]
		fn decodes_values() {
			let query = LocaleQuery::parse(Some("redirect_to=%2Fja%2Fboards%3Fpage%3D2"));
			assert_eq!(query.redirect_to.as_deref(), Some("/ja/boards?page=2"));
		}

		#[test]
		fn missing_or_odd_query_has_no_candidates() {
			assert_eq!(LocaleQuery::parse(None), LocaleQuery::default());
			let query = LocaleQuery::parse(Some("&&=x&locale"));
			assert_eq!(query.locale.as_deref(), Some(""));
			assert_eq!(query.redirect_to, None);
			assert_eq!(LocaleQuery::parse(Some("%zz=%ff")), LocaleQuery::default());
		}
	}
}
