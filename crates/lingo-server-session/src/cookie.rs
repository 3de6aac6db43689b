// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Session cookie parsing and formatting.

use http::header::COOKIE;
use http::HeaderMap;

use crate::store::SessionId;

/// Extract a cookie value by name from every `Cookie` header on the request.
pub fn extract_session_cookie_with_name(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
	headers
		.get_all(COOKIE)
		.iter()
		.filter_map(|value| value.to_str().ok())
		.flat_map(|value| value.split(';'))
		.find_map(|cookie| {
			let (name, value) = cookie.trim().split_once('=')?;
			(name == cookie_name).then(|| value.to_string())
		})
}

/// `Set-Cookie` value for a session id.
pub fn session_cookie_header(cookie_name: &str, id: &SessionId) -> String {
	format!("{cookie_name}={id}; Path=/; HttpOnly; SameSite=Lax")
}
