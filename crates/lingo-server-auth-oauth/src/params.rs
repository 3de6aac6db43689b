// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Locale parameters sent to, and returned from, an OAuth provider.

use chrono::{DateTime, Utc};
use lingo_common_i18n::{valid_locale, Locale, LocaleCatalog};
use lingo_server_session::Session;
use serde_json::{Map, Value};
use tracing::debug;

use crate::carrier::OAuthLocaleCarrier;

/// Session key under which the outbound provider parameters are kept until
/// the callback.
pub const PROVIDER_PARAMS_KEY: &str = "omniauth.params";

/// Outbound and preferred inbound locale parameter.
pub const LANG_PARAM: &str = "lang";

/// Inbound locale parameter consulted when `lang` is absent or invalid.
pub const LOCALE_PARAM: &str = "locale";

/// Build the locale parameters for an outbound OAuth request.
///
/// The locale is the valid `requested` value if any, else `active` if it is in
/// the catalog. A non-default locale is returned as `{"lang": code}` and also
/// stored in the session as an [`OAuthLocaleCarrier`]. The default locale, or
/// no usable locale at all, yields an empty map and leaves the session alone.
pub fn prepare_oauth_locale_params<C, S>(
	catalog: &C,
	requested: Option<&Value>,
	active: Option<&Locale>,
	session: &mut S,
	now: DateTime<Utc>,
) -> Map<String, Value>
where
	C: LocaleCatalog + ?Sized,
	S: Session + ?Sized,
{
	let mut params = Map::new();

	let current = requested
		.and_then(|value| valid_locale(catalog, value))
		.or_else(|| active.and_then(|locale| catalog.find(locale.as_str())).cloned());

	let Some(current) = current else {
		return params;
	};

	if &current == catalog.default_locale() {
		debug!(locale = %current, "default locale needs no OAuth carryover");
		return params;
	}

	params.insert(LANG_PARAM.to_string(), Value::String(current.to_string()));
	OAuthLocaleCarrier::new(current, now).store(session);
	params
}

/// Read a supported locale from provider parameters: `lang`, then `locale`.
///
/// Anything other than a JSON object yields `None`.
pub fn extract_provider_locale<C: LocaleCatalog + ?Sized>(
	catalog: &C,
	params: &Value,
) -> Option<Locale> {
	let params = params.as_object()?;
	[LANG_PARAM, LOCALE_PARAM]
		.into_iter()
		.find_map(|key| params.get(key).and_then(|value| valid_locale(catalog, value)))
}
