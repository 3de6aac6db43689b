// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authenticated-user context.
//!
//! Authentication itself happens upstream. Whatever authenticates the request
//! inserts a [`CurrentUser`] into the request extensions; handlers read it
//! through [`OptionalAuth`] and feed its locale preference to the resolvers.

use axum::{extract::FromRequestParts, http::request::Parts};
use lingo_common_i18n::LocalePreference;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
	pub id: Uuid,
	pub display_name: String,
	/// Saved interface language, if the user picked one.
	pub locale: Option<String>,
}

impl CurrentUser {
	pub fn new(display_name: impl Into<String>, locale: Option<String>) -> Self {
		Self {
			id: Uuid::new_v4(),
			display_name: display_name.into(),
			locale,
		}
	}
}

impl LocalePreference for CurrentUser {
	fn preferred_locale(&self) -> Option<&str> {
		self.locale.as_deref()
	}
}

/// Extractor for optional authentication. Always succeeds.
pub struct OptionalAuth(pub Option<CurrentUser>);

impl OptionalAuth {
	pub fn preference(&self) -> Option<&dyn LocalePreference> {
		self.0.as_ref().map(|user| user as &dyn LocalePreference)
	}
}

impl<S> FromRequestParts<S> for OptionalAuth
where
	S: Send + Sync,
{
	type Rejection = std::convert::Infallible;

	#[instrument(name = "OptionalAuth::from_request_parts", skip_all)]
	async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
		let user = parts.extensions.get::<CurrentUser>().cloned();

		if let Some(ref user) = user {
			tracing::debug!(user_id = %user.id, "Optional auth: authenticated");
		} else {
			tracing::debug!("Optional auth: unauthenticated");
		}

		Ok(OptionalAuth(user))
	}
}
