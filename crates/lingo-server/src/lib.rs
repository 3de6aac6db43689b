// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! HTTP boundary for Lingo.
//!
//! # Routes
//!
//! | Route | Behaviour |
//! |---|---|
//! | `GET /locale` | switch the current page to another locale (303) |
//! | `GET /auth/{provider}` | start an OAuth flow, carrying the locale (302) |
//! | `GET /auth/{provider}/callback` | resolve the post-login locale (302) |
//! | anything else | page context under a locale prefix, or 301 to one |

pub mod auth;
pub mod error;
pub mod page;
pub mod routes;
pub mod session_middleware;
pub mod state;

pub use auth::{CurrentUser, OptionalAuth};
pub use error::{ErrorResponse, ServerError};
pub use page::{Alternate, PageContext};
pub use state::AppState;

use axum::{middleware::from_fn_with_state, routing::get, Router};

/// Build the application router with sessions installed.
pub fn create_router(state: AppState) -> Router {
	Router::new()
		.route("/locale", get(routes::locale::switch_locale))
		.route("/auth/{provider}", get(routes::oauth::start))
		.route("/auth/{provider}/callback", get(routes::oauth::callback))
		.fallback(routes::locale::locale_dispatch)
		.layer(from_fn_with_state(
			state.clone(),
			session_middleware::session_layer,
		))
		.with_state(state)
}
