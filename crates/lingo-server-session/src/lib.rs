// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Request sessions for Lingo.
//!
//! This crate provides:
//! - [`Session`] - the string-keyed value map the locale engine reads and writes
//! - [`MemorySession`] - the concrete map handed to request handlers
//! - [`SessionStore`] - in-memory storage keyed by [`SessionId`]
//! - Helpers for reading and writing the session cookie
//!
//! A handler owns its session for the duration of one request; the store is
//! only touched when the session is loaded and when it is saved back.

mod cookie;
mod store;

pub use cookie::{extract_session_cookie_with_name, session_cookie_header};
pub use store::{SessionId, SessionStore, DEFAULT_SESSION_MAX_AGE_SECS};

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A string-keyed session as seen by the locale engine.
pub trait Session {
	fn get(&self, key: &str) -> Option<&Value>;

	fn insert(&mut self, key: &str, value: Value);

	fn remove(&mut self, key: &str) -> Option<Value>;

	fn contains_key(&self, key: &str) -> bool {
		self.get(key).is_some()
	}
}

/// Plain in-memory session values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemorySession {
	values: HashMap<String, Value>,
}

impl MemorySession {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	pub fn len(&self) -> usize {
		self.values.len()
	}
}

impl Session for MemorySession {
	fn get(&self, key: &str) -> Option<&Value> {
		self.values.get(key)
	}

	fn insert(&mut self, key: &str, value: Value) {
		self.values.insert(key.to_string(), value);
	}

	fn remove(&mut self, key: &str) -> Option<Value> {
		self.values.remove(key)
	}
}
