// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! In-memory session storage.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::MemorySession;

/// Opaque session identifier carried in the session cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
	pub fn generate() -> Self {
		Self(Uuid::new_v4())
	}
}

impl fmt::Display for SessionId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl FromStr for SessionId {
	type Err = uuid::Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Uuid::parse_str(s).map(Self)
	}
}

/// Default idle lifetime of a stored session, in seconds.
pub const DEFAULT_SESSION_MAX_AGE_SECS: u64 = 3600;

#[derive(Debug, Clone)]
struct StoredSession {
	session: MemorySession,
	touched_at: Instant,
}

/// Thread-safe in-memory session store.
///
/// A session expires once it has not been saved for `max_age`. Expired
/// entries are invisible to [`SessionStore::load`] and are dropped on the
/// next [`SessionStore::save`]; nothing sweeps them in the background.
#[derive(Debug, Clone)]
pub struct SessionStore {
	sessions: Arc<RwLock<HashMap<SessionId, StoredSession>>>,
	max_age: Duration,
}

impl Default for SessionStore {
	fn default() -> Self {
		Self::with_max_age(Duration::from_secs(DEFAULT_SESSION_MAX_AGE_SECS))
	}
}

impl SessionStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_max_age(max_age: Duration) -> Self {
		Self {
			sessions: Arc::new(RwLock::new(HashMap::new())),
			max_age,
		}
	}

	pub fn max_age(&self) -> Duration {
		self.max_age
	}

	/// Load a copy of the session for `id`, unless it has expired.
	#[instrument(level = "trace", skip(self))]
	pub async fn load(&self, id: &SessionId) -> Option<MemorySession> {
		let sessions = self.sessions.read().await;
		sessions
			.get(id)
			.filter(|stored| stored.touched_at.elapsed() < self.max_age)
			.map(|stored| stored.session.clone())
	}

	/// Store `session` under `id` and drop expired entries.
	///
	/// Empty sessions are removed instead of stored.
	#[instrument(level = "trace", skip(self, session))]
	pub async fn save(&self, id: SessionId, session: MemorySession) {
		let mut sessions = self.sessions.write().await;
		let removed = Self::evict_expired(&mut sessions, self.max_age);
		if session.is_empty() {
			sessions.remove(&id);
		} else {
			sessions.insert(
				id,
				StoredSession {
					session,
					touched_at: Instant::now(),
				},
			);
		}
		debug!(total_sessions = sessions.len(), expired = removed, "saved session");
	}

	fn evict_expired(sessions: &mut HashMap<SessionId, StoredSession>, max_age: Duration) -> usize {
		let before = sessions.len();
		sessions.retain(|_, stored| stored.touched_at.elapsed() < max_age);
		before - sessions.len()
	}

	pub async fn len(&self) -> usize {
		self.sessions.read().await.len()
	}

	pub async fn is_empty(&self) -> bool {
		self.sessions.read().await.is_empty()
	}
}
