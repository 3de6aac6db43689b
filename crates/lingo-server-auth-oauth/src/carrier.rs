// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Session-carried locale for the duration of one OAuth round-trip.
//!
//! # Properties
//!
//! - **Single-use**: restoring always deletes the carrier, valid or not
//! - **Time-limited**: a carrier aged [`OAUTH_LOCALE_TTL_SECS`] or more is
//!   treated as absent
//! - **Lazy expiry**: stale carriers are dropped when read; nothing sweeps them
//!
//! Two callbacks racing on one session may both observe the carrier. That is
//! accepted: one browser has at most one OAuth redirect in flight.

use chrono::{DateTime, Utc};
use lingo_common_i18n::{valid_locale, Locale, LocaleCatalog};
use lingo_server_session::Session;
use serde_json::Value;
use tracing::debug;

/// Session key holding the carried locale code.
pub const OAUTH_LOCALE_KEY: &str = "oauth_locale";

/// Session key holding the carrier's creation time in epoch seconds.
pub const OAUTH_LOCALE_TIMESTAMP_KEY: &str = "oauth_locale_timestamp";

/// Carrier lifetime in seconds (10 minutes).
pub const OAUTH_LOCALE_TTL_SECS: i64 = 600;

/// A locale written to the session when an OAuth flow begins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthLocaleCarrier {
	pub locale: Locale,
	pub timestamp: i64,
}

impl OAuthLocaleCarrier {
	pub fn new(locale: Locale, now: DateTime<Utc>) -> Self {
		Self {
			locale,
			timestamp: now.timestamp(),
		}
	}

	/// Write both carrier keys, replacing any earlier carrier.
	pub fn store<S: Session + ?Sized>(&self, session: &mut S) {
		session.insert(OAUTH_LOCALE_KEY, Value::String(self.locale.to_string()));
		session.insert(OAUTH_LOCALE_TIMESTAMP_KEY, Value::from(self.timestamp));
		debug!(locale = %self.locale, "stored OAuth locale carrier");
	}
}

/// Consume the session carrier and return its locale if still usable.
///
/// - No timestamp: returns `None` and leaves the session untouched.
/// - Otherwise both keys are deleted, then the locale is returned only if the
///   carrier is younger than `ttl_secs` and names a catalog locale.
pub fn restore_oauth_locale_from_session<C, S>(
	catalog: &C,
	session: &mut S,
	now: DateTime<Utc>,
	ttl_secs: i64,
) -> Option<Locale>
where
	C: LocaleCatalog + ?Sized,
	S: Session + ?Sized,
{
	let timestamp = session.get(OAUTH_LOCALE_TIMESTAMP_KEY)?.as_i64();
	let locale = session.remove(OAUTH_LOCALE_KEY);
	session.remove(OAUTH_LOCALE_TIMESTAMP_KEY);

	let Some(timestamp) = timestamp else {
		debug!("discarding OAuth locale carrier with malformed timestamp");
		return None;
	};

	let age = now.timestamp() - timestamp;
	if age >= ttl_secs {
		debug!(age_secs = age, ttl_secs, "OAuth locale carrier expired");
		return None;
	}

	let restored = locale.and_then(|value| valid_locale(catalog, &value));
	match &restored {
		Some(locale) => debug!(locale = %locale, age_secs = age, "restored OAuth locale carrier"),
		None => debug!("OAuth locale carrier held no supported locale"),
	}
	restored
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::Duration;
	use lingo_common_i18n::StaticCatalog;
	use lingo_server_session::MemorySession;
	use proptest::prelude::*;
	use serde_json::json;

	fn catalog() -> StaticCatalog {
		StaticCatalog::new(["en", "ja"], "en").unwrap()
	}

	fn t0() -> DateTime<Utc> {
		DateTime::from_timestamp(1_700_000_000, 0).unwrap()
	}

	fn session_with_carrier(locale: &str, at: DateTime<Utc>) -> MemorySession {
		let mut session = MemorySession::new();
		OAuthLocaleCarrier::new(Locale::new(locale), at).store(&mut session);
		session
	}

	#[test]
	fn store_writes_both_keys() {
		let session = session_with_carrier("ja", t0());
		assert_eq!(session.get(OAUTH_LOCALE_KEY), Some(&json!("ja")));
		assert_eq!(session.get(OAUTH_LOCALE_TIMESTAMP_KEY), Some(&json!(1_700_000_000)));
	}

	#[test]
	fn returned_just_before_ttl() {
		let mut session = session_with_carrier("ja", t0());
		let now = t0() + Duration::seconds(599);
		let restored = restore_oauth_locale_from_session(&catalog(), &mut session, now, OAUTH_LOCALE_TTL_SECS);
		assert_eq!(restored, Some(Locale::new("ja")));
		assert!(session.is_empty());
	}

	#[test]
	fn expired_at_ttl_and_deleted() {
		let mut session = session_with_carrier("ja", t0());
		let now = t0() + Duration::seconds(600);
		let restored = restore_oauth_locale_from_session(&catalog(), &mut session, now, OAUTH_LOCALE_TTL_SECS);
		assert_eq!(restored, None);
		assert!(session.is_empty());
	}

	#[test]
	fn second_restore_returns_nothing() {
		let mut session = session_with_carrier("ja", t0());
		let now = t0() + Duration::seconds(5);
		let c = catalog();
		assert!(restore_oauth_locale_from_session(&c, &mut session, now, OAUTH_LOCALE_TTL_SECS).is_some());
		assert!(restore_oauth_locale_from_session(&c, &mut session, now, OAUTH_LOCALE_TTL_SECS).is_none());
	}

	#[test]
	fn unsupported_locale_is_consumed_but_not_returned() {
		let mut session = session_with_carrier("fr", t0());
		let restored = restore_oauth_locale_from_session(&catalog(), &mut session, t0(), OAUTH_LOCALE_TTL_SECS);
		assert_eq!(restored, None);
		assert!(session.is_empty());
	}

	#[test]
	fn non_string_locale_is_rejected() {
		let mut session = MemorySession::new();
		session.insert(OAUTH_LOCALE_KEY, json!(["ja"]));
		session.insert(OAUTH_LOCALE_TIMESTAMP_KEY, json!(t0().timestamp()));
		let restored = restore_oauth_locale_from_session(&catalog(), &mut session, t0(), OAUTH_LOCALE_TTL_SECS);
		assert_eq!(restored, None);
		assert!(session.is_empty());
	}

	#[test]
	fn missing_timestamp_leaves_session_untouched() {
		let mut session = MemorySession::new();
		session.insert(OAUTH_LOCALE_KEY, json!("ja"));
		let restored = restore_oauth_locale_from_session(&catalog(), &mut session, t0(), OAUTH_LOCALE_TTL_SECS);
		assert_eq!(restored, None);
		assert_eq!(session.get(OAUTH_LOCALE_KEY), Some(&json!("ja")));
	}

	#[test]
	fn malformed_timestamp_is_consumed_as_absent() {
		let mut session = MemorySession::new();
		session.insert(OAUTH_LOCALE_KEY, json!("ja"));
		session.insert(OAUTH_LOCALE_TIMESTAMP_KEY, json!("yesterday"));
		let restored = restore_oauth_locale_from_session(&catalog(), &mut session, t0(), OAUTH_LOCALE_TTL_SECS);
		assert_eq!(restored, None);
		assert!(session.is_empty());
	}

	#[test]
	fn missing_locale_with_timestamp_is_consumed() {
		let mut session = MemorySession::new();
		session.insert(OAUTH_LOCALE_TIMESTAMP_KEY, json!(t0().timestamp()));
		let restored = restore_oauth_locale_from_session(&catalog(), &mut session, t0(), OAUTH_LOCALE_TTL_SECS);
		assert_eq!(restored, None);
		assert!(session.is_empty());
	}

	#[test]
	fn custom_ttl_is_honoured() {
		let mut session = session_with_carrier("ja", t0());
		let now = t0() + Duration::seconds(30);
		assert_eq!(restore_oauth_locale_from_session(&catalog(), &mut session, now, 30), None);
	}

	proptest! {
		/// Whatever the age, the carrier is gone after one restore.
		#[test]
		fn restore_always_consumes(age in -100i64..2000) {
			let mut session = session_with_carrier("ja", t0());
			let now = t0() + Duration::seconds(age);
			let restored = restore_oauth_locale_from_session(&catalog(), &mut session, now, OAUTH_LOCALE_TTL_SECS);
			prop_assert_eq!(restored.is_some(), age < OAUTH_LOCALE_TTL_SECS);
			prop_assert!(session.is_empty());
		}
	}
}
