//! Time-boxed cache of locations a platform has already confirmed.
//!
//! Entries are stored as one JSON array per platform under
//! [`Platform::validated_locations_key`], in the same
//! `{location, timestamp, sessionToken?}` form the web front end used.
//! Expiry is lazy: stale entries are hidden on every read and pruned only
//! when a new entry is written.

use basky_core::Platform;
use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::store::{SessionError, SessionStore};

/// How long a validation stays good: five minutes.
pub const VALIDITY_WINDOW_MS: i64 = 300_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    #[serde(rename = "location")]
    pub location_key: String,
    #[serde(rename = "timestamp")]
    pub timestamp_ms: i64,
    #[serde(
        rename = "sessionToken",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub session_token: Option<String>,
}

impl CacheEntry {
    /// `true` while `now - timestamp < VALIDITY_WINDOW_MS`.
    #[must_use]
    pub fn is_fresh(&self, now_ms: i64) -> bool {
        now_ms.saturating_sub(self.timestamp_ms) < VALIDITY_WINDOW_MS
    }
}

/// Validated-location cache for one platform over a [`SessionStore`].
#[derive(Debug)]
pub struct ValidatedLocationCache<S, C> {
    platform: Platform,
    store: S,
    clock: C,
}

impl<S: SessionStore, C: Clock> ValidatedLocationCache<S, C> {
    pub fn new(platform: Platform, store: S, clock: C) -> Self {
        Self {
            platform,
            store,
            clock,
        }
    }

    #[must_use]
    pub fn platform(&self) -> Platform {
        self.platform
    }

    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    fn key(&self) -> &'static str {
        self.platform.validated_locations_key()
    }

    /// Every stored entry, stale ones included. Unreadable storage reads as
    /// empty.
    fn read_all(&self) -> Vec<CacheEntry> {
        let raw = match self.store.get(self.key()) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!(platform = %self.platform, error = %e, "session store unreadable; treating cache as empty");
                return Vec::new();
            }
        };
        match serde_json::from_str::<Vec<CacheEntry>>(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(platform = %self.platform, error = %e, "validated-location cache is corrupt; ignoring it");
                Vec::new()
            }
        }
    }

    /// Fresh entries, oldest first.
    #[must_use]
    pub fn entries(&self) -> Vec<CacheEntry> {
        let now = self.clock.now_ms();
        self.read_all()
            .into_iter()
            .filter(|entry| entry.is_fresh(now))
            .collect()
    }

    /// The fresh entry for `location_key`, if any. When a key was recorded
    /// more than once the latest wins.
    #[must_use]
    pub fn lookup(&self, location_key: &str) -> Option<CacheEntry> {
        self.entries()
            .into_iter()
            .rev()
            .find(|entry| entry.location_key == location_key)
    }

    #[must_use]
    pub fn is_valid(&self, location_key: &str) -> bool {
        self.lookup(location_key).is_some()
    }

    /// Records a validation at the current time.
    ///
    /// Stale entries and any previous entry for the same key are dropped
    /// before the new one is appended.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if the entry cannot be encoded or written.
    pub fn record(
        &mut self,
        location_key: &str,
        session_token: Option<String>,
    ) -> Result<CacheEntry, SessionError> {
        let now = self.clock.now_ms();
        let mut entries: Vec<CacheEntry> = self
            .read_all()
            .into_iter()
            .filter(|entry| entry.is_fresh(now) && entry.location_key != location_key)
            .collect();

        let entry = CacheEntry {
            location_key: location_key.to_owned(),
            timestamp_ms: now,
            session_token: session_token.filter(|t| !t.trim().is_empty()),
        };
        entries.push(entry.clone());

        let encoded = serde_json::to_string(&entries).map_err(|e| SessionError::Encode {
            context: self.key().to_owned(),
            source: e,
        })?;
        self.store.set(self.key(), &encoded)?;

        tracing::debug!(
            platform = %self.platform,
            location = location_key,
            cached = entries.len(),
            "recorded validated location"
        );
        Ok(entry)
    }

    /// Forgets every validation for this platform.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if the store cannot be written.
    pub fn clear(&mut self) -> Result<(), SessionError> {
        self.store.remove(self.key())
    }
}
