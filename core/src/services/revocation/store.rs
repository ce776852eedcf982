//! In-memory revocation store

use std::collections::HashMap;
use std::fmt;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Duration, Utc};
use sha2::{Digest, Sha256};
use tracing::debug;

/// Window a logged-out token stays blocked unless configured otherwise
pub const DEFAULT_REVOCATION_HORIZON_SECONDS: i64 = 3600;

/// Shared set of revoked tokens, each with the instant its block ends
///
/// Tokens are keyed by their SHA-256 digest. Lookups run under the read
/// lock; inserts and removals take the write lock.
pub struct RevocationStore {
    entries: RwLock<HashMap<String, DateTime<Utc>>>,
    horizon: Duration,
}

impl RevocationStore {
    /// Creates an empty store with the one-hour logout horizon
    pub fn new() -> Self {
        Self::with_horizon(Duration::seconds(DEFAULT_REVOCATION_HORIZON_SECONDS))
    }

    /// Creates an empty store whose `logout` blocks tokens for `horizon`
    pub fn with_horizon(horizon: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            horizon,
        }
    }

    pub fn horizon(&self) -> Duration {
        self.horizon
    }

    /// Blocks `token` until `until`, replacing any existing entry
    pub fn revoke(&self, token: &str, until: DateTime<Utc>) {
        let key = token_key(token);
        debug!(token_hash = &key[..12], %until, "Revoking token");
        self.write().insert(key, until);
    }

    /// Checks whether `token` is currently blocked
    pub fn is_revoked(&self, token: &str) -> bool {
        self.is_revoked_at(token, Utc::now())
    }

    /// Checks whether `token` is blocked at `now`
    ///
    /// An entry whose window has passed is removed and reported as not
    /// revoked. The block is still in force at exactly `until`.
    pub fn is_revoked_at(&self, token: &str, now: DateTime<Utc>) -> bool {
        let key = token_key(token);

        match self.read().get(&key) {
            None => return false,
            Some(until) if now <= *until => return true,
            Some(_) => {}
        }

        // Re-check under the write lock: a concurrent revoke may have extended the entry.
        let mut entries = self.write();
        let stale = match entries.get(&key) {
            None => return false,
            Some(until) => now > *until,
        };
        if !stale {
            return true;
        }

        entries.remove(&key);
        debug!(token_hash = &key[..12], "Pruned stale revocation entry");
        false
    }

    /// Revokes `token` for the configured horizon, returning when the block ends
    pub fn logout(&self, token: &str) -> DateTime<Utc> {
        self.logout_at(token, Utc::now())
    }

    /// Revokes `token` for the configured horizon starting at `now`
    pub fn logout_at(&self, token: &str, now: DateTime<Utc>) -> DateTime<Utc> {
        let until = now
            .checked_add_signed(self.horizon)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        self.revoke(token, until);
        until
    }

    /// Removes every entry whose window has passed
    ///
    /// # Returns
    ///
    /// Number of entries removed
    pub fn purge_expired(&self) -> usize {
        self.purge_expired_at(Utc::now())
    }

    /// Removes every entry whose window has passed at `now`
    pub fn purge_expired_at(&self, now: DateTime<Utc>) -> usize {
        let mut entries = self.write();
        let before = entries.len();
        entries.retain(|_, until| now <= *until);
        before - entries.len()
    }

    /// Number of entries, including stale ones not yet pruned
    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // The map is never left half-updated, so a poisoned lock is still usable.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, DateTime<Utc>>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, DateTime<Utc>>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for RevocationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RevocationStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RevocationStore")
            .field("entries", &self.len())
            .field("horizon", &self.horizon)
            .finish()
    }
}

/// Hex SHA-256 digest used as the map key
fn token_key(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}
