//! Unit tests for the revocation store

use std::sync::Arc;
use std::thread;

use chrono::{Duration, TimeZone, Utc};

use crate::services::revocation::{RevocationStore, DEFAULT_REVOCATION_HORIZON_SECONDS};

#[test]
fn test_unknown_token_is_not_revoked() {
    let store = RevocationStore::new();

    assert!(!store.is_revoked("never-seen"));
    assert!(store.is_empty());
}

#[test]
fn test_revoked_until_window_elapses() {
    let store = RevocationStore::new();
    let now = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
    let until = now + Duration::hours(1);

    store.revoke("tok", until);

    assert!(store.is_revoked_at("tok", now));
    assert!(store.is_revoked_at("tok", until));
    assert_eq!(store.len(), 1);

    assert!(!store.is_revoked_at("tok", until + Duration::seconds(1)));
    assert_eq!(store.len(), 0);
}

#[test]
fn test_lookup_before_expiry_keeps_entry() {
    let store = RevocationStore::new();
    let now = Utc::now();
    store.revoke("tok", now + Duration::minutes(5));

    assert!(store.is_revoked_at("tok", now));
    assert!(store.is_revoked_at("tok", now));
    assert_eq!(store.len(), 1);
}

#[test]
fn test_revoke_overwrites_existing_entry() {
    let store = RevocationStore::new();
    let now = Utc::now();

    store.revoke("tok", now + Duration::hours(2));
    store.revoke("tok", now + Duration::minutes(1));

    assert_eq!(store.len(), 1);
    assert!(!store.is_revoked_at("tok", now + Duration::minutes(2)));
}

#[test]
fn test_logout_uses_fixed_horizon() {
    let store = RevocationStore::new();
    let now = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();

    let until = store.logout_at("tok", now);

    assert_eq!(until, now + Duration::seconds(DEFAULT_REVOCATION_HORIZON_SECONDS));
    assert!(store.is_revoked_at("tok", now + Duration::minutes(59)));
    assert!(!store.is_revoked_at("tok", now + Duration::minutes(61)));
}

#[test]
fn test_logout_with_custom_horizon() {
    let store = RevocationStore::with_horizon(Duration::days(30));
    let now = Utc::now();

    store.logout_at("tok", now);

    assert_eq!(store.horizon(), Duration::days(30));
    assert!(store.is_revoked_at("tok", now + Duration::days(29)));
}

#[test]
fn test_logout_is_revoked_now() {
    let store = RevocationStore::new();

    store.logout("tok");

    assert!(store.is_revoked("tok"));
    assert!(!store.is_revoked("other"));
}

#[test]
fn test_purge_expired_removes_only_stale_entries() {
    let store = RevocationStore::new();
    let now = Utc::now();

    store.revoke("stale-1", now - Duration::seconds(10));
    store.revoke("stale-2", now - Duration::hours(1));
    store.revoke("live", now + Duration::hours(1));

    assert_eq!(store.purge_expired_at(now), 2);
    assert_eq!(store.len(), 1);
    assert!(store.is_revoked_at("live", now));
}

#[test]
fn test_concurrent_revoke_and_lookup() {
    let store = Arc::new(RevocationStore::new());
    let until = Utc::now() + Duration::hours(1);

    let writers: Vec<_> = (0..8)
        .map(|t| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for i in 0..100 {
                    store.revoke(&format!("token-{}-{}", t, i), until);
                }
            })
        })
        .collect();

    let readers: Vec<_> = (0..8)
        .map(|_| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for _ in 0..100 {
                    assert!(!store.is_revoked("never-revoked"));
                }
            })
        })
        .collect();

    for handle in writers.into_iter().chain(readers) {
        handle.join().unwrap();
    }

    assert_eq!(store.len(), 800);
    assert!(store.is_revoked("token-3-42"));
}

#[test]
fn test_concurrent_pruning_removes_entry_once() {
    let store = Arc::new(RevocationStore::new());
    let now = Utc::now();
    store.revoke("tok", now - Duration::seconds(1));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let store = Arc::clone(&store);
            thread::spawn(move || store.is_revoked_at("tok", now))
        })
        .collect();

    for handle in handles {
        assert!(!handle.join().unwrap());
    }
    assert!(store.is_empty());
}
