//! Unit tests for the authenticator

use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use tg_shared::config::JwtConfig;

use crate::domain::entities::token::Claims;
use crate::errors::{AuthError, TokenError};
use crate::services::auth::{Authenticator, RevocationPolicy};
use crate::services::revocation::RevocationStore;
use crate::services::token::{TokenService, TokenServiceConfig};

fn create_authenticator(lifetime_days: i64) -> Authenticator {
    Authenticator::new(
        Arc::new(TokenService::new(TokenServiceConfig::new("auth-secret", lifetime_days))),
        Arc::new(RevocationStore::new()),
    )
}

fn user_claims() -> Claims {
    Claims::new().with("user_id", 7).with("email", "a@b.com")
}

#[test]
fn test_authenticate_fresh_token() {
    let auth = create_authenticator(1);
    let token = auth.issue(&user_claims()).unwrap();

    let claims = auth.authenticate(&token).unwrap();
    assert_eq!(claims.get_i64("user_id"), Some(7));
}

#[test]
fn test_authenticate_rejects_garbage() {
    let auth = create_authenticator(1);

    assert_eq!(
        auth.authenticate("not-a-token"),
        Err(AuthError::Token(TokenError::MalformedToken))
    );
}

#[test]
fn test_authenticate_rejects_expired() {
    let auth = create_authenticator(1);
    let issued_at = Utc::now() - Duration::days(3);
    let token = auth.token_service().issue_at(&user_claims(), issued_at).unwrap();

    assert_eq!(auth.authenticate(&token), Err(AuthError::Expired));
}

#[test]
fn test_logout_then_authenticate_is_revoked() {
    let auth = create_authenticator(1);
    let token = auth.issue(&user_claims()).unwrap();

    auth.logout(&token);

    assert!(auth.revocation_store().is_revoked(&token));
    assert_eq!(auth.authenticate(&token), Err(AuthError::Revoked));
}

#[test]
fn test_revocation_is_time_boxed() {
    // A 30-day token logged out under the fixed horizon is usable again after an hour.
    let auth = create_authenticator(30);
    let t0 = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
    let token = auth.token_service().issue_at(&user_claims(), t0).unwrap();

    let until = auth.logout_at(&token, t0);
    assert_eq!(until, t0 + Duration::hours(1));

    assert_eq!(auth.authenticate_at(&token, t0 + Duration::minutes(30)), Err(AuthError::Revoked));

    let later = t0 + Duration::hours(2);
    assert!(auth.authenticate_at(&token, later).is_ok());
    assert!(auth.revocation_store().is_empty());
}

#[test]
fn test_expiry_is_permanent() {
    let auth = create_authenticator(1);
    let t0 = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
    let token = auth.token_service().issue_at(&user_claims(), t0).unwrap();

    for hours in [25, 48, 24 * 365] {
        assert_eq!(
            auth.authenticate_at(&token, t0 + Duration::hours(hours)),
            Err(AuthError::Expired)
        );
    }
}

#[test]
fn test_until_expiry_policy_blocks_for_remaining_lifetime() {
    let auth = create_authenticator(30).with_policy(RevocationPolicy::UntilExpiry);
    let t0 = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
    let token = auth.token_service().issue_at(&user_claims(), t0).unwrap();

    let until = auth.logout_at(&token, t0);
    assert_eq!(until, t0 + Duration::days(30));

    assert_eq!(
        auth.authenticate_at(&token, t0 + Duration::days(29)),
        Err(AuthError::Revoked)
    );
    assert_eq!(
        auth.authenticate_at(&token, t0 + Duration::days(31)),
        Err(AuthError::Expired)
    );
}

#[test]
fn test_until_expiry_policy_falls_back_for_unreadable_tokens() {
    let auth = create_authenticator(1).with_policy(RevocationPolicy::UntilExpiry);
    let now = Utc::now();

    let until = auth.logout_at("garbage", now);

    assert_eq!(until, now + auth.revocation_store().horizon());
    assert!(auth.revocation_store().is_revoked_at("garbage", now));
}

#[test]
fn test_policy_from_config() {
    assert_eq!(RevocationPolicy::from(&JwtConfig::default()), RevocationPolicy::FixedHorizon);

    let config = JwtConfig {
        revoke_until_expiry: true,
        ..JwtConfig::default()
    };
    assert_eq!(RevocationPolicy::from(&config), RevocationPolicy::UntilExpiry);
}

#[test]
fn test_clones_share_revocation_state() {
    let auth = create_authenticator(1);
    let other = auth.clone();
    let token = auth.issue(&user_claims()).unwrap();

    other.logout(&token);

    assert_eq!(auth.authenticate(&token), Err(AuthError::Revoked));
}

#[test]
fn test_separate_stores_do_not_interfere() {
    let service = Arc::new(TokenService::new(TokenServiceConfig::new("auth-secret", 1)));
    let first = Authenticator::new(Arc::clone(&service), Arc::new(RevocationStore::new()));
    let second = Authenticator::new(service, Arc::new(RevocationStore::new()));
    let token = first.issue(&user_claims()).unwrap();

    first.logout(&token);

    assert_eq!(first.authenticate(&token), Err(AuthError::Revoked));
    assert!(second.authenticate(&token).is_ok());
}
