//! Main authenticator implementation

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::domain::entities::token::Claims;
use crate::errors::{AuthError, AuthResult, TokenResult};
use crate::services::revocation::RevocationStore;
use crate::services::token::TokenService;

use super::config::RevocationPolicy;

/// Authentication contract shared by every request handler
///
/// Cheap to clone; clones share the same token service and revocation store.
#[derive(Clone)]
pub struct Authenticator {
    /// Token service for signing and verification
    token_service: Arc<TokenService>,
    /// Revocation list shared by all authentication checks
    revocation_store: Arc<RevocationStore>,
    policy: RevocationPolicy,
}

impl Authenticator {
    /// Create a new authenticator with the fixed-horizon revocation policy
    ///
    /// # Arguments
    ///
    /// * `token_service` - Service for token signing and verification
    /// * `revocation_store` - Store consulted on every authentication
    pub fn new(token_service: Arc<TokenService>, revocation_store: Arc<RevocationStore>) -> Self {
        Self {
            token_service,
            revocation_store,
            policy: RevocationPolicy::default(),
        }
    }

    /// Replace the logout revocation policy
    pub fn with_policy(mut self, policy: RevocationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn token_service(&self) -> &Arc<TokenService> {
        &self.token_service
    }

    pub fn revocation_store(&self) -> &Arc<RevocationStore> {
        &self.revocation_store
    }

    pub fn policy(&self) -> RevocationPolicy {
        self.policy
    }

    /// Issue a token for a freshly authenticated user
    pub fn issue(&self, claims: &Claims) -> TokenResult<String> {
        self.token_service.issue(claims)
    }

    /// Authenticate a bearer token
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - Signature valid, not expired and not revoked
    /// * `Err(AuthError::Token)` - Decoding or signature checking failed
    /// * `Err(AuthError::Expired)` - The token's `exp` has passed
    /// * `Err(AuthError::Revoked)` - The token was logged out and is still blocked
    pub fn authenticate(&self, token: &str) -> AuthResult<Claims> {
        self.authenticate_at(token, Utc::now())
    }

    /// Authenticate a bearer token as if the current time were `now`
    pub fn authenticate_at(&self, token: &str, now: DateTime<Utc>) -> AuthResult<Claims> {
        let claims = self
            .token_service
            .verify_and_parse_at(token, now)
            .map_err(|e| {
                debug!(error = %e, "Token verification failed");
                AuthError::from(e)
            })?
            .ok_or_else(|| {
                debug!("Token expired");
                AuthError::Expired
            })?;

        if self.revocation_store.is_revoked_at(token, now) {
            debug!("Token is revoked");
            return Err(AuthError::Revoked);
        }

        Ok(claims)
    }

    /// Revoke a token according to the configured policy
    ///
    /// # Returns
    ///
    /// The instant the block ends
    pub fn logout(&self, token: &str) -> DateTime<Utc> {
        self.logout_at(token, Utc::now())
    }

    /// Revoke a token as if the current time were `now`
    pub fn logout_at(&self, token: &str, now: DateTime<Utc>) -> DateTime<Utc> {
        let until = match self.policy {
            RevocationPolicy::FixedHorizon => self.revocation_store.logout_at(token, now),
            RevocationPolicy::UntilExpiry => match self.natural_expiry(token) {
                Some(expiry) => {
                    self.revocation_store.revoke(token, expiry);
                    expiry
                }
                None => self.revocation_store.logout_at(token, now),
            },
        };

        info!(%until, policy = ?self.policy, "Token logged out");
        until
    }

    fn natural_expiry(&self, token: &str) -> Option<DateTime<Utc>> {
        let exp = self.token_service.parse(token).ok()?.expiration()?;
        DateTime::from_timestamp(exp, 0)
    }
}
