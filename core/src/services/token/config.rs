//! Configuration for the token service

use tg_shared::config::JwtConfig;

/// Configuration for the token service
///
/// Not validated here; `JwtConfig::validate` rejects an empty secret or a
/// non-positive lifetime before a service is built.
#[derive(Clone)]
pub struct TokenServiceConfig {
    /// Shared HMAC signing secret
    pub secret: String,
    /// Token lifetime in whole days
    pub lifetime_days: i64,
}

impl TokenServiceConfig {
    pub fn new(secret: impl Into<String>, lifetime_days: i64) -> Self {
        Self {
            secret: secret.into(),
            lifetime_days,
        }
    }
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            secret: "development-secret-please-change-in-production".to_string(),
            lifetime_days: 1,
        }
    }
}

impl From<&JwtConfig> for TokenServiceConfig {
    fn from(config: &JwtConfig) -> Self {
        Self::new(config.secret.clone(), config.expiration_days)
    }
}

impl std::fmt::Debug for TokenServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenServiceConfig")
            .field("secret", &"<redacted>")
            .field("lifetime_days", &self.lifetime_days)
            .finish()
    }
}
