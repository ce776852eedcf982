//! Authentication configuration

use serde::{Deserialize, Serialize};

use super::{parse_var, ConfigError};

const DEFAULT_SECRET: &str = "development-secret-please-change-in-production";

/// JWT authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Shared HMAC secret for signing tokens
    pub secret: String,

    /// Token lifetime in whole days
    #[serde(default = "default_expiration_days")]
    pub expiration_days: i64,

    /// How long a logged-out token stays blocked, in seconds
    #[serde(default = "default_revocation_horizon")]
    pub revocation_horizon_seconds: i64,

    /// Block logged-out tokens until their own expiry instead of the fixed horizon
    #[serde(default)]
    pub revoke_until_expiry: bool,

    /// Interval of the revocation sweep task in seconds (0 = disabled)
    #[serde(default)]
    pub sweep_interval_seconds: u64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEFAULT_SECRET),
            expiration_days: default_expiration_days(),
            revocation_horizon_seconds: default_revocation_horizon(),
            revoke_until_expiry: false,
            sweep_interval_seconds: 0,
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set token lifetime in days
    pub fn with_expiration_days(mut self, days: i64) -> Self {
        self.expiration_days = days;
        self
    }

    /// Set the logout revocation horizon in seconds
    pub fn with_revocation_horizon_seconds(mut self, seconds: i64) -> Self {
        self.revocation_horizon_seconds = seconds;
        self
    }

    /// Read the `JWT_*` variables
    ///
    /// Unset variables keep their defaults; set but unparsable ones are an error.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            secret: lookup("JWT_SECRET").unwrap_or(defaults.secret),
            expiration_days: parse_var(&lookup, "JWT_EXPIRATION_DAYS", defaults.expiration_days)?,
            revocation_horizon_seconds: parse_var(
                &lookup,
                "JWT_REVOCATION_HORIZON_SECONDS",
                defaults.revocation_horizon_seconds,
            )?,
            revoke_until_expiry: parse_var(
                &lookup,
                "JWT_REVOKE_UNTIL_EXPIRY",
                defaults.revoke_until_expiry,
            )?,
            sweep_interval_seconds: parse_var(
                &lookup,
                "JWT_SWEEP_INTERVAL_SECONDS",
                defaults.sweep_interval_seconds,
            )?,
        })
    }

    /// Reject settings the token service must never be constructed with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.secret.is_empty() {
            return Err(ConfigError::EmptySecret);
        }
        if self.expiration_days <= 0 {
            return Err(ConfigError::InvalidLifetime(self.expiration_days));
        }
        if self.revocation_horizon_seconds <= 0 {
            return Err(ConfigError::InvalidHorizon(self.revocation_horizon_seconds));
        }
        Ok(())
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEFAULT_SECRET
    }

    /// Whether the periodic revocation sweep should run
    pub fn sweep_enabled(&self) -> bool {
        self.sweep_interval_seconds > 0
    }
}

fn default_expiration_days() -> i64 {
    1
}

fn default_revocation_horizon() -> i64 {
    3600
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<&str, &str> = vars.iter().copied().collect();
        move |key| map.get(key).map(|v| v.to_string())
    }

    #[test]
    fn test_jwt_config_default() {
        let config = JwtConfig::default();
        assert_eq!(config.expiration_days, 1);
        assert_eq!(config.revocation_horizon_seconds, 3600);
        assert!(!config.revoke_until_expiry);
        assert!(!config.sweep_enabled());
        assert!(config.is_using_default_secret());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_jwt_config_builder() {
        let config = JwtConfig::new("my-secret")
            .with_expiration_days(30)
            .with_revocation_horizon_seconds(60);

        assert_eq!(config.expiration_days, 30);
        assert_eq!(config.revocation_horizon_seconds, 60);
        assert!(!config.is_using_default_secret());
    }

    #[test]
    fn test_from_vars() {
        let config = JwtConfig::from_vars(lookup_from(&[
            ("JWT_SECRET", "s3cr3t"),
            ("JWT_EXPIRATION_DAYS", "7"),
            ("JWT_REVOKE_UNTIL_EXPIRY", "true"),
            ("JWT_SWEEP_INTERVAL_SECONDS", "120"),
        ]))
        .unwrap();

        assert_eq!(config.secret, "s3cr3t");
        assert_eq!(config.expiration_days, 7);
        assert_eq!(config.revocation_horizon_seconds, 3600);
        assert!(config.revoke_until_expiry);
        assert!(config.sweep_enabled());
    }

    #[test]
    fn test_fractional_lifetime_is_rejected() {
        let result = JwtConfig::from_vars(lookup_from(&[("JWT_EXPIRATION_DAYS", "1.5")]));
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_validate() {
        assert!(matches!(JwtConfig::new("").validate(), Err(ConfigError::EmptySecret)));
        assert!(matches!(
            JwtConfig::new("k").with_expiration_days(0).validate(),
            Err(ConfigError::InvalidLifetime(0))
        ));
        assert!(matches!(
            JwtConfig::new("k").with_revocation_horizon_seconds(-5).validate(),
            Err(ConfigError::InvalidHorizon(-5))
        ));
    }
}
