//! Configuration for the authenticator

use tg_shared::config::JwtConfig;

/// How long `logout` keeps a token blocked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RevocationPolicy {
    /// Block for the revocation store's fixed horizon, regardless of the
    /// token's remaining lifetime
    #[default]
    FixedHorizon,
    /// Block until the token's own `exp`
    ///
    /// Falls back to the fixed horizon for tokens whose claims cannot be read.
    UntilExpiry,
}

impl From<&JwtConfig> for RevocationPolicy {
    fn from(config: &JwtConfig) -> Self {
        if config.revoke_until_expiry {
            RevocationPolicy::UntilExpiry
        } else {
            RevocationPolicy::FixedHorizon
        }
    }
}
