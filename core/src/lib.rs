//! # Tokengate Core
//!
//! Bearer token core for the tokengate backend.
//! This crate contains the claim model, the HS256 token service, the
//! in-memory revocation store, and the authentication contract consumed
//! by request middleware.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{ClaimValue, Claims, EXPIRATION_CLAIM};
pub use errors::{AuthError, AuthResult, TokenError, TokenResult};
pub use services::{
    Authenticator, RevocationPolicy, RevocationStore, RevocationSweepConfig, RevocationSweeper,
    TokenService, TokenServiceConfig,
};
