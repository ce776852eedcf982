//! Business services containing the token lifecycle.

pub mod auth;
pub mod revocation;
pub mod token;

// Re-export commonly used types
pub use auth::{Authenticator, RevocationPolicy};
pub use revocation::{RevocationStore, RevocationSweepConfig, RevocationSweeper};
pub use token::{TokenService, TokenServiceConfig};
