//! Authentication boundary
//!
//! Combines cryptographic verification with the revocation list. Request
//! middleware calls `Authenticator::authenticate` for every bearer token and
//! `Authenticator::logout` to revoke one.

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::RevocationPolicy;
pub use service::Authenticator;
