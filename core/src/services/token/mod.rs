//! Token service module for JWT management
//!
//! This module handles signing and checking bearer tokens:
//! - HS256 token issuance with a server-computed expiration
//! - Signature, algorithm and expiration verification
//! - Claim extraction

mod config;
mod service;


pub use config::TokenServiceConfig;
pub use service::{TokenService, SIGNING_ALGORITHM};
