//! Authentication route handlers
//!
//! Both endpoints sit behind the `JwtAuth` middleware:
//! - Logout (revokes the presented bearer token)
//! - Profile (echoes the caller's claims)

pub mod logout;
pub mod me;

pub use logout::logout;
pub use me::me;
