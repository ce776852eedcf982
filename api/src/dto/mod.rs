//! Request and response bodies

pub mod auth;

pub use auth::{LogoutResponse, ProfileResponse};
