//! Domain-specific error types and error handling.

mod types;

#[cfg(test)]
mod tests;

pub use types::{AuthError, TokenError};

pub type TokenResult<T> = Result<T, TokenError>;
pub type AuthResult<T> = Result<T, AuthError>;
