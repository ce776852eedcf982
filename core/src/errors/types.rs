//! Error types for token handling and request authentication
//!
//! Messages here are internal causes. The HTTP layer never returns them to
//! clients; it collapses every failure into one generic unauthorized response.

use thiserror::Error;

/// Token issuance, decoding and signature errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Cryptographic signing failed while issuing a token
    #[error("Token signing failed: {reason}")]
    Signing { reason: String },

    /// The token header declares an algorithm other than the configured one
    #[error("Unexpected signing method: {algorithm}")]
    SigningMethodMismatch { algorithm: String },

    /// Wrong structure, bad encoding, or signature mismatch
    #[error("Malformed token")]
    MalformedToken,

    /// Signature is valid but the claims are not in the expected shape
    #[error("Invalid token: {reason}")]
    InvalidToken { reason: String },
}

impl TokenError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        TokenError::InvalidToken {
            reason: reason.into(),
        }
    }
}

/// Reasons the authentication boundary rejects a bearer token
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error(transparent)]
    Token(#[from] TokenError),

    /// Signature is fine but `exp` has passed
    #[error("Token expired")]
    Expired,

    /// The token was logged out and its revocation window is still open
    #[error("Token revoked")]
    Revoked,
}
