//! Unit tests for error types

use crate::errors::{AuthError, TokenError};

#[test]
fn test_token_error_messages() {
    let err = TokenError::SigningMethodMismatch {
        algorithm: "none".to_string(),
    };
    assert_eq!(err.to_string(), "Unexpected signing method: none");
    assert_eq!(TokenError::MalformedToken.to_string(), "Malformed token");
    assert_eq!(
        TokenError::invalid("missing exp").to_string(),
        "Invalid token: missing exp"
    );
}

#[test]
fn test_auth_error_wraps_token_error_transparently() {
    let err: AuthError = TokenError::MalformedToken.into();
    assert_eq!(err, AuthError::Token(TokenError::MalformedToken));
    assert_eq!(err.to_string(), "Malformed token");
    assert_eq!(AuthError::Revoked.to_string(), "Token revoked");
}
