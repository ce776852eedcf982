//! API response types and wrappers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Generic message attached to every rejected authentication attempt
pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized";

/// Standard success envelope: `{"data": ...}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Response payload
    pub data: T,
}

impl<T> ApiResponse<T> {
    /// Wrap a payload
    pub fn new(data: T) -> Self {
        Self { data }
    }

    /// Extract the data, consuming the response
    pub fn into_data(self) -> T {
        self.data
    }
}

/// Error response structure returned to clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short description of what went wrong
    pub error: String,

    /// Category message (e.g. "Unauthorized")
    pub message: String,

    /// Timestamp of when the error occurred
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            timestamp: Utc::now(),
        }
    }

    /// Create an unauthorized error response with the generic message
    pub fn unauthorized(error: impl Into<String>) -> Self {
        Self::new(error, UNAUTHORIZED_MESSAGE)
    }
}
