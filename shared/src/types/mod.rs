//! Type definitions shared between the core and the HTTP layer
//!
//! - `response` - API response wrappers and the error envelope

pub mod response;

pub use response::{ApiResponse, ErrorResponse, UNAUTHORIZED_MESSAGE};
