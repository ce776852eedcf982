//! Domain layer containing the token claim model.

pub mod entities;

// Re-export commonly used domain types
pub use entities::*;
