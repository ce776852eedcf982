//! Domain entities representing token payloads.

pub mod token;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use token::{ClaimValue, Claims, EXPIRATION_CLAIM, SECONDS_PER_DAY};
