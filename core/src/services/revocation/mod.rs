//! Revocation module for logged-out tokens
//!
//! Tokens are blocked for a bounded window after logout. Stale entries are
//! dropped lazily by the lookup that finds them, and optionally by a
//! periodic sweep.

mod cleanup;
mod store;

#[cfg(test)]
mod tests;

pub use cleanup::{RevocationSweepConfig, RevocationSweeper};
pub use store::{RevocationStore, DEFAULT_REVOCATION_HORIZON_SECONDS};
