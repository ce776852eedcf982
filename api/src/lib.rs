//! HTTP authentication boundary for the tokengate server
//!
//! Library exports for the binary and for integration tests.

pub mod app;
pub mod dto;
pub mod logging;
pub mod middleware;
pub mod routes;
