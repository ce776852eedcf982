//! Shared configuration and common types for the tokengate server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - The uniform JSON error envelope returned to clients

pub mod config;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, ConfigError, Environment, JwtConfig, LoggingConfig, ServerConfig,
};
pub use types::{ApiResponse, ErrorResponse};
