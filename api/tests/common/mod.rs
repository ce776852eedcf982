//! Shared helpers for API integration tests

use actix_web::web;
use tg_api::app::AppState;
use tg_core::Claims;
use tg_shared::config::JwtConfig;

pub const TEST_SECRET: &str = "api-test-secret";

pub fn test_config() -> JwtConfig {
    JwtConfig::new(TEST_SECRET).with_expiration_days(1)
}

pub fn test_state() -> web::Data<AppState> {
    web::Data::new(AppState::from_config(&test_config()).unwrap())
}

pub fn user_claims() -> Claims {
    Claims::new().with("user_id", 7).with("email", "a@b.com")
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}
