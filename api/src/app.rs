//! Application state and factory
//!
//! This module handles the initialization of the application state
//! and provides the factory for creating the Actix-web application.

use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App, Error, HttpResponse,
};
use anyhow::Context;
use tracing_actix_web::TracingLogger;

use tg_core::{
    Authenticator, RevocationPolicy, RevocationStore, RevocationSweepConfig, RevocationSweeper,
    TokenService, TokenServiceConfig,
};
use tg_shared::config::JwtConfig;

use crate::middleware::auth::JwtAuth;
use crate::routes::auth::{logout, me};
use crate::routes::health::health_check;

/// Services shared by every worker
#[derive(Clone)]
pub struct AppState {
    pub authenticator: Authenticator,
}

impl AppState {
    pub fn new(authenticator: Authenticator) -> Self {
        Self { authenticator }
    }

    /// Build the token service, revocation store and authenticator from configuration
    pub fn from_config(config: &JwtConfig) -> anyhow::Result<Self> {
        let horizon = chrono::Duration::try_seconds(config.revocation_horizon_seconds)
            .context("revocation horizon is out of range")?;

        let token_service = Arc::new(TokenService::new(TokenServiceConfig::from(config)));
        let revocation_store = Arc::new(RevocationStore::with_horizon(horizon));
        let authenticator = Authenticator::new(token_service, revocation_store)
            .with_policy(RevocationPolicy::from(config));

        Ok(Self::new(authenticator))
    }

    /// Sweeper over this state's revocation store
    pub fn sweeper(&self, config: &JwtConfig) -> Arc<RevocationSweeper> {
        Arc::new(RevocationSweeper::new(
            Arc::clone(self.authenticator.revocation_store()),
            RevocationSweepConfig::from(config),
        ))
    }
}

/// Create and configure the application with all dependencies
pub fn create_app(
    app_state: web::Data<AppState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    let jwt_auth = JwtAuth::new(app_state.authenticator.clone());

    App::new()
        .app_data(app_state)
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api/v1").service(
                web::scope("/auth")
                    .wrap(jwt_auth)
                    .route("/logout", web::post().to(logout))
                    .route("/me", web::get().to(me)),
            ),
        )
        .default_service(web::route().to(not_found))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "error": "not_found",
        "message": "The requested resource was not found"
    }))
}
