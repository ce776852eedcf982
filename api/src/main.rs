use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing::{info, warn};

use tg_api::app::{create_app, AppState};
use tg_api::logging::init_tracing;
use tg_shared::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().context("failed to read configuration")?;
    init_tracing(&config.logging);

    info!(environment = %config.environment, "Starting tokengate API server");

    config.validate().context("invalid configuration")?;
    if config.jwt.is_using_default_secret() {
        if config.environment.is_production() {
            warn!("JWT_SECRET is not set; running production with the development secret");
        } else {
            warn!("Using the development JWT secret");
        }
    }

    let state = AppState::from_config(&config.jwt)?;
    let sweep = state.sweeper(&config.jwt).start_background_task();
    let app_state = web::Data::new(state);

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let mut server = HttpServer::new(move || create_app(app_state.clone()));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {bind_address}"))?
        .run()
        .await?;

    if let Some(handle) = sweep {
        handle.abort();
    }

    info!("Server stopped");
    Ok(())
}
