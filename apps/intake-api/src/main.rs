use axum_helpers::server::{create_production_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::mongodb::{ConnectionManager, MongoConnector};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output
    install_color_eyre();

    // A missing .env file is fine; real deployments use the environment
    let dotenv = dotenvy::dotenv();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    if let Ok(path) = dotenv {
        info!("Loaded environment from {}", path.display());
    }

    // Connects lazily on the first request that needs the store
    let connections = Arc::new(ConnectionManager::new(
        MongoConnector,
        config.mongodb.clone(),
    ));

    let state = AppState {
        config: Arc::new(config),
        connections,
    };

    let api_routes = api::routes(&state);
    let router = create_router::<openapi::ApiDoc>(api_routes, Some(state.config.static_dir.as_path()));
    let app = router.merge(health_router(state.config.app));

    info!(
        environment = ?state.config.environment,
        redirect = %state.config.redirect,
        "Starting intake API with graceful shutdown (30s timeout)"
    );

    let connections = state.connections.clone();
    create_production_app(
        app,
        &state.config.server,
        Duration::from_secs(30),
        async move {
            info!("Shutting down: closing MongoDB connection");
            match connections.disconnect().await {
                Some(handle) => {
                    handle.shutdown().await;
                    info!("MongoDB connection closed successfully");
                }
                None => info!("No MongoDB connection was open"),
            }
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Intake API shutdown complete");
    Ok(())
}
