use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use bicycle_parts_api::{
    app,
    config,
    database::{DocumentStore, MongoStore},
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so USER_NAME, USER_PASSWORD and JSON_WEB_TOKEN are picked up
    let _ = dotenvy::dotenv();

    let config = config::config();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.default_log_filter())),
        )
        .init();

    tracing::info!("Starting bicycle parts API in {:?} mode", config.environment);

    if config.security.jwt_secret.is_empty() {
        tracing::warn!("JSON_WEB_TOKEN is not set; token issuance and verification will fail");
    }
    if !config.security.require_auth_for_profiles {
        tracing::warn!("/profile/:email and /user/:email are served without authentication");
    }

    let store = MongoStore::connect(&config.database)
        .await
        .context("failed to open document store client")?;
    match store.ping().await {
        Ok(()) => tracing::info!("Connected to database {}", config.database.database_name),
        Err(e) => tracing::error!("Database ping failed, serving anyway: {}", e),
    }

    let state = AppState::new(config.clone(), Arc::new(store));

    let bind_addr = format!("{}:{}", config.server.bind_address, config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Server listening on http://{}", bind_addr);

    axum::serve(listener, app(state)).await.context("server error")?;
    Ok(())
}
