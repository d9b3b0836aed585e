//! Tuning episode bot server entry point.

use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::EnvFilter;
use tuning_api::config::AppConfig;
use tuning_api::error::AppError;
use tuning_api::line::client::{LineReplyClient, oversized_episodes};
use tuning_api::line::signature::SignatureVerifier;
use tuning_api::state::AppState;
use tuning_catalog::load_catalog;
use tuning_conversation::application::dispatcher::Dispatcher;
use tuning_core::entitlement::EntitlementClient;
use tuning_entitlement::HttpEntitlementStore;

const REPLY_TIMEOUT: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // A missing .env file is fine; the environment may be set directly.
    let _ = dotenvy::dotenv();

    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting Tuning episode bot");

    let config = AppConfig::from_env()?;

    // The catalog is loaded once; failure here stops the process before it
    // starts serving.
    let loaded = load_catalog(&config.catalog_path).map_err(AppError::from)?;
    oversized_episodes(&loaded.catalog);
    let catalog = Arc::new(loaded.catalog);

    let store = HttpEntitlementStore::new(config.entitlement.clone())
        .map_err(|e| AppError::Client(e.to_string()))?;
    let entitlements = EntitlementClient::new(Arc::new(store), config.entitlement.timeout);

    let sender = LineReplyClient::new(
        &config.line_api_base_url,
        config.channel_access_token.clone(),
        REPLY_TIMEOUT,
    )
    .map_err(|e| AppError::Client(e.to_string()))?;

    let dispatcher = Dispatcher::new(
        Arc::clone(&catalog),
        &config.conversation,
        entitlements,
        Arc::new(sender),
    );
    tracing::info!(
        free_episodes = dispatcher.policy().free_threshold(),
        max_episode = dispatcher.policy().max_episode(),
        "access policy configured"
    );

    let app_state = AppState::new(
        dispatcher,
        SignatureVerifier::new(&config.channel_secret),
        catalog,
        loaded.version,
    );
    let app = tuning_api::build_router(app_state);

    // Start server.
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
}
