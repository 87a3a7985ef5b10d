//! Storefront API gateway.
//!
//! Connects to PostgreSQL, MySQL and MongoDB, then serves the REST API until
//! interrupted.

use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use storefront_service::{create_router, AppState, ServiceConfig};
use storefront_store::Connectors;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,storefront=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting storefront gateway");

    let config = ServiceConfig::from_env();

    tracing::info!(
        listen_addr = %config.listen_addr,
        postgres = %format!("{}:{}", config.stores.postgres.host, config.stores.postgres.port),
        mysql = %format!("{}:{}", config.stores.mysql.host, config.stores.mysql.port),
        mongo = %format!("{}:{}", config.stores.mongo.host, config.stores.mongo.port),
        max_open = config.stores.pool.max_open,
        "Service configuration loaded"
    );

    let connectors = Connectors::connect(&config.stores).await?;

    let state = AppState::from_connectors(&connectors, config.clone());
    let app = create_router(state);

    tracing::info!(listen_addr = %config.listen_addr, "Starting HTTP server");
    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("HTTP server stopped, closing store connections");
    connectors.close().await;

    Ok(())
}

/// Resolve on ctrl-c or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install ctrl-c handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
