pub mod api;
pub mod bootstrap;
pub mod error;
pub mod extract;
pub mod health;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::{http::StatusCode, Json, Router};
use catalog_core::config::{AppConfig, LoadOptions};
use catalog_db::ProductRepository;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::api::AppState;
use crate::error::DetailResponse;

/// Full HTTP surface: catalog routes, health, 404 fallback, CORS and tracing.
pub fn app(products: Arc<dyn ProductRepository>) -> Router {
    api::router(AppState { products: Arc::clone(&products) })
        .merge(health::router(products))
        .fallback(route_not_found)
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
}

/// Any origin, method and header, with credentials. The wildcard cannot be
/// combined with credentials, so each is mirrored from the request instead.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

async fn route_not_found() -> (StatusCode, Json<DetailResponse<&'static str>>) {
    (StatusCode::NOT_FOUND, Json(DetailResponse { detail: "Not Found" }))
}

fn init_logging(config: &AppConfig) {
    use catalog_core::config::LogFormat;
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);

    match config.logging.format {
        LogFormat::Compact => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).compact().init();
        }
        LogFormat::Pretty => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).pretty().init();
        }
        LogFormat::Json => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).json().init();
        }
    }
}

pub async fn run() -> Result<()> {
    // Load config and initialize logging before any other operations
    let config = AppConfig::load(LoadOptions::default())?;
    init_logging(&config);

    let application = bootstrap::bootstrap_with_config(config).await?;
    let address = application.config.listen_address();
    let grace = Duration::from_secs(application.config.server.graceful_shutdown_secs);

    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!(
        event_name = "system.server.started",
        correlation_id = "bootstrap",
        bind_address = %address,
        "catalog-server listening"
    );

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
    let router = app(application.products);
    let mut server = tokio::spawn(async move {
        axum::serve(listener, router)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await
    });

    tokio::select! {
        joined = &mut server => {
            joined??;
            return Ok(());
        }
        signal = wait_for_shutdown() => signal?,
    }

    info!(
        event_name = "system.server.stopping",
        correlation_id = "shutdown",
        grace_secs = grace.as_secs(),
        "catalog-server stopping"
    );
    let _ = shutdown_tx.send(());

    match tokio::time::timeout(grace, server).await {
        Ok(joined) => joined??,
        Err(_) => warn!(
            event_name = "system.server.shutdown_timeout",
            correlation_id = "shutdown",
            "in-flight requests did not finish within the grace period"
        ),
    }

    Ok(())
}

async fn wait_for_shutdown() -> Result<()> {
    tokio::signal::ctrl_c().await?;
    Ok(())
}
