use crate::config::Config;
use crate::images::{ImageService, ImageStore, LocalImageStore};
use anyhow::{Context, Result};
use axum::{
    extract::DefaultBodyLimit, middleware, response::IntoResponse, routing::get, Json, Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tower_http::{services::ServeDir, timeout::TimeoutLayer, trace::TraceLayer};

pub mod error;
pub mod request_id;
pub mod response;
pub mod routes_images;

pub use error::AppError;
pub use response::{ApiResponse, ApiStatus};

/// Shared application context for all handlers
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<Config>,
    pub images: Arc<ImageService>,
}

impl AppContext {
    /// Build the context from configuration, opening the image store
    pub fn from_config(config: Config) -> Result<Self> {
        let store = LocalImageStore::from_config(&config.storage).with_context(|| {
            format!("Failed to open image storage at {:?}", config.storage.path)
        })?;
        Ok(Self::with_store(config, Arc::new(store)))
    }

    /// Build the context on an already opened store.
    pub fn with_store(config: Config, store: Arc<dyn ImageStore>) -> Self {
        let images = ImageService::new(store, &config.storage);
        Self {
            config: Arc::new(config),
            images: Arc::new(images),
        }
    }
}

/// Create the router with all routes and middleware
pub fn create_router(ctx: AppContext) -> Router {
    let body_limit = ctx.config.server.max_upload_bytes;
    let timeout = Duration::from_secs(ctx.config.server.request_timeout_secs);
    let storage_dir = ctx.config.storage.path.clone();

    Router::new()
        .route("/health", get(health_check))
        .merge(routes_images::image_routes())
        .nest_service("/images", ServeDir::new(storage_dir))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TimeoutLayer::new(timeout))
        .layer(middleware::map_response(error::timeout_envelope))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id::request_id_middleware))
        .with_state(ctx)
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Start the HTTP server and run until a shutdown signal arrives
pub async fn start_server(config: Config) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;

    let ctx = AppContext::from_config(config)?;
    tracing::info!(
        storage = ?ctx.config.storage.path,
        "Image storage ready"
    );

    let app = create_router(ctx);

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => {}
            Err(e) => {
                tracing::error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
