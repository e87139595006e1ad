use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod handlers;

// Weekly exports are batch-scale, not unbounded; cap uploads well above
// any realistic week.
const MAX_UPLOAD_BYTES: usize = 32 * 1024 * 1024;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let app = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/api/process", post(handlers::process))
        .route("/api/process/archive", post(handlers::process_archive))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(DefaultBodyLimit::disable())
                .layer(RequestBodyLimitLayer::new(MAX_UPLOAD_BYTES)),
        );

    let addr = std::env::var("REMITSCAN_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    info!("Server listening on {addr}");
    info!("  POST /api/process          - classify an export, JSON tables");
    info!("  POST /api/process/archive  - classify an export, tar.gz bundle");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
