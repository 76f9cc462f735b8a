//! HTTP surface.
//!
//! Provides:
//! - `/` - the outage map page
//! - `/outages` - JSON list of outages read from the database
//! - `/static/*` - files from the configured static directory

mod handlers;
mod types;

use std::path::Path;

use axum::routing::get;
use axum::Router;
use tower_http::services::ServeDir;

use crate::config::Config;
use crate::initialization::init_database;

pub use handlers::{index_handler, outages_handler};
pub use types::{AppState, OutagesQuery};

/// Builds the application router.
pub fn build_router(state: AppState, static_dir: &Path) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/outages", get(outages_handler))
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
}

/// Opens the database and serves the router until the process stops.
pub async fn start_server(config: &Config) -> Result<(), anyhow::Error> {
    let pool = init_database(config).await?;
    let app = build_router(AppState { pool }, &config.static_dir);

    let addr = format!("{}:{}", config.bind_addr, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind server to {}: {}", addr, e))?;

    log::info!("Listening on http://{}/", addr);
    log::info!("  - Outages: http://{}/outages", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_start_server_reports_bind_failure() {
        let taken = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind");
        let port = taken.local_addr().expect("addr").port();
        let dir = tempfile::tempdir().expect("tempdir");

        let config = Config {
            database_path: dir.path().join("outages.db"),
            port,
            ..Default::default()
        };
        let err = start_server(&config).await.expect_err("port is taken");
        assert!(err.to_string().contains("Failed to bind"));
    }
}
