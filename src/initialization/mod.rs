//! Application initialization and resource setup.
//!
//! This module provides functions to initialize the shared resources every
//! command needs: the logger, the HTTP client and the database pool.

mod client;
mod logger;

use anyhow::{Context, Result};
use sqlx::SqlitePool;

use crate::config::Config;
use crate::storage::{init_db_pool_with_path, run_migrations};

// Re-export public API
pub use client::init_client;
pub use logger::init_logger_with;

/// Opens the configured database and brings its schema up to date.
pub async fn init_database(config: &Config) -> Result<SqlitePool> {
    let pool = init_db_pool_with_path(&config.database_path)
        .await
        .context("Failed to initialize database pool")?;
    run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;
    Ok(pool)
}
