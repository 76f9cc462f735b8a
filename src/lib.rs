//! outages_ge library: utility outage tracking
//!
//! This library scrapes utility providers' outage announcements, reconciles
//! their free-text locations against a street dataset synced from
//! OpenStreetMap, stores them in SQLite and serves them over HTTP.
//!
//! # Example
//!
//! ```no_run
//! use outages_ge::{run_scrape, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     database_path: std::path::PathBuf::from("outages.db"),
//!     ..Default::default()
//! };
//!
//! let report = run_scrape(&config).await?;
//! println!("{} outages written", report.outages_written);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime.

mod app;
pub mod config;
pub mod error_handling;
pub mod ingest;
pub mod initialization;
pub mod locate;
pub mod overpass;
pub mod provider;
mod run;
pub mod storage;
pub mod sync;
mod utils;
pub mod web;

// Re-export public API
pub use config::{Cli, Command, Config, LogFormat, LogLevel, RetryPolicy};
pub use ingest::IngestReport;
pub use run::{run_scrape, run_setup_cities, run_setup_districts, run_update_streets};
pub use storage::{run_migrations, SeedReport};
pub use sync::StreetSyncReport;
pub use web::start_server;
