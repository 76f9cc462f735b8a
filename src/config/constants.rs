//! Configuration constants.
//!
//! This module defines the constants used throughout the application: provider
//! and geodata endpoints, timeouts, the retry policy and seed defaults.

use std::time::Duration;

/// Default SQLite database path
pub const DB_PATH: &str = "./outages.db";

/// Default directory served under `/static`
pub const STATIC_DIR: &str = "./static";

/// Default bind address for the web server
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1";
/// Default port for the web server
pub const DEFAULT_PORT: u16 = 8000;

/// Per-request HTTP timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default User-Agent string for HTTP requests.
///
/// Both the provider websites and the Overpass API ask clients to identify
/// themselves. Users can override this via the `--user-agent` CLI flag.
pub const DEFAULT_USER_AGENT: &str = concat!(
    "outages_ge/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/outages-ge/outages_ge)"
);

// Geodata
/// Public Overpass API interpreter endpoint
pub const OVERPASS_URL: &str = "https://overpass-api.de/api/interpreter";
/// Pause between per-district Overpass queries
pub const OVERPASS_QUERY_PAUSE: Duration = Duration::from_millis(100);

// Providers
/// Georgian Water and Power website root
pub const GWP_ROOT_URL: &str = "https://www.gwp.ge";
/// GWP planned outages listing, relative to the root
pub const GWP_PLANNED_PATH: &str = "/en/dagegmili";
/// GWP emergency outages listing, relative to the root
pub const GWP_EMERGENCY_PATH: &str = "/en/gadaudebeli";
/// Date format used on GWP listing pages
pub const GWP_DATE_FORMAT: &str = "%d/%m/%Y";

// Retry strategy
/// Initial delay in milliseconds before first retry
pub const RETRY_INITIAL_DELAY_MS: u64 = 500;
/// Factor by which retry delay is multiplied on each attempt
pub const RETRY_FACTOR: u64 = 2;
/// Maximum delay between retries in seconds
pub const RETRY_MAX_DELAY_SECS: u64 = 15;
/// Maximum number of retries after the initial attempt
pub const RETRY_MAX_ATTEMPTS: usize = 3;

// HTTP status codes (for clarity and consistency)
pub const HTTP_STATUS_TOO_MANY_REQUESTS: u16 = 429;
