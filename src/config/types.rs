//! Configuration types.
//!
//! This module defines enums and structs shared by the CLI and the library.

use std::path::PathBuf;

use clap::ValueEnum;

use crate::config::constants::{
    DB_PATH, DEFAULT_BIND_ADDR, DEFAULT_PORT, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT,
    GWP_ROOT_URL, OVERPASS_URL, RETRY_INITIAL_DELAY_MS, RETRY_MAX_ATTEMPTS, STATIC_DIR,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Retry policy for outbound HTTP calls (provider pages and Overpass).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Initial delay in milliseconds before the first retry
    pub initial_delay_ms: u64,
    /// Number of retries after the initial attempt (0 disables retrying)
    pub max_retries: usize,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            initial_delay_ms: RETRY_INITIAL_DELAY_MS,
            max_retries: RETRY_MAX_ATTEMPTS,
        }
    }
}

/// Library configuration.
///
/// Built from the CLI by `Cli::config`, or programmatically in tests.
///
/// # Examples
///
/// ```no_run
/// use outages_ge::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     database_path: PathBuf::from("./outages.db"),
///     timeout_seconds: 10,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite database path
    pub database_path: PathBuf,

    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,

    /// Per-request timeout in seconds
    pub timeout_seconds: u64,

    /// HTTP User-Agent header value
    pub user_agent: String,

    /// Retry policy for outbound requests
    pub retry: RetryPolicy,

    /// Overpass API interpreter endpoint
    pub overpass_url: String,

    /// GWP website root
    pub gwp_root_url: String,

    /// Optional JSON file replacing the built-in cities/districts seed
    pub seed_file: Option<PathBuf>,

    /// Web server bind address
    pub bind_addr: String,

    /// Web server port
    pub port: u16,

    /// Directory served under `/static`
    pub static_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DB_PATH),
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            retry: RetryPolicy::default(),
            overpass_url: OVERPASS_URL.to_string(),
            gwp_root_url: GWP_ROOT_URL.to_string(),
            seed_file: None,
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            port: DEFAULT_PORT,
            static_dir: PathBuf::from(STATIC_DIR),
        }
    }
}
