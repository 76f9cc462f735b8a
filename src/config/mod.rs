//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (endpoints, timeouts, retry policy)
//! - The library-level `Config`
//! - CLI option types and parsing

mod cli;
mod constants;
mod types;

// Re-export all constants
pub use cli::{Cli, Command};
pub use constants::*;
pub use types::{Config, LogFormat, LogLevel, RetryPolicy};
