//! Command-line interface.
//!
//! `outages_ge` is a thin dispatcher over the library: each subcommand maps to
//! one pipeline stage (seeding, street sync, scraping) or to the web server.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::constants::{
    DB_PATH, DEFAULT_BIND_ADDR, DEFAULT_PORT, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT,
    GWP_ROOT_URL, OVERPASS_URL, STATIC_DIR,
};
use super::types::{Config, LogFormat, LogLevel};

/// Command-line options.
///
/// # Examples
///
/// ```bash
/// # Seed reference data, then sync streets
/// outages_ge setup-cities
/// outages_ge setup-districts
/// outages_ge update-streets
///
/// # Scrape outages into the database and serve them
/// outages_ge scrape
/// outages_ge serve --port 8080
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "outages_ge",
    version,
    about = "Tracks utility outages and reconciles them against city streets."
)]
pub struct Cli {
    /// Database path (SQLite file)
    #[arg(long, env = "DATABASE_PATH", default_value = DB_PATH, global = true)]
    pub database_path: PathBuf,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info, global = true)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain, global = true)]
    pub log_format: LogFormat,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS, global = true)]
    pub timeout_seconds: u64,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT, global = true)]
    pub user_agent: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Insert the configured cities if they are missing
    SetupCities {
        /// JSON seed file replacing the built-in cities and districts
        #[arg(long)]
        seed_file: Option<PathBuf>,
    },
    /// Insert the configured districts if they are missing
    SetupDistricts {
        /// JSON seed file replacing the built-in cities and districts
        #[arg(long)]
        seed_file: Option<PathBuf>,
    },
    /// Sync streets of every stored district from OpenStreetMap
    UpdateStreets {
        /// Overpass API interpreter endpoint
        #[arg(long, env = "OVERPASS_URL", default_value = OVERPASS_URL)]
        overpass_url: String,
    },
    /// Scrape provider websites and store current outages
    Scrape {
        /// GWP website root
        #[arg(long, env = "GWP_ROOT_URL", default_value = GWP_ROOT_URL)]
        gwp_root_url: String,
    },
    /// Serve the web page and the outages API
    Serve {
        /// Address to bind
        #[arg(long, default_value = DEFAULT_BIND_ADDR)]
        bind: String,
        /// Port to listen on
        #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
        port: u16,
        /// Directory served under /static
        #[arg(long, default_value = STATIC_DIR)]
        static_dir: PathBuf,
    },
}

impl Cli {
    /// Builds the library configuration from the parsed options.
    pub fn config(&self) -> Config {
        let mut config = Config {
            database_path: self.database_path.clone(),
            log_level: self.log_level.clone(),
            log_format: self.log_format.clone(),
            timeout_seconds: self.timeout_seconds,
            user_agent: self.user_agent.clone(),
            ..Default::default()
        };

        match &self.command {
            Command::SetupCities { seed_file } | Command::SetupDistricts { seed_file } => {
                config.seed_file = seed_file.clone();
            }
            Command::UpdateStreets { overpass_url } => {
                config.overpass_url = overpass_url.clone();
            }
            Command::Scrape { gwp_root_url } => {
                config.gwp_root_url = gwp_root_url.clone();
            }
            Command::Serve {
                bind,
                port,
                static_dir,
            } => {
                config.bind_addr = bind.clone();
                config.port = *port;
                config.static_dir = static_dir.clone();
            }
        }

        config
    }
}
