//! Main application entry point (CLI binary).
//!
//! Thin wrapper around the `outages_ge` library: loads `.env`, parses the
//! command line, initializes the logger and dispatches the subcommand.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use outages_ge::initialization::init_logger_with;
use outages_ge::{
    run_scrape, run_setup_cities, run_setup_districts, run_update_streets, start_server, Cli,
    Command, Config,
};

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let config = cli.config();

    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    if let Err(e) = dispatch(&cli.command, &config).await {
        eprintln!("outages_ge error: {:#}", e);
        process::exit(1);
    }
    Ok(())
}

async fn dispatch(command: &Command, config: &Config) -> Result<()> {
    match command {
        Command::SetupCities { .. } => {
            let report = run_setup_cities(config).await?;
            println!(
                "✅ Cities: {} inserted, {} already present",
                report.inserted, report.existing
            );
        }
        Command::SetupDistricts { .. } => {
            let report = run_setup_districts(config).await?;
            println!(
                "✅ Districts: {} inserted, {} already present, {} skipped",
                report.inserted, report.existing, report.skipped
            );
        }
        Command::UpdateStreets { .. } => {
            let report = run_update_streets(config).await?;
            let status = if report.is_partial() { "⚠️" } else { "✅" };
            println!(
                "{} Streets: {} updated, {} inserted, {} deleted, {} unchanged ({} of {} districts failed)",
                status,
                report.updated,
                report.inserted,
                report.deleted,
                report.unchanged,
                report.failed_districts.len(),
                report.districts
            );
        }
        Command::Scrape { .. } => {
            let report = run_scrape(config).await?;
            println!(
                "✅ Scraped {} page{} ({} unchanged): {} outage{} written",
                report.pages,
                if report.pages == 1 { "" } else { "s" },
                report.unchanged,
                report.outages_written,
                if report.outages_written == 1 { "" } else { "s" }
            );
            println!("Results saved in {}", config.database_path.display());
        }
        Command::Serve { .. } => start_server(config).await?,
    }
    Ok(())
}
