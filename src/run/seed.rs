//! Reference-data seeding commands.

use anyhow::{Context, Result};
use log::info;

use crate::config::Config;
use crate::initialization::init_database;
use crate::storage::{setup_cities, setup_districts, SeedData, SeedReport};

/// Inserts the configured cities that are missing.
pub async fn run_setup_cities(config: &Config) -> Result<SeedReport> {
    let seed = SeedData::load(config.seed_file.as_deref())?;
    let pool = init_database(config).await?;
    let report = setup_cities(&pool, &seed)
        .await
        .context("Failed to set up cities")?;
    info!(
        "Cities: {} inserted, {} already present",
        report.inserted, report.existing
    );
    Ok(report)
}

/// Inserts the configured districts that are missing.
///
/// Run `setup-cities` first: districts of an unknown city are skipped.
pub async fn run_setup_districts(config: &Config) -> Result<SeedReport> {
    let seed = SeedData::load(config.seed_file.as_deref())?;
    let pool = init_database(config).await?;
    let report = setup_districts(&pool, &seed)
        .await
        .context("Failed to set up districts")?;
    info!(
        "Districts: {} inserted, {} already present, {} skipped",
        report.inserted, report.existing, report.skipped
    );
    Ok(report)
}
