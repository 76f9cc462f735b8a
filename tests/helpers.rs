// Shared test helpers for on-disk databases and configuration.

use std::path::Path;

use outages_ge::{Config, RetryPolicy};
use sqlx::SqlitePool;
use tempfile::TempDir;

/// Config pointing at a fresh database in `dir`, with retries disabled.
#[allow(dead_code)] // Used by other test files
pub fn test_config(dir: &TempDir) -> Config {
    Config {
        database_path: dir.path().join("outages.db"),
        retry: RetryPolicy {
            initial_delay_ms: 1,
            max_retries: 0,
        },
        timeout_seconds: 5,
        ..Default::default()
    }
}

/// Writes a seed file with Tbilisi and the given districts.
#[allow(dead_code)]
pub fn write_seed_file(dir: &TempDir, districts: &[(&str, &str)]) -> std::path::PathBuf {
    let districts: Vec<_> = districts
        .iter()
        .map(|(en, ka)| serde_json::json!({"city": "Tbilisi", "name_en": en, "name_ka": ka}))
        .collect();
    let seed = serde_json::json!({
        "cities": [{"name_en": "Tbilisi", "name_ka": "თბილისი"}],
        "districts": districts,
    });
    let path = dir.path().join("seed.json");
    std::fs::write(&path, seed.to_string()).expect("Failed to write seed file");
    path
}

/// Opens the database written by a command.
#[allow(dead_code)]
pub async fn open_pool(path: &Path) -> SqlitePool {
    SqlitePool::connect(&format!("sqlite:{}", path.display()))
        .await
        .expect("Failed to open test database")
}
