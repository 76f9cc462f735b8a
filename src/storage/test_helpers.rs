//! Shared test helpers for storage module tests.

use chrono::NaiveDate;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use crate::storage::models::{NewOutage, UtilityType};
use crate::storage::run_migrations;

/// Creates a test database pool with migrations applied.
/// Uses a single-connection in-memory database for fast test execution.
pub async fn create_test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create test database pool");
    run_migrations(&pool)
        .await
        .expect("Failed to run migrations");
    pool
}

/// Creates Tbilisi (if needed) and a district in it, returning the district id.
pub async fn create_test_district(pool: &SqlitePool, name_en: &str, name_ka: &str) -> i64 {
    sqlx::query("INSERT INTO city (name_en, name_ka) VALUES ('Tbilisi', 'თბილისი') ON CONFLICT(name_en) DO NOTHING")
        .execute(pool)
        .await
        .expect("Failed to insert test city");
    sqlx::query_scalar(
        "INSERT INTO district (city_id, name_en, name_ka)
         VALUES ((SELECT id FROM city WHERE name_en = 'Tbilisi'), ?, ?)
         RETURNING id",
    )
    .bind(name_en)
    .bind(name_ka)
    .fetch_one(pool)
    .await
    .expect("Failed to insert test district")
}

/// Creates a street and returns its id.
pub async fn create_test_street(
    pool: &SqlitePool,
    district_id: i64,
    name_en: &str,
    name_ka: &str,
    osm_id: i64,
) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO street (district_id, name_en, name_ka, osm_id) VALUES (?, ?, ?, ?) RETURNING id",
    )
    .bind(district_id)
    .bind(name_en)
    .bind(name_ka)
    .bind(osm_id)
    .fetch_one(pool)
    .await
    .expect("Failed to insert test street")
}

/// An unlocated planned water outage.
pub fn sample_outage(source_url: &str, outage_date: NaiveDate) -> NewOutage {
    NewOutage {
        street_id: None,
        district_id: None,
        house_number: None,
        utility_type: UtilityType::Water,
        provider: "GWP".to_string(),
        emergency: false,
        title_en: Some("Planned works".to_string()),
        title_ka: None,
        description_en: Some("Water supply will be suspended.".to_string()),
        description_ka: None,
        start: outage_date.and_hms_opt(0, 0, 0),
        end: None,
        outage_date,
        source_url: source_url.to_string(),
    }
}
