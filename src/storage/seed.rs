//! Reference-data seeder.
//!
//! Inserts the configured cities and districts when they are absent. Both
//! steps are idempotent: rows are matched by English name (districts by
//! city and English name) and existing rows are left untouched.

use std::path::Path;

use anyhow::Context;
use log::{info, warn};
use serde::Deserialize;
use sqlx::SqlitePool;

use crate::error_handling::DatabaseError;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CitySeed {
    pub name_en: String,
    pub name_ka: String,
}

/// A district seed row. `city` is the English name of its city.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DistrictSeed {
    pub city: String,
    pub name_en: String,
    pub name_ka: String,
}

/// Cities and districts to seed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub cities: Vec<CitySeed>,
    #[serde(default)]
    pub districts: Vec<DistrictSeed>,
}

const TBILISI: (&str, &str) = ("Tbilisi", "თბილისი");

const TBILISI_DISTRICTS: &[(&str, &str)] = &[
    ("Samgori District", "სამგორის რაიონი"),
    ("Nadzaladevi District", "ნაძალადევის რაიონი"),
    ("Didube District", "დიდუბის რაიონი"),
    ("Saburtalo District", "საბურთალოს რაიონი"),
    ("Vake District", "ვაკის რაიონი"),
    ("Isani District", "ისნის რაიონი"),
    ("Krtsanisi District", "კრწანისის რაიონი"),
    ("Chugureti District", "ჩუღურეთის რაიონი"),
    ("Mtatsminda District", "მთაწმინდის რაიონი"),
    ("Gldani District", "გლდანის რაიონი"),
];

impl Default for SeedData {
    /// Tbilisi and its ten administrative districts.
    fn default() -> Self {
        let (city_en, city_ka) = TBILISI;
        Self {
            cities: vec![CitySeed {
                name_en: city_en.to_string(),
                name_ka: city_ka.to_string(),
            }],
            districts: TBILISI_DISTRICTS
                .iter()
                .map(|(name_en, name_ka)| DistrictSeed {
                    city: city_en.to_string(),
                    name_en: name_en.to_string(),
                    name_ka: name_ka.to_string(),
                })
                .collect(),
        }
    }
}

impl SeedData {
    /// Reads seed data from a JSON file.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read seed file {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse seed file {}", path.display()))
    }

    /// Loads the seed file when given, the built-in defaults otherwise.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }
}

/// Outcome of a seeding step.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub inserted: usize,
    pub existing: usize,
    /// Districts whose city is not in the database
    pub skipped: usize,
}

/// Inserts every seeded city that is not stored yet.
pub async fn setup_cities(pool: &SqlitePool, seed: &SeedData) -> Result<SeedReport, DatabaseError> {
    let mut report = SeedReport::default();

    for city in &seed.cities {
        let result = sqlx::query(
            "INSERT INTO city (name_en, name_ka) VALUES (?, ?) ON CONFLICT(name_en) DO NOTHING",
        )
        .bind(&city.name_en)
        .bind(&city.name_ka)
        .execute(pool)
        .await?;

        if result.rows_affected() > 0 {
            info!("{} inserted successfully!", city.name_en);
            report.inserted += 1;
        } else {
            info!("{} already exists in the database.", city.name_en);
            report.existing += 1;
        }
    }

    Ok(report)
}

/// Inserts every seeded district that is not stored yet.
///
/// Districts reference their city by English name; a district whose city
/// is missing is skipped with a warning (run `setup-cities` first).
pub async fn setup_districts(
    pool: &SqlitePool,
    seed: &SeedData,
) -> Result<SeedReport, DatabaseError> {
    let mut report = SeedReport::default();

    for district in &seed.districts {
        let city_id: Option<i64> = sqlx::query_scalar("SELECT id FROM city WHERE name_en = ?")
            .bind(&district.city)
            .fetch_optional(pool)
            .await?;

        let Some(city_id) = city_id else {
            warn!(
                "Skipping {}: city {} does not exist in the database.",
                district.name_en, district.city
            );
            report.skipped += 1;
            continue;
        };

        let result = sqlx::query(
            "INSERT INTO district (city_id, name_en, name_ka) VALUES (?, ?, ?)
             ON CONFLICT(city_id, name_en) DO NOTHING",
        )
        .bind(city_id)
        .bind(&district.name_en)
        .bind(&district.name_ka)
        .execute(pool)
        .await?;

        if result.rows_affected() > 0 {
            info!("{} inserted successfully!", district.name_en);
            report.inserted += 1;
        } else {
            info!("{} already exists in the database.", district.name_en);
            report.existing += 1;
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_helpers::create_test_pool;

    #[test]
    fn test_default_seed_is_tbilisi() {
        let seed = SeedData::default();
        assert_eq!(seed.cities.len(), 1);
        assert_eq!(seed.cities[0].name_en, "Tbilisi");
        assert_eq!(seed.districts.len(), 10);
        assert!(seed.districts.iter().all(|d| d.city == "Tbilisi"));
        assert!(seed
            .districts
            .iter()
            .any(|d| d.name_en == "Saburtalo District" && d.name_ka == "საბურთალოს რაიონი"));
    }

    #[test]
    fn test_seed_file_parsing() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("seed.json");
        std::fs::write(
            &path,
            r#"{"cities":[{"name_en":"Batumi","name_ka":"ბათუმი"}],
                "districts":[{"city":"Batumi","name_en":"Old Batumi District","name_ka":"ძველი ბათუმის რაიონი"}]}"#,
        )
        .expect("Failed to write seed file");

        let seed = SeedData::load(Some(&path)).expect("seed should parse");
        assert_eq!(seed.cities[0].name_en, "Batumi");
        assert_eq!(seed.districts[0].city, "Batumi");
    }

    #[test]
    fn test_seed_file_missing_is_error() {
        let result = SeedData::from_file(Path::new("/nonexistent/seed.json"));
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_setup_cities_is_idempotent() {
        let pool = create_test_pool().await;
        let seed = SeedData::default();

        let first = setup_cities(&pool, &seed).await.expect("first run");
        assert_eq!(first.inserted, 1);
        assert_eq!(first.existing, 0);

        let second = setup_cities(&pool, &seed).await.expect("second run");
        assert_eq!(second.inserted, 0);
        assert_eq!(second.existing, 1);

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM city")
            .fetch_one(&pool)
            .await
            .expect("count");
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_setup_districts_requires_city() {
        let pool = create_test_pool().await;
        let seed = SeedData::default();

        let report = setup_districts(&pool, &seed).await.expect("run");
        assert_eq!(report.inserted, 0);
        assert_eq!(report.skipped, 10);

        setup_cities(&pool, &seed).await.expect("cities");
        let report = setup_districts(&pool, &seed).await.expect("run");
        assert_eq!(report.inserted, 10);

        let report = setup_districts(&pool, &seed).await.expect("rerun");
        assert_eq!(report.inserted, 0);
        assert_eq!(report.existing, 10);
    }
}
