//! District and street persistence.

use sqlx::SqlitePool;

use crate::error_handling::DatabaseError;

use super::models::{District, NewStreet, Street};

/// Loads every stored district, ordered by id.
pub async fn load_districts(pool: &SqlitePool) -> Result<Vec<District>, DatabaseError> {
    let districts = sqlx::query_as::<_, District>(
        "SELECT id, city_id, name_en, name_ka FROM district ORDER BY id",
    )
    .fetch_all(pool)
    .await?;
    Ok(districts)
}

/// Loads every stored street, ordered by id.
pub async fn load_streets(pool: &SqlitePool) -> Result<Vec<Street>, DatabaseError> {
    let streets = sqlx::query_as::<_, Street>(
        "SELECT id, district_id, name_en, name_ka, osm_id FROM street ORDER BY id",
    )
    .fetch_all(pool)
    .await?;
    Ok(streets)
}

/// Applies a street diff in a single transaction.
///
/// `updates` and `inserts` are keyed by `osm_id`; `deletes` lists the
/// `osm_id`s to remove. Outages pointing at a deleted street keep their row
/// with `street_id` set to null.
pub async fn apply_street_changes(
    pool: &SqlitePool,
    updates: &[NewStreet],
    inserts: &[NewStreet],
    deletes: &[i64],
) -> Result<(), DatabaseError> {
    let mut tx = pool.begin().await?;

    for street in updates {
        sqlx::query("UPDATE street SET district_id = ?, name_en = ?, name_ka = ? WHERE osm_id = ?")
            .bind(street.district_id)
            .bind(&street.name_en)
            .bind(&street.name_ka)
            .bind(street.osm_id)
            .execute(&mut *tx)
            .await?;
    }

    for street in inserts {
        sqlx::query("INSERT INTO street (district_id, name_en, name_ka, osm_id) VALUES (?, ?, ?, ?)")
            .bind(street.district_id)
            .bind(&street.name_en)
            .bind(&street.name_ka)
            .bind(street.osm_id)
            .execute(&mut *tx)
            .await?;
    }

    for osm_id in deletes {
        sqlx::query("DELETE FROM street WHERE osm_id = ?")
            .bind(osm_id)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;
    Ok(())
}
