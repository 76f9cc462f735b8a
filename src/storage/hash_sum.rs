//! Content hashes of scraped pages.
//!
//! A page whose extracted content hashes to the stored value is skipped on
//! the next scrape.

use sqlx::{SqliteConnection, SqlitePool};

use crate::error_handling::DatabaseError;

/// Returns the stored hash for `url`, if any.
pub async fn get_hash(pool: &SqlitePool, url: &str) -> Result<Option<String>, DatabaseError> {
    let value = sqlx::query_scalar("SELECT value FROM hash_sum WHERE url = ?")
        .bind(url)
        .fetch_optional(pool)
        .await?;
    Ok(value)
}

/// Inserts or replaces the hash for `url`.
pub async fn upsert_hash(
    conn: &mut SqliteConnection,
    url: &str,
    value: &str,
) -> Result<(), DatabaseError> {
    sqlx::query(
        "INSERT INTO hash_sum (url, value) VALUES (?, ?)
         ON CONFLICT(url) DO UPDATE SET value = excluded.value",
    )
    .bind(url)
    .bind(value)
    .execute(conn)
    .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_helpers::create_test_pool;

    #[tokio::test]
    async fn test_upsert_hash_replaces_value() {
        let pool = create_test_pool().await;
        let url = "https://www.gwp.ge/en/news/1";
        assert_eq!(get_hash(&pool, url).await.expect("get"), None);

        let first = "a".repeat(64);
        let second = "b".repeat(64);
        let mut conn = pool.acquire().await.expect("acquire");
        upsert_hash(&mut conn, url, &first).await.expect("insert");
        upsert_hash(&mut conn, url, &second).await.expect("update");
        drop(conn);

        assert_eq!(get_hash(&pool, url).await.expect("get"), Some(second));
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM hash_sum")
            .fetch_one(&pool)
            .await
            .expect("count");
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_hash_must_be_sha256_hex_length() {
        let pool = create_test_pool().await;
        let mut conn = pool.acquire().await.expect("acquire");
        let result = upsert_hash(&mut conn, "https://www.gwp.ge/en/news/2", "short").await;
        assert!(result.is_err());
    }
}
