//! Outage persistence and queries.

use chrono::{NaiveDate, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error_handling::DatabaseError;

use super::hash_sum::upsert_hash;
use super::models::{NewOutage, OutageRecord, UtilityType};

/// Filters for `query_outages`. `None` fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutageFilter {
    /// Only outages on or after this date
    pub from: Option<NaiveDate>,
    pub utility_type: Option<UtilityType>,
    pub emergency: Option<bool>,
}

/// Replaces every outage scraped from `source_url` and records its content hash.
///
/// Runs in one transaction so a reader never sees a page half-replaced.
/// Returns the number of rows written.
pub async fn replace_source_outages(
    pool: &SqlitePool,
    source_url: &str,
    outages: &[NewOutage],
    content_hash: &str,
) -> Result<usize, DatabaseError> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM outage WHERE source_url = ?")
        .bind(source_url)
        .execute(&mut *tx)
        .await?;

    let created_at = Utc::now();
    for outage in outages {
        sqlx::query(
            r#"INSERT INTO outage (
                street_id, district_id, house_number, type, provider, emergency,
                title_en, title_ka, description_en, description_ka,
                start, "end", outage_date, source_url, uuid, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(outage.street_id)
        .bind(outage.district_id)
        .bind(outage.house_number)
        .bind(outage.utility_type.as_str())
        .bind(&outage.provider)
        .bind(outage.emergency)
        .bind(&outage.title_en)
        .bind(&outage.title_ka)
        .bind(&outage.description_en)
        .bind(&outage.description_ka)
        .bind(outage.start)
        .bind(outage.end)
        .bind(outage.outage_date)
        .bind(source_url)
        .bind(Uuid::new_v4().to_string())
        .bind(created_at)
        .execute(&mut *tx)
        .await?;
    }

    upsert_hash(&mut *tx, source_url, content_hash).await?;

    tx.commit().await?;
    Ok(outages.len())
}

/// Reads outages joined with their street and district names.
///
/// Ordered by date, then insertion order.
pub async fn query_outages(
    pool: &SqlitePool,
    filter: &OutageFilter,
) -> Result<Vec<OutageRecord>, DatabaseError> {
    let utility_type = filter.utility_type.map(|t| t.as_str());

    let records = sqlx::query_as::<_, OutageRecord>(
        r#"SELECT
            o.uuid AS uuid,
            o.type AS utility_type,
            o.provider AS provider,
            o.emergency AS emergency,
            o.outage_date AS date,
            o.start AS start,
            o."end" AS "end",
            o.title_en AS title_en,
            o.title_ka AS title_ka,
            o.description_en AS description_en,
            o.description_ka AS description_ka,
            o.house_number AS house_number,
            s.name_en AS street_en,
            s.name_ka AS street_ka,
            d.name_en AS district_en,
            d.name_ka AS district_ka,
            o.source_url AS source_url,
            o.created_at AS created_at
        FROM outage o
        LEFT JOIN street s ON s.id = o.street_id
        LEFT JOIN district d ON d.id = COALESCE(o.district_id, s.district_id)
        WHERE (?1 IS NULL OR o.outage_date >= ?1)
          AND (?2 IS NULL OR o.type = ?2)
          AND (?3 IS NULL OR o.emergency = ?3)
        ORDER BY o.outage_date, o.id"#,
    )
    .bind(filter.from)
    .bind(utility_type)
    .bind(filter.emergency)
    .fetch_all(pool)
    .await?;

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::hash_sum::get_hash;
    use crate::storage::test_helpers::{
        create_test_district, create_test_pool, create_test_street, sample_outage,
    };

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[tokio::test]
    async fn test_replace_source_outages_replaces_previous_rows() {
        let pool = create_test_pool().await;
        let url = "https://www.gwp.ge/en/news/1";
        let hash = "c".repeat(64);

        let first = vec![
            sample_outage(url, date(2024, 5, 20)),
            sample_outage(url, date(2024, 5, 20)),
        ];
        assert_eq!(
            replace_source_outages(&pool, url, &first, &hash).await.expect("insert"),
            2
        );

        let second = vec![sample_outage(url, date(2024, 5, 21))];
        replace_source_outages(&pool, url, &second, &hash)
            .await
            .expect("replace");

        let records = query_outages(&pool, &OutageFilter::default())
            .await
            .expect("query");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].date, date(2024, 5, 21));
        assert_eq!(get_hash(&pool, url).await.expect("hash"), Some(hash));
    }

    #[tokio::test]
    async fn test_query_outages_filters_and_joins() {
        let pool = create_test_pool().await;
        let district = create_test_district(&pool, "Saburtalo District", "საბურთალოს რაიონი").await;
        let street = create_test_street(&pool, district, "Pekini Avenue", "პეკინის გამზირი", 10).await;

        let url = "https://www.gwp.ge/en/news/2";
        let mut located = sample_outage(url, date(2024, 5, 20));
        located.street_id = Some(street);
        located.house_number = Some(12);
        let mut old = sample_outage(url, date(2024, 5, 1));
        old.emergency = true;
        replace_source_outages(&pool, url, &[located, old], &"d".repeat(64))
            .await
            .expect("insert");

        let current = query_outages(
            &pool,
            &OutageFilter {
                from: Some(date(2024, 5, 15)),
                ..Default::default()
            },
        )
        .await
        .expect("query");
        assert_eq!(current.len(), 1);
        assert_eq!(current[0].street_en.as_deref(), Some("Pekini Avenue"));
        assert_eq!(current[0].district_en.as_deref(), Some("Saburtalo District"));
        assert_eq!(current[0].house_number, Some(12));
        assert_eq!(current[0].utility_type, "water");

        let emergency = query_outages(
            &pool,
            &OutageFilter {
                emergency: Some(true),
                ..Default::default()
            },
        )
        .await
        .expect("query");
        assert_eq!(emergency.len(), 1);
        assert_eq!(emergency[0].date, date(2024, 5, 1));

        let gas = query_outages(
            &pool,
            &OutageFilter {
                utility_type: Some(UtilityType::Gas),
                ..Default::default()
            },
        )
        .await
        .expect("query");
        assert!(gas.is_empty());
    }

    #[tokio::test]
    async fn test_deleting_street_keeps_outage() {
        let pool = create_test_pool().await;
        let district = create_test_district(&pool, "Vake District", "ვაკის რაიონი").await;
        let street = create_test_street(&pool, district, "Abashidze Street", "აბაშიძის ქუჩა", 5).await;

        let url = "https://www.gwp.ge/en/news/3";
        let mut outage = sample_outage(url, date(2024, 5, 20));
        outage.street_id = Some(street);
        replace_source_outages(&pool, url, &[outage], &"e".repeat(64))
            .await
            .expect("insert");

        sqlx::query("DELETE FROM street WHERE id = ?")
            .bind(street)
            .execute(&pool)
            .await
            .expect("delete street");

        let records = query_outages(&pool, &OutageFilter::default())
            .await
            .expect("query");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].street_en, None);
    }
}
