//! Outage ingestion.
//!
//! Runs every provider, groups the scraped fragments by detail page, skips
//! pages whose content hash is unchanged, reconciles each fragment's
//! location and replaces the page's stored outages.

mod schedule;

use chrono::NaiveDate;
use log::{debug, error, info};
use sha2::{Digest, Sha256};
use sqlx::SqlitePool;

use crate::error_handling::{DatabaseError, ErrorType, InfoType, ProcessingStats};
use crate::locate::StreetIndex;
use crate::provider::{get_outages, OutageProvider, ScrapedOutage};
use crate::storage::hash_sum::get_hash;
use crate::storage::{load_districts, load_streets, replace_source_outages, Language, NewOutage};

pub use schedule::parse_time_range;

/// Counts of one ingestion run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestReport {
    pub providers: usize,
    pub failed_providers: usize,
    /// Distinct detail pages scraped
    pub pages: usize,
    pub unchanged: usize,
    pub replaced: usize,
    pub outages_written: usize,
    /// Fragments with at least one located street
    pub located: usize,
    pub unlocated: usize,
}

/// SHA-256 (hex) of a page's extracted content.
pub fn content_hash(fragments: &[ScrapedOutage]) -> String {
    let mut hasher = Sha256::new();
    for fragment in fragments {
        hasher.update(fragment.date.to_string().as_bytes());
        hasher.update([0]);
        hasher.update(fragment.title.as_bytes());
        hasher.update([0]);
        hasher.update(fragment.description.as_bytes());
        hasher.update([0]);
    }
    hex::encode(hasher.finalize())
}

/// Groups fragments by detail page, keeping first-seen order.
fn group_by_page(outages: Vec<ScrapedOutage>) -> Vec<(String, Vec<ScrapedOutage>)> {
    let mut pages: Vec<(String, Vec<ScrapedOutage>)> = Vec::new();
    for outage in outages {
        match pages.iter_mut().find(|(link, _)| *link == outage.link) {
            Some((_, fragments)) => fragments.push(outage),
            None => pages.push((outage.link.clone(), vec![outage])),
        }
    }
    pages
}

/// Builds the rows for one fragment: one per located street, or a single
/// street-less row carrying the first district mentioned, if any.
fn build_rows(
    fragment: &ScrapedOutage,
    provider: &dyn OutageProvider,
    index: &StreetIndex,
) -> (Vec<NewOutage>, bool) {
    let (start, end) = parse_time_range(&fragment.description, fragment.date);
    let (title_en, title_ka, description_en, description_ka) = match provider.language() {
        Language::En => (
            Some(fragment.title.clone()),
            None,
            Some(fragment.description.clone()),
            None,
        ),
        Language::Ka => (
            None,
            Some(fragment.title.clone()),
            None,
            Some(fragment.description.clone()),
        ),
    };
    let row = |street_id, district_id, house_number| NewOutage {
        street_id,
        district_id,
        house_number,
        utility_type: fragment.utility_type,
        provider: provider.name().to_string(),
        emergency: fragment.emergency,
        title_en: title_en.clone(),
        title_ka: title_ka.clone(),
        description_en: description_en.clone(),
        description_ka: description_ka.clone(),
        start,
        end,
        outage_date: fragment.date,
        source_url: fragment.link.clone(),
    };

    let locations = index.locate(&fragment.description);
    let located = locations.iter().any(|l| l.street_id.is_some());
    if locations.is_empty() {
        return (vec![row(None, None, None)], false);
    }
    let rows = locations
        .into_iter()
        .map(|l| row(l.street_id, l.district_id, l.house_number))
        .collect();
    (rows, located)
}

/// Scrapes every provider and persists what changed.
///
/// A provider that fails is logged and counted; the others still run. A page
/// that cannot be written is counted and skipped.
///
/// # Errors
///
/// Returns a [`DatabaseError`] when the street index or a stored hash cannot
/// be read.
pub async fn ingest_outages(
    pool: &SqlitePool,
    providers: &[Box<dyn OutageProvider>],
    today: NaiveDate,
    stats: &ProcessingStats,
) -> Result<IngestReport, DatabaseError> {
    let districts = load_districts(pool).await?;
    let streets = load_streets(pool).await?;
    let index = StreetIndex::new(&districts, &streets);
    if index.is_empty() {
        info!("No districts or streets stored; outages will be saved without locations");
    }

    let mut report = IngestReport::default();
    for provider in providers {
        report.providers += 1;
        let outages = match get_outages(provider.as_ref(), today).await {
            Ok(outages) => outages,
            Err(e) => {
                error!("{e}");
                stats.increment_error(ErrorType::ProviderError);
                report.failed_providers += 1;
                continue;
            }
        };

        for (link, fragments) in group_by_page(outages) {
            report.pages += 1;
            let hash = content_hash(&fragments);
            if get_hash(pool, &link).await?.as_deref() == Some(hash.as_str()) {
                debug!("Unchanged: {link}");
                stats.increment_info(InfoType::UnchangedPage);
                report.unchanged += 1;
                continue;
            }

            let mut rows = Vec::new();
            let mut located = 0;
            let mut unlocated = 0;
            for fragment in &fragments {
                let (fragment_rows, is_located) = build_rows(fragment, provider.as_ref(), &index);
                if is_located {
                    located += 1;
                } else {
                    stats.increment_info(InfoType::UnlocatedFragment);
                    unlocated += 1;
                }
                rows.extend(fragment_rows);
            }

            match replace_source_outages(pool, &link, &rows, &hash).await {
                Ok(written) => {
                    debug!("Replaced {link}: {written} outages");
                    report.replaced += 1;
                    report.outages_written += written;
                    report.located += located;
                    report.unlocated += unlocated;
                }
                Err(e) => {
                    error!("Failed to store outages of {link}: {e}");
                    stats.increment_error(ErrorType::OutageWriteError);
                }
            }
        }
    }

    Ok(report)
}
