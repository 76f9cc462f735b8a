//! Georgian Water and Power (GWP) provider.
//!
//! Listing pages hold a `table.samushaoebi` with one row per announcement:
//! a red date span, a link to the detail page and the title in the second
//! anchor. Detail pages hold one paragraph per affected area.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use log::{debug, warn};
use scraper::{ElementRef, Html};
use url::Url;

use super::{OutageProvider, PageFetcher, ScrapedOutage};
use crate::config::{GWP_DATE_FORMAT, GWP_EMERGENCY_PATH, GWP_PLANNED_PATH};
use crate::error_handling::{ErrorType, InfoType, ProcessingStats, ScrapeError};
use crate::storage::{Language, UtilityType};
use crate::utils::{element_text, parse_selector_unsafe};

const LISTING_TABLE: &str = "table.samushaoebi";
const LISTING_ROW: &str = "table.samushaoebi tr";
const LISTING_DATE: &str = r##"span[style="color:#f00000"]"##;
const EMERGENCY_FRAGMENT: &str = ".initial > ul > li > p";
const PLANNED_FRAGMENT: &str = ".news-details > p";

/// A listing row dated today or later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    pub date: NaiveDate,
    pub title: String,
    /// Absolute detail page URL
    pub link: String,
}

/// GWP water outages.
pub struct Gwp {
    root: Url,
    fetcher: PageFetcher,
    stats: Arc<ProcessingStats>,
}

impl Gwp {
    /// Creates the provider for the site rooted at `root_url`.
    pub fn new(
        fetcher: PageFetcher,
        root_url: &str,
        stats: Arc<ProcessingStats>,
    ) -> Result<Self, ScrapeError> {
        Ok(Self {
            root: Url::parse(root_url)?,
            fetcher,
            stats,
        })
    }

    fn listing_url(&self, emergency: bool) -> Result<Url, ScrapeError> {
        let path = if emergency {
            GWP_EMERGENCY_PATH
        } else {
            GWP_PLANNED_PATH
        };
        Ok(self.root.join(path)?)
    }
}

#[async_trait]
impl OutageProvider for Gwp {
    fn name(&self) -> &'static str {
        "GWP"
    }

    fn utility_type(&self) -> UtilityType {
        UtilityType::Water
    }

    fn language(&self) -> Language {
        Language::En
    }

    async fn scrape_outages(
        &self,
        emergency: bool,
        today: NaiveDate,
    ) -> Result<Vec<ScrapedOutage>, ScrapeError> {
        let url = self.listing_url(emergency)?;
        let html = self.fetcher.get_html(url.as_str()).await.inspect_err(|_| {
            self.stats.increment_error(ErrorType::ListingFetchError);
        })?;
        let entries = parse_listing(&html, url.as_str(), &self.root, today, &self.stats)?;
        debug!(
            "{} {} announcements dated {} or later",
            entries.len(),
            if emergency { "emergency" } else { "planned" },
            today
        );

        let mut outages = Vec::new();
        for entry in entries {
            let detail = match self.fetcher.get_html(&entry.link).await {
                Ok(detail) => detail,
                Err(e) => {
                    warn!("Skipping {}: {e}", entry.link);
                    self.stats.increment_error(ErrorType::DetailFetchError);
                    continue;
                }
            };

            for description in parse_details(&detail, emergency, &self.stats) {
                outages.push(ScrapedOutage {
                    date: entry.date,
                    utility_type: self.utility_type(),
                    emergency,
                    title: entry.title.clone(),
                    description,
                    link: entry.link.clone(),
                });
            }
        }

        Ok(outages)
    }
}

/// Extracts the listing rows dated `today` or later.
///
/// Rows without a date span (headers, spacers), with an unparseable date or
/// without the two anchors are counted and skipped.
pub fn parse_listing(
    html: &str,
    page_url: &str,
    root: &Url,
    today: NaiveDate,
    stats: &ProcessingStats,
) -> Result<Vec<ListingEntry>, ScrapeError> {
    let document = Html::parse_document(html);

    let table_selector = parse_selector_unsafe(LISTING_TABLE, "GWP listing table");
    if document.select(&table_selector).next().is_none() {
        return Err(ScrapeError::MissingElement {
            url: page_url.to_string(),
            selector: LISTING_TABLE,
        });
    }

    let row_selector = parse_selector_unsafe(LISTING_ROW, "GWP listing rows");
    let date_selector = parse_selector_unsafe(LISTING_DATE, "GWP listing date");
    let anchor_selector = parse_selector_unsafe("a", "GWP listing anchors");

    let mut entries = Vec::new();
    for row in document.select(&row_selector) {
        let Some(date_span) = row.select(&date_selector).next() else {
            stats.increment_info(InfoType::UndatedRowSkipped);
            continue;
        };
        let date_text = element_text(date_span);
        let date = match NaiveDate::parse_from_str(&date_text, GWP_DATE_FORMAT) {
            Ok(date) => date,
            Err(e) => {
                warn!("Unparseable date '{date_text}' on {page_url}: {e}");
                stats.increment_error(ErrorType::DateParseError);
                continue;
            }
        };

        if date < today {
            stats.increment_info(InfoType::PastOutageSkipped);
            continue;
        }

        match listing_link_and_title(row, &anchor_selector, root) {
            Some((link, title)) => entries.push(ListingEntry { date, title, link }),
            None => {
                warn!("Listing row dated {date} on {page_url} has no detail link or title");
                stats.increment_error(ErrorType::ListingRowParseError);
            }
        }
    }

    Ok(entries)
}

fn listing_link_and_title(
    row: ElementRef<'_>,
    anchor_selector: &scraper::Selector,
    root: &Url,
) -> Option<(String, String)> {
    let mut anchors = row.select(anchor_selector);
    let href = anchors.next()?.value().attr("href")?;
    let link = root.join(href).ok()?;
    let title = element_text(anchors.next()?);
    Some((link.to_string(), title))
}

/// Extracts the non-empty description fragments of a detail page.
pub fn parse_details(html: &str, emergency: bool, stats: &ProcessingStats) -> Vec<String> {
    let document = Html::parse_document(html);
    let selector = if emergency {
        parse_selector_unsafe(EMERGENCY_FRAGMENT, "GWP emergency details")
    } else {
        parse_selector_unsafe(PLANNED_FRAGMENT, "GWP planned details")
    };

    document
        .select(&selector)
        .map(element_text)
        .filter(|text| {
            if text.is_empty() {
                stats.increment_info(InfoType::EmptyFragmentSkipped);
                false
            } else {
                true
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = r#"
        <html><body>
        <table class="samushaoebi">
          <tr><th>Date</th><th>Title</th></tr>
          <tr>
            <td><span style="color:#f00000">21/05/2024</span></td>
            <td><a href="/en/news/1001"><img src="x.png"></a><a href="/en/news/1001">Planned works in Saburtalo</a></td>
          </tr>
          <tr>
            <td><span style="color:#f00000"> 20/05/2024 </span></td>
            <td><a href="https://www.gwp.ge/en/news/1002">x</a><a href="https://www.gwp.ge/en/news/1002">Works in Vake</a></td>
          </tr>
          <tr>
            <td><span style="color:#f00000">19/05/2024</span></td>
            <td><a href="/en/news/1000">x</a><a href="/en/news/1000">Yesterday</a></td>
          </tr>
          <tr>
            <td><span style="color:#f00000">soon</span></td>
            <td><a href="/en/news/1003">x</a><a href="/en/news/1003">Broken date</a></td>
          </tr>
          <tr>
            <td><span style="color:#f00000">22/05/2024</span></td>
            <td>No link</td>
          </tr>
        </table>
        </body></html>"#;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 20).expect("valid date")
    }

    fn root() -> Url {
        Url::parse("https://www.gwp.ge").expect("valid root")
    }

    #[test]
    fn test_parse_listing_keeps_current_rows() {
        let stats = ProcessingStats::new();
        let entries = parse_listing(LISTING, "https://www.gwp.ge/en/dagegmili", &root(), today(), &stats)
            .expect("listing parses");

        assert_eq!(
            entries,
            vec![
                ListingEntry {
                    date: NaiveDate::from_ymd_opt(2024, 5, 21).expect("valid date"),
                    title: "Planned works in Saburtalo".to_string(),
                    link: "https://www.gwp.ge/en/news/1001".to_string(),
                },
                ListingEntry {
                    date: today(),
                    title: "Works in Vake".to_string(),
                    link: "https://www.gwp.ge/en/news/1002".to_string(),
                },
            ]
        );
        assert_eq!(stats.get_info_count(InfoType::PastOutageSkipped), 1);
        // Header row
        assert_eq!(stats.get_info_count(InfoType::UndatedRowSkipped), 1);
        assert_eq!(stats.get_error_count(ErrorType::DateParseError), 1);
        assert_eq!(stats.get_error_count(ErrorType::ListingRowParseError), 1);
    }

    #[test]
    fn test_parse_listing_without_table_is_error() {
        let stats = ProcessingStats::new();
        let result = parse_listing(
            "<html><body><p>Maintenance</p></body></html>",
            "https://www.gwp.ge/en/dagegmili",
            &root(),
            today(),
            &stats,
        );
        assert!(matches!(
            result,
            Err(ScrapeError::MissingElement {
                selector: LISTING_TABLE,
                ..
            })
        ));
    }

    #[test]
    fn test_parse_details_planned() {
        let stats = ProcessingStats::new();
        let html = r#"
            <div class="news-details">
              <p>Saburtalo District:&nbsp;Pekini Avenue N12, 14;</p>
              <p>&nbsp;</p>
              <p>Vake District: Abashidze Street N5</p>
              <div><p>Not a direct child</p></div>
            </div>
            <div class="initial"><ul><li><p>Emergency only</p></li></ul></div>"#;

        let fragments = parse_details(html, false, &stats);
        assert_eq!(
            fragments,
            vec![
                "Saburtalo District: Pekini Avenue N12, 14;".to_string(),
                "Vake District: Abashidze Street N5".to_string(),
            ]
        );
        assert_eq!(stats.get_info_count(InfoType::EmptyFragmentSkipped), 1);
    }

    #[test]
    fn test_parse_details_emergency() {
        let stats = ProcessingStats::new();
        let html = r#"
            <div class="news-details"><p>Planned only</p></div>
            <div class="initial"><ul>
              <li><p>Gldani District: Khizanishvili Street</p></li>
              <li><p>   </p></li>
            </ul></div>"#;

        let fragments = parse_details(html, true, &stats);
        assert_eq!(fragments, vec!["Gldani District: Khizanishvili Street".to_string()]);
    }
}
