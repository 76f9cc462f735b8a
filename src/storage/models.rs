// storage/models.rs
// Database models and types

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Utility service affected by an outage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UtilityType {
    Water,
    Electricity,
    Gas,
}

impl UtilityType {
    /// Value stored in the `outage.type` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            UtilityType::Water => "water",
            UtilityType::Electricity => "electricity",
            UtilityType::Gas => "gas",
        }
    }
}

impl std::fmt::Display for UtilityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UtilityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "water" => Ok(UtilityType::Water),
            "electricity" => Ok(UtilityType::Electricity),
            "gas" => Ok(UtilityType::Gas),
            other => Err(format!("unknown utility type '{other}'")),
        }
    }
}

/// Language a provider publishes its pages in.
///
/// Decides whether scraped text lands in the `_en` or `_ka` columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    En,
    Ka,
}

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct City {
    pub id: i64,
    pub name_en: String,
    pub name_ka: String,
}

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct District {
    pub id: i64,
    pub city_id: i64,
    pub name_en: String,
    pub name_ka: String,
}

/// A stored street. One row per OpenStreetMap way, so a long street
/// usually has several rows sharing a name.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Street {
    pub id: i64,
    pub district_id: i64,
    pub name_en: String,
    pub name_ka: String,
    pub osm_id: i64,
}

/// A street as fetched from the geodata source, keyed by `osm_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStreet {
    pub district_id: i64,
    pub name_en: String,
    pub name_ka: String,
    pub osm_id: i64,
}

impl NewStreet {
    /// True when the stored row already carries this data.
    pub fn matches(&self, stored: &Street) -> bool {
        self.osm_id == stored.osm_id
            && self.district_id == stored.district_id
            && self.name_en == stored.name_en
            && self.name_ka == stored.name_ka
    }
}

/// An outage row ready for insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOutage {
    pub street_id: Option<i64>,
    pub district_id: Option<i64>,
    pub house_number: Option<i64>,
    pub utility_type: UtilityType,
    pub provider: String,
    pub emergency: bool,
    pub title_en: Option<String>,
    pub title_ka: Option<String>,
    pub description_en: Option<String>,
    pub description_ka: Option<String>,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
    pub outage_date: NaiveDate,
    pub source_url: String,
}

/// An outage as served by the web API, joined with street and district names.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct OutageRecord {
    pub uuid: String,
    #[serde(rename = "type")]
    pub utility_type: String,
    pub provider: String,
    pub emergency: bool,
    pub date: NaiveDate,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
    pub title_en: Option<String>,
    pub title_ka: Option<String>,
    pub description_en: Option<String>,
    pub description_ka: Option<String>,
    pub house_number: Option<i64>,
    pub street_en: Option<String>,
    pub street_ka: Option<String>,
    pub district_en: Option<String>,
    pub district_ka: Option<String>,
    pub source_url: String,
    pub created_at: DateTime<Utc>,
}
