//! Web server types.

use chrono::NaiveDate;
use serde::Deserialize;
use sqlx::SqlitePool;

use crate::storage::UtilityType;

/// Shared state for the handlers.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
}

/// Query parameters of `/outages`.
#[derive(Debug, Default, Deserialize)]
pub struct OutagesQuery {
    #[serde(rename = "type")]
    pub utility_type: Option<UtilityType>,
    pub emergency: Option<bool>,
    /// First date to include; today when absent
    pub from: Option<NaiveDate>,
}
