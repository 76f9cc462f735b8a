//! Error type definitions.
//!
//! This module defines all error and info types used throughout the application.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Error types for database operations.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Error creating the database file or its directory.
    #[error("Database file creation error: {0}")]
    FileCreationError(String),

    /// SQL execution error.
    #[error("SQL error: {0}")]
    SqlError(#[from] sqlx::Error),

    /// Migration error.
    #[error("Migration error: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),
}

/// Errors raised while scraping a provider website.
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// The page could not be fetched (network error or non-success status).
    #[error("Failed to fetch {url}: {source}")]
    Fetch {
        /// Requested URL
        url: String,
        /// Underlying HTTP error
        #[source]
        source: ReqwestError,
    },

    /// A structural element the provider always renders was not found.
    #[error("Page {url} has no element matching '{selector}'")]
    MissingElement {
        /// Page URL
        url: String,
        /// CSS selector that matched nothing
        selector: &'static str,
    },

    /// A link could not be resolved against the provider root.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Wraps any failure of a provider's full scrape.
#[derive(Error, Debug)]
#[error("Error occurred while getting {provider} outages: {source}")]
pub struct GetOutagesError {
    /// Provider name
    pub provider: &'static str,
    /// Underlying scrape failure
    #[source]
    pub source: ScrapeError,
}

/// Errors raised by the Overpass API client.
#[derive(Error, Debug)]
pub enum OverpassError {
    /// Network error, non-success status or undecodable body.
    #[error("Overpass request failed: {0}")]
    Http(#[from] ReqwestError),

    /// The interpreter answered but reported a runtime error (timeout, quota).
    #[error("Overpass runtime error: {0}")]
    Remark(String),
}

/// Types of errors that can occur while scraping, syncing and ingesting.
///
/// Every counted error is non-fatal: the affected page, row or district is
/// dropped and the run continues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorType {
    // Provider scraping
    ListingFetchError,
    DetailFetchError,
    ListingRowParseError,
    DateParseError,
    ProviderError,
    // Street sync
    OverpassQueryError,
    // Persistence
    OutageWriteError,
}

/// Types of informational metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum InfoType {
    PastOutageSkipped,
    UndatedRowSkipped,
    EmptyFragmentSkipped,
    UnchangedPage,
    UnlocatedFragment,
    DuplicateWaySkipped,
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::ListingFetchError => "Listing page fetch error",
            ErrorType::DetailFetchError => "Detail page fetch error",
            ErrorType::ListingRowParseError => "Listing row parse error",
            ErrorType::DateParseError => "Listing date parse error",
            ErrorType::ProviderError => "Provider scrape error",
            ErrorType::OverpassQueryError => "Overpass query error",
            ErrorType::OutageWriteError => "Outage write error",
        }
    }
}

impl std::fmt::Display for InfoType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl InfoType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InfoType::PastOutageSkipped => "Past outage skipped",
            InfoType::UndatedRowSkipped => "Listing row without a date skipped",
            InfoType::EmptyFragmentSkipped => "Empty description fragment skipped",
            InfoType::UnchangedPage => "Unchanged detail page",
            InfoType::UnlocatedFragment => "Fragment without a located street",
            InfoType::DuplicateWaySkipped => "Way returned for several districts",
        }
    }
}
