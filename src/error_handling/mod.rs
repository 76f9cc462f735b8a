//! Error handling and processing statistics.
//!
//! This module provides:
//! - Error type definitions for each pipeline concern
//! - Processing statistics tracking (errors and info metrics)
//! - Retry strategy configuration
//!
//! Counters are categorized into:
//! - **Errors**: Failures that dropped a page, a row or a district
//! - **Info**: Notable events that are expected (past rows, unchanged pages, etc.)

mod categorization;
mod stats;
mod types;

// Re-export public API
pub use categorization::{get_retry_strategy, is_retriable_error};
pub use stats::ProcessingStats;
pub use types::{
    DatabaseError, ErrorType, GetOutagesError, InfoType, InitializationError, OverpassError,
    ScrapeError,
};

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_processing_stats_initialization() {
        let stats = ProcessingStats::new();
        for error_type in ErrorType::iter() {
            assert_eq!(stats.get_error_count(error_type), 0);
        }
        for info_type in InfoType::iter() {
            assert_eq!(stats.get_info_count(info_type), 0);
        }
    }

    #[test]
    fn test_processing_stats_increment() {
        let stats = ProcessingStats::new();
        stats.increment_error(ErrorType::DateParseError);
        assert_eq!(stats.get_error_count(ErrorType::DateParseError), 1);

        stats.increment_info(InfoType::UnchangedPage);
        assert_eq!(stats.get_info_count(InfoType::UnchangedPage), 1);
    }

    #[test]
    fn test_processing_stats_totals() {
        let stats = ProcessingStats::new();
        stats.increment_error(ErrorType::DetailFetchError);
        stats.increment_error(ErrorType::OverpassQueryError);
        stats.increment_info(InfoType::PastOutageSkipped);

        assert_eq!(stats.total_errors(), 2);
        assert_eq!(stats.total_info(), 1);
    }
}
