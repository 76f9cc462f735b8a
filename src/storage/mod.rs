// storage/mod.rs
// Database operations module

pub mod hash_sum;
pub mod migrations;
pub mod models;
pub mod outages;
pub mod pool;
pub mod seed;
pub mod streets;
#[cfg(test)]
pub(crate) mod test_helpers;

// Re-export commonly used items
pub use migrations::run_migrations;
pub use models::{City, District, Language, NewOutage, NewStreet, OutageRecord, Street, UtilityType};
pub use outages::{query_outages, replace_source_outages, OutageFilter};
pub use pool::init_db_pool_with_path;
pub use seed::{setup_cities, setup_districts, SeedData, SeedReport};
pub use streets::{apply_street_changes, load_districts, load_streets};
