//! Command runners.
//!
//! Each runner opens the database (applying migrations), builds what its
//! stage needs from the [`Config`](crate::Config), runs the stage and prints
//! the collected statistics.

mod scrape;
mod seed;
mod streets;

pub use scrape::run_scrape;
pub use seed::{run_setup_cities, run_setup_districts};
pub use streets::run_update_streets;
