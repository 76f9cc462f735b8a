//! Small helpers shared by the scraping and sync pipelines.

mod retry;
mod selector;

pub use retry::retry_if_transient;
pub use selector::{element_text, parse_selector_unsafe};
