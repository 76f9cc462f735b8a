//! Main application helpers shared by the command runners.

pub mod statistics;

pub use statistics::print_error_statistics;
