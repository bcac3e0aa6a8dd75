//! Pipeline entry points for collector operations.
//!
//! - `run_collector`: Fetch detail pages for every course in the input table
//! - `run_validate`: Check the configuration and input table without fetching

pub mod collect;
pub mod validate;

pub use collect::run_collector;
pub use validate::run_validate;
