//! Storage for catalog inputs and collected outputs.
//!
//! The collector reads one input table and produces three files:
//!
//! ```text
//! {output_dir}/
//! ├── openedu_courses_full_info.csv   # one row per course, 26 columns
//! ├── openedu_groups_map.csv          # subject-group taxonomy, ids ascending
//! └── collect_stats.json              # run statistics
//! ```
//!
//! Both CSV files start with a UTF-8 byte order mark so spreadsheet tools
//! pick the right encoding, and every file is written atomically.

pub mod csv;
pub mod local;

use chrono::{DateTime, Utc};

// Re-export for convenience
pub use local::LocalStorage;

/// Metadata about a storage write operation.
#[derive(Debug, Clone)]
pub struct WriteSummary {
    /// Number of course rows written
    pub courses_written: usize,
    /// Number of subject groups written
    pub groups_written: usize,
    /// Timestamp of the write
    pub timestamp: DateTime<Utc>,
}
