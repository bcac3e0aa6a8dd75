// src/models/mod.rs

//! Domain models for the collector application.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod course;
mod group;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Re-export all public types
pub use config::{Config, CrawlerConfig, LoggingConfig, PathsConfig};
pub use course::{CourseDetail, CourseRecord, CourseStub, OUTPUT_FIELDS};
pub use group::{GroupMap, SubjectGroup};

/// Timing and counts for one collection run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectStats {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,

    /// Records produced (one per input stub)
    pub course_count: usize,

    /// Distinct subject groups discovered across all pages
    pub group_count: usize,
}

impl CollectStats {
    /// Wall-clock duration of the run in seconds.
    pub fn duration_secs(&self) -> i64 {
        (self.finished_at - self.started_at).num_seconds()
    }
}
