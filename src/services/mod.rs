//! Service layer for the crawler application.
//!
//! This module contains the business logic for:
//! - Course collection (`CourseCrawler`)
//! - Detail page parsing (`CoursePageParser`)
//! - Page fetching (`HttpFetcher`)

mod courses;
mod detail;
mod fetch;

pub use courses::{CollectOutcome, CourseCrawler};
pub use detail::{CoursePageParser, PageParser, ParsedPage};
pub use fetch::{HttpFetcher, PageFetcher};
