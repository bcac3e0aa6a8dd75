// src/pipeline/collect.rs

//! Course collection pipeline.

use std::sync::Arc;

use chrono::Utc;

use crate::error::{AppError, Result};
use crate::models::{CollectStats, Config};
use crate::services::{CourseCrawler, PageFetcher, PageParser};
use crate::storage::LocalStorage;

/// Run the course collector against the live catalog.
pub async fn run_collector(config: &Config) -> Result<()> {
    let crawler = CourseCrawler::new(Arc::new(config.clone()))?;
    collect_with(config, crawler).await
}

/// Collect with an explicit crawler, so the pipeline can run against
/// scripted page sources.
async fn collect_with<F, P>(config: &Config, crawler: CourseCrawler<F, P>) -> Result<()>
where
    F: PageFetcher,
    P: PageParser,
{
    let started_at = Utc::now();
    log::info!("Course collection starting");

    let storage = LocalStorage::new(config.paths.clone());
    let stubs = storage.read_stubs().await?;
    log::info!(
        "Loaded {} course stubs from {}",
        stubs.len(),
        config.paths.input_csv.display()
    );

    for stub in &stubs {
        stub.validate()
            .map_err(|error| AppError::validation(format!("stub {:?}: {error}", stub.url)))?;
    }

    let outcome = crawler.collect(stubs).await?;

    let stats = CollectStats {
        started_at,
        finished_at: Utc::now(),
        course_count: outcome.courses.len(),
        group_count: outcome.groups.len(),
    };

    let summary = storage
        .write_catalog(&outcome.courses, &outcome.groups, &stats)
        .await?;

    log::info!(
        "Saved {} courses and {} subject groups in {}s",
        summary.courses_written,
        summary.groups_written,
        stats.duration_secs()
    );
    if outcome.retries > 0 {
        log::info!("Spent {} extra attempts on flaky pages", outcome.retries);
    }

    Ok(())
}
