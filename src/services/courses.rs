// src/services/courses.rs

//! Course collection service.
//!
//! Fans detail-page jobs out over a bounded pool and merges results on a
//! single consumer loop as pages complete, so the record list and the group
//! map are never touched concurrently.

use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, StreamExt};

use crate::error::{AppError, Result};
use crate::models::{Config, CourseRecord, CourseStub, GroupMap};
use crate::services::detail::{CoursePageParser, PageParser, ParsedPage};
use crate::services::fetch::{HttpFetcher, PageFetcher};
use crate::utils::progress::collection_bar;

/// Summary of a collection run.
#[derive(Debug, Default)]
pub struct CollectOutcome {
    pub courses: Vec<CourseRecord>,
    pub groups: GroupMap,
    /// Pages fetched and parsed successfully
    pub pages_collected: u64,
    /// Extra attempts spent on pages that eventually succeeded
    pub retries: u64,
}

/// Service for collecting course details from the catalog.
pub struct CourseCrawler<F = HttpFetcher, P = CoursePageParser> {
    config: Arc<Config>,
    fetcher: F,
    parser: P,
}

impl CourseCrawler {
    /// Create a crawler backed by a live HTTP client.
    pub fn new(config: Arc<Config>) -> Result<Self> {
        let fetcher = HttpFetcher::new(&config.crawler)?;
        let parser = CoursePageParser::new()?;
        Ok(Self {
            config,
            fetcher,
            parser,
        })
    }
}

impl<F: PageFetcher, P: PageParser> CourseCrawler<F, P> {
    /// Create a crawler over explicit page sources.
    pub fn with_source(config: Arc<Config>, fetcher: F, parser: P) -> Self {
        Self {
            config,
            fetcher,
            parser,
        }
    }

    /// Collect details for every stub concurrently.
    ///
    /// Results are merged in completion order; the `index` column keeps the
    /// catalog identity of each row.
    pub async fn collect(&self, stubs: Vec<CourseStub>) -> Result<CollectOutcome> {
        let delay = Duration::from_millis(self.config.crawler.request_delay_ms);
        let concurrency = self.config.crawler.max_concurrent.max(1);
        let progress = collection_bar(stubs.len() as u64, self.config.logging.show_progress);

        let mut outcome = CollectOutcome::default();
        let mut pages = stream::iter(stubs)
            .map(|stub| async move {
                let result = self.fetch_and_parse(&stub.url).await;
                (stub, result)
            })
            .buffer_unordered(concurrency);

        while let Some((stub, result)) = pages.next().await {
            let (page, attempts) = result?;
            outcome.pages_collected += 1;
            outcome.retries += attempts - 1;
            outcome.groups.extend(page.groups);
            outcome.courses.push(CourseRecord::merge(stub, page.detail));
            progress.inc(1);

            if delay.as_millis() > 0 {
                tokio::time::sleep(delay).await;
            }
        }

        progress.finish_and_clear();
        Ok(outcome)
    }

    /// Fetch and parse one course page, retrying on any failure.
    ///
    /// Network and parse failures are treated alike: the page is assumed to
    /// be transiently broken and is requested again. With no attempt cap
    /// configured this loops until the page yields.
    async fn fetch_and_parse(&self, url: &str) -> Result<(ParsedPage, u64)> {
        let mut attempts: u64 = 0;

        loop {
            attempts += 1;
            match self.try_once(url).await {
                Ok(page) => return Ok((page, attempts)),
                Err(error) => {
                    log::debug!("Attempt {attempts} failed for {url}: {error}");
                    if let Some(cap) = self.config.crawler.max_attempts {
                        if attempts >= cap {
                            return Err(AppError::RetriesExhausted {
                                url: url.to_string(),
                                attempts,
                            });
                        }
                    }
                }
            }
        }
    }

    async fn try_once(&self, url: &str) -> Result<ParsedPage> {
        let html = self.fetcher.fetch(url).await?;
        self.parser.parse(&html)
    }
}
