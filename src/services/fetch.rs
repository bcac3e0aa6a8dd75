// src/services/fetch.rs

//! Page fetching behind a trait so collection logic can run against scripted
//! responses in tests.

use async_trait::async_trait;
use reqwest::Client;

use crate::error::Result;
use crate::models::CrawlerConfig;
use crate::utils::http::create_async_client;

/// Source of raw HTML pages.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch one page and return its body as text.
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// Fetcher backed by a shared HTTP client.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &CrawlerConfig) -> Result<Self> {
        Ok(Self {
            client: create_async_client(config)?,
        })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }
}
