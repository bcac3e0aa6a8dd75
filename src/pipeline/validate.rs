// src/pipeline/validate.rs

//! Pre-flight validation pipeline.

use crate::error::{AppError, Result};
use crate::models::Config;
use crate::storage::LocalStorage;

/// Validate the configuration and the input table without fetching anything.
///
/// Every row is checked so a single bad URL does not hide the rest; the run
/// fails if any row is unusable.
pub async fn run_validate(config: &Config) -> Result<()> {
    config.validate()?;
    log::info!(
        "Config OK: {} workers, {}s timeout, retry cap {}",
        config.crawler.max_concurrent,
        config.crawler.timeout_secs,
        config
            .crawler
            .max_attempts
            .map_or("none".to_string(), |cap| cap.to_string())
    );

    let storage = LocalStorage::new(config.paths.clone());
    let stubs = storage.read_stubs().await?;

    let mut invalid = 0usize;
    for (row, stub) in stubs.iter().enumerate() {
        if let Err(error) = stub.validate() {
            invalid += 1;
            log::warn!("Row {}: {}", row + 1, error);
        }
    }

    log::info!("Input OK: {} course stubs, {} invalid", stubs.len(), invalid);

    if invalid > 0 {
        return Err(AppError::validation(format!(
            "{invalid} unusable rows in input table"
        )));
    }
    Ok(())
}
