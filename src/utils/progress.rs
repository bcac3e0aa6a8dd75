// src/utils/progress.rs

//! Terminal progress reporting for long collection runs.

use indicatif::{ProgressBar, ProgressStyle};

/// Create a progress bar sized to the number of pages to collect.
///
/// Returns a hidden bar when progress display is disabled so call sites
/// never have to branch.
pub fn collection_bar(total: u64, enabled: bool) -> ProgressBar {
    if !enabled {
        return ProgressBar::hidden();
    }

    let bar = ProgressBar::new(total);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    bar
}
