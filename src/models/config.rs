//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP and collection behavior settings
    #[serde(default)]
    pub crawler: CrawlerConfig,

    /// Input/output file locations
    #[serde(default)]
    pub paths: PathsConfig,

    /// Logging and progress settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.crawler.user_agent.trim().is_empty() {
            return Err(AppError::validation("crawler.user_agent is empty"));
        }
        if self.crawler.timeout_secs == 0 {
            return Err(AppError::validation("crawler.timeout_secs must be > 0"));
        }
        if self.crawler.max_concurrent == 0 {
            return Err(AppError::validation("crawler.max_concurrent must be > 0"));
        }
        if self.crawler.max_attempts == Some(0) {
            return Err(AppError::validation(
                "crawler.max_attempts must be > 0 when set",
            ));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            crawler: CrawlerConfig::default(),
            paths: PathsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// HTTP client and collection behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Accept header sent with every request
    #[serde(default = "defaults::accept")]
    pub accept: String,

    /// Accept-Language header sent with every request
    #[serde(default = "defaults::accept_language")]
    pub accept_language: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Delay between merged completions in milliseconds
    #[serde(default = "defaults::request_delay")]
    pub request_delay_ms: u64,

    /// Maximum concurrent detail fetches
    #[serde(default = "defaults::max_concurrent")]
    pub max_concurrent: usize,

    /// Cap on fetch+parse attempts per course page.
    /// Absent means retry without limit.
    #[serde(default)]
    pub max_attempts: Option<u64>,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            accept: defaults::accept(),
            accept_language: defaults::accept_language(),
            timeout_secs: defaults::timeout(),
            request_delay_ms: defaults::request_delay(),
            max_concurrent: defaults::max_concurrent(),
            max_attempts: None,
        }
    }
}

/// Input and output file locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Stub CSV produced by the catalog list crawler
    #[serde(default = "defaults::input_csv")]
    pub input_csv: PathBuf,

    /// Directory receiving all output files
    #[serde(default = "defaults::output_dir")]
    pub output_dir: PathBuf,

    /// File name of the full course CSV
    #[serde(default = "defaults::courses_csv")]
    pub courses_csv: String,

    /// File name of the subject-group CSV
    #[serde(default = "defaults::groups_csv")]
    pub groups_csv: String,

    /// File name of the run statistics JSON
    #[serde(default = "defaults::stats_json")]
    pub stats_json: String,
}

impl PathsConfig {
    pub fn courses_path(&self) -> PathBuf {
        self.output_dir.join(&self.courses_csv)
    }

    pub fn groups_path(&self) -> PathBuf {
        self.output_dir.join(&self.groups_csv)
    }

    pub fn stats_path(&self) -> PathBuf {
        self.output_dir.join(&self.stats_json)
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            input_csv: defaults::input_csv(),
            output_dir: defaults::output_dir(),
            courses_csv: defaults::courses_csv(),
            groups_csv: defaults::groups_csv(),
            stats_json: defaults::stats_json(),
        }
    }
}

/// Logging and progress-reporting settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default log level when RUST_LOG is not set
    #[serde(default = "defaults::log_level")]
    pub level: String,

    /// Render a progress bar during collection
    #[serde(default = "defaults::show_progress")]
    pub show_progress: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
            show_progress: defaults::show_progress(),
        }
    }
}

mod defaults {
    use std::path::PathBuf;

    // Crawler defaults: the identity headers the catalog is served with
    pub fn user_agent() -> String {
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64)".into()
    }
    pub fn accept() -> String {
        "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8".into()
    }
    pub fn accept_language() -> String {
        "en-US,en;q=0.8".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn request_delay() -> u64 {
        0
    }
    pub fn max_concurrent() -> usize {
        10
    }

    // Path defaults
    pub fn input_csv() -> PathBuf {
        PathBuf::from("data/openedu_courses_base_info.csv")
    }
    pub fn output_dir() -> PathBuf {
        PathBuf::from("data")
    }
    pub fn courses_csv() -> String {
        "openedu_courses_full_info.csv".into()
    }
    pub fn groups_csv() -> String {
        "openedu_groups_map.csv".into()
    }
    pub fn stats_json() -> String {
        "collect_stats.json".into()
    }

    // Logging defaults
    pub fn log_level() -> String {
        "info".into()
    }
    pub fn show_progress() -> bool {
        true
    }
}
