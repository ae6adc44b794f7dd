use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub youtube: YouTubeConfig,
    pub groq: GroqConfig,
    pub crawl: CrawlConfig,
    pub sink: SinkConfig,
    pub directories: DirectoryConfig,
    pub logging: LoggingConfig,
}

/// Credentials stay optional here; a missing key surfaces as an error on
/// the first call that needs it, not at startup.
#[derive(Debug, Clone)]
pub struct YouTubeConfig {
    pub api_key: Option<String>,
    pub base_url: String,
}

#[derive(Debug, Clone)]
pub struct GroqConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

#[derive(Debug, Clone)]
pub struct CrawlConfig {
    pub page_size: u8,
    pub analysis_delay: Duration,
}

#[derive(Debug, Clone)]
pub struct SinkConfig {
    pub log_filename: String,
    pub report_filename: String,
}

#[derive(Debug, Clone)]
pub struct DirectoryConfig {
    pub logs_dir: String,
    pub data_dir: String,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for environment variable {0}")]
    Invalid(&'static str),
}
