use std::env;
use std::time::Duration;

use super::env::{
    AppConfig, ConfigError, CrawlConfig, DirectoryConfig, GroqConfig, LoggingConfig, SinkConfig,
    YouTubeConfig,
};

pub fn load_config() -> Result<AppConfig, ConfigError> {
    AppConfig::from_env()
}

impl AppConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let youtube = YouTubeConfig {
            api_key: env::var("YOUTUBE_API_KEY").ok().filter(|v| !v.is_empty()),
            base_url: env::var("YOUTUBE_BASE_URL")
                .unwrap_or_else(|_| "https://www.googleapis.com/youtube/v3".to_string()),
        };

        let groq = GroqConfig {
            api_key: env::var("GROQ_API_KEY").ok().filter(|v| !v.is_empty()),
            model: env::var("GROQ_MODEL").unwrap_or_else(|_| "llama-3.1-8b-instant".to_string()),
            base_url: env::var("GROQ_BASE_URL")
                .unwrap_or_else(|_| "https://api.groq.com/openai/v1".to_string()),
        };

        let crawl = CrawlConfig {
            page_size: parse_int::<u8>("SEARCH_PAGE_SIZE")?.unwrap_or(10),
            analysis_delay: Duration::from_millis(
                parse_int::<u64>("ANALYSIS_DELAY_MS")?.unwrap_or(1_000),
            ),
        };

        let sink = SinkConfig {
            log_filename: env::var("DETECTION_LOG_FILENAME")
                .unwrap_or_else(|_| "detected_bots.jsonl".to_string()),
            report_filename: env::var("DETECTION_REPORT_FILENAME")
                .unwrap_or_else(|_| "detected_bots_report.json".to_string()),
        };

        let directories = DirectoryConfig {
            logs_dir: env::var("LOGS_DIR").unwrap_or_else(|_| "logs".to_string()),
            data_dir: env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string()),
        };

        let logging = LoggingConfig {
            level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        };

        Ok(Self {
            youtube,
            groq,
            crawl,
            sink,
            directories,
            logging,
        })
    }
}

fn parse_int<T: std::str::FromStr>(key: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(key) {
        Ok(value) => value
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::Invalid(key)),
        Err(_) => Ok(None),
    }
}
