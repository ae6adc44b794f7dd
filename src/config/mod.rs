pub mod env;
mod loader;

pub use env::{AppConfig, CrawlConfig, DirectoryConfig, GroqConfig, SinkConfig, YouTubeConfig};
pub use loader::load_config;
