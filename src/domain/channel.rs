use serde::{Deserialize, Serialize};

/// One channel discovered through keyword search, resolved to its
/// snippet and statistics. Built once by the crawler and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelRecord {
    pub channel_id: String,
    pub title: String,
    pub description: String,
    pub subscriber_count: u64,
    pub video_count: u64,
    pub view_count: u64,
    pub found_via_query: String,
    pub url: String,
}

impl ChannelRecord {
    pub fn canonical_url(channel_id: &str) -> String {
        format!("https://www.youtube.com/channel/{channel_id}")
    }
}
