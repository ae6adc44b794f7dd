use std::sync::Arc;

use crate::domain::ChannelRecord;
use crate::youtube::types::ChannelStatistics;
use crate::youtube::{SearchError, YouTubeClient};

/// Discovery stage: turns a keyword query into resolved channel records.
/// Quota exhaustion bubbles up typed so the runner can stop the crawl;
/// every other failure is the runner's decision to log and skip.
pub struct Crawler {
    youtube: Arc<YouTubeClient>,
}

impl Crawler {
    pub fn new(youtube: Arc<YouTubeClient>) -> Self {
        Self { youtube }
    }

    pub async fn search(&self, query: &str) -> Result<Vec<String>, SearchError> {
        self.youtube.search_channels(query).await
    }

    /// Detail lookup for one search hit. `Ok(None)` means the API had no
    /// record for the id; the hit is skipped without noise.
    pub async fn resolve(
        &self,
        channel_id: &str,
        query: &str,
    ) -> Result<Option<ChannelRecord>, SearchError> {
        let Some(details) = self.youtube.channel_details(channel_id).await? else {
            return Ok(None);
        };

        Ok(Some(ChannelRecord {
            channel_id: channel_id.to_string(),
            title: details.snippet.title,
            description: details.snippet.description,
            subscriber_count: ChannelStatistics::count(&details.statistics.subscriber_count),
            video_count: ChannelStatistics::count(&details.statistics.video_count),
            view_count: ChannelStatistics::count(&details.statistics.view_count),
            found_via_query: query.to_string(),
            url: ChannelRecord::canonical_url(channel_id),
        }))
    }
}
