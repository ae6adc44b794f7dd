use reqwest::{Client, StatusCode};
use thiserror::Error;

use crate::config::YouTubeConfig;

use super::types::{ApiErrorEnvelope, ChannelDetails, ChannelListResponse, SearchListResponse};

const QUOTA_EXCEEDED_REASON: &str = "quotaExceeded";

#[derive(Debug, Error)]
pub enum SearchError {
    /// The per-day request budget is spent. Terminal for the whole crawl.
    #[error("search quota exhausted")]
    QuotaExceeded,
    #[error("api error {status}: {message}")]
    Api { status: StatusCode, message: String },
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("YOUTUBE_API_KEY must be configured before crawling")]
    MissingApiKey,
}

#[derive(Clone)]
pub struct YouTubeClient {
    http: Client,
    config: YouTubeConfig,
    page_size: u8,
}

impl YouTubeClient {
    pub fn new(http: Client, config: YouTubeConfig, page_size: u8) -> Self {
        Self {
            http,
            config,
            page_size,
        }
    }

    /// One page of channel-type search hits for a query, in API order.
    pub async fn search_channels(&self, query: &str) -> Result<Vec<String>, SearchError> {
        let api_key = self.api_key()?;
        let page_size = self.page_size.to_string();
        let response = self
            .http
            .get(format!("{}/search", self.config.base_url))
            .query(&[
                ("part", "snippet"),
                ("q", query),
                ("type", "channel"),
                ("maxResults", page_size.as_str()),
                ("key", api_key),
            ])
            .send()
            .await?;

        let listing: SearchListResponse = decode_or_api_error(response).await?;
        Ok(listing
            .items
            .into_iter()
            .filter_map(|item| item.id.channel_id)
            .collect())
    }

    /// Snippet + statistics lookup for a single channel id. `Ok(None)`
    /// when the API knows nothing about the id.
    pub async fn channel_details(&self, channel_id: &str) -> Result<Option<ChannelDetails>, SearchError> {
        let api_key = self.api_key()?;
        let response = self
            .http
            .get(format!("{}/channels", self.config.base_url))
            .query(&[
                ("part", "snippet,statistics"),
                ("id", channel_id),
                ("key", api_key),
            ])
            .send()
            .await?;

        let listing: ChannelListResponse = decode_or_api_error(response).await?;
        Ok(listing.items.into_iter().next())
    }

    fn api_key(&self) -> Result<&str, SearchError> {
        self.config
            .api_key
            .as_deref()
            .ok_or(SearchError::MissingApiKey)
    }
}

async fn decode_or_api_error<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, SearchError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json::<T>().await?);
    }

    let body = response.text().await.unwrap_or_default();
    Err(classify_api_error(status, &body))
}

/// Maps a non-2xx Data API response to a typed error. Quota exhaustion is
/// recognized from the structured `reason` field of the error envelope,
/// never from the message text.
fn classify_api_error(status: StatusCode, body: &str) -> SearchError {
    match serde_json::from_str::<ApiErrorEnvelope>(body) {
        Ok(envelope) => {
            if envelope
                .error
                .errors
                .iter()
                .any(|detail| detail.reason == QUOTA_EXCEEDED_REASON)
            {
                SearchError::QuotaExceeded
            } else {
                SearchError::Api {
                    status,
                    message: envelope.error.message,
                }
            }
        }
        Err(_) => SearchError::Api {
            status,
            message: body.chars().take(200).collect(),
        },
    }
}
