use anyhow::{Context, Result};
use reqwest::Client;

use crate::config::GroqConfig;

use super::inference::{build_request, parse_response};

#[derive(Clone)]
pub struct GroqClient {
    http: Client,
    config: GroqConfig,
}

impl GroqClient {
    pub fn new(http: Client, config: GroqConfig) -> Self {
        Self { http, config }
    }

    /// One chat completion, returning the raw text of the first choice.
    /// Both classification stages go through here; neither retries.
    pub async fn complete(&self, prompt: &str) -> Result<String> {
        let api_key = self
            .config
            .api_key
            .as_ref()
            .context("GROQ_API_KEY must be configured for spam classification")?;

        let request = build_request(self.config.model.clone(), prompt);
        let response = self
            .http
            .post(format!("{}/chat/completions", self.config.base_url))
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?
            .error_for_status()?;

        parse_response(response).await
    }
}
