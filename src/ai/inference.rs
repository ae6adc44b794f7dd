use anyhow::{Context, Result};
use reqwest::Response;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub fn build_request(model: String, prompt: &str) -> ChatCompletionRequest {
    ChatCompletionRequest {
        model,
        messages: vec![ChatMessage {
            role: "user".into(),
            content: prompt.to_string(),
        }],
        // Near-deterministic; the rubric asks for JSON, not prose.
        temperature: 0.1,
        max_tokens: 500,
    }
}

pub async fn parse_response(response: Response) -> Result<String> {
    let completion: ChatCompletionResponse = response.json().await?;
    let choice = completion
        .choices
        .into_iter()
        .next()
        .context("completion response did not contain any choices")?;

    choice
        .message
        .and_then(|msg| msg.content)
        .context("completion response missing message content")
}

/// Pulls the single JSON object out of a free-text model reply and decodes
/// it strictly into the expected schema. The model is asked for JSON only,
/// but replies routinely carry prose around the object, so we take the
/// substring from the first `{` to the last `}` and decode that.
pub fn extract_json<T: DeserializeOwned>(raw: &str) -> Result<T, ExtractError> {
    let start = raw.find('{').ok_or(ExtractError::NoJsonObject)?;
    let end = raw.rfind('}').filter(|end| *end > start).ok_or(ExtractError::NoJsonObject)?;
    serde_json::from_str(&raw[start..=end]).map_err(ExtractError::Decode)
}

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("reply contains no JSON object")]
    NoJsonObject,
    #[error("reply JSON did not match the expected schema: {0}")]
    Decode(#[source] serde_json::Error),
}

#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: i32,
}

#[derive(Debug, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: Option<ChatCompletionMessage>,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionMessage {
    pub content: Option<String>,
}
