use std::sync::Arc;

use anyhow::Result;
use serde::Deserialize;

use crate::ai::{extract_json, GroqClient};
use crate::domain::{ChannelRecord, ClassificationVerdict, ValidationVerdict};

const HEURISTIC_MAX_VIDEOS: u64 = 5;
const HEURISTIC_MIN_VIEWS: u64 = 10_000;
const HEURISTIC_REASONING: &str = "Heuristic: very few videos with high views.";

/// Reply schema of the re-evaluation prompt.
#[derive(Debug, Deserialize)]
struct ValidationReply {
    is_valid_bot: bool,
    validation_reasoning: String,
}

/// Stage 2: re-examines only candidates the classifier flagged. A channel
/// with almost no uploads but outsized views confirms on statistics alone;
/// everything else gets one more inference call. Any failure rejects the
/// candidate rather than failing the run.
pub struct Validator {
    groq: Arc<GroqClient>,
}

impl Validator {
    pub fn new(groq: Arc<GroqClient>) -> Self {
        Self { groq }
    }

    pub async fn validate(
        &self,
        record: &ChannelRecord,
        classification: &ClassificationVerdict,
    ) -> ValidationVerdict {
        if heuristic_confirms(record) {
            return ValidationVerdict {
                confirmed: true,
                reasoning: HEURISTIC_REASONING.to_string(),
            };
        }

        match self.try_revalidate(record, classification).await {
            Ok(verdict) => verdict,
            Err(err) => {
                tracing::warn!(
                    target: "validator",
                    error = %err,
                    channel_id = %record.channel_id,
                    "validation failed; rejecting candidate"
                );
                ValidationVerdict {
                    confirmed: false,
                    reasoning: format!("Validation failed: {err}"),
                }
            }
        }
    }

    async fn try_revalidate(
        &self,
        record: &ChannelRecord,
        classification: &ClassificationVerdict,
    ) -> Result<ValidationVerdict> {
        let reply = self
            .groq
            .complete(&build_prompt(record, classification))
            .await?;
        let decoded: ValidationReply = extract_json(&reply)?;
        Ok(ValidationVerdict {
            confirmed: decoded.is_valid_bot,
            reasoning: decoded.validation_reasoning,
        })
    }
}

fn heuristic_confirms(record: &ChannelRecord) -> bool {
    record.video_count < HEURISTIC_MAX_VIDEOS && record.view_count > HEURISTIC_MIN_VIEWS
}

fn build_prompt(record: &ChannelRecord, classification: &ClassificationVerdict) -> String {
    format!(
        r#"Re-evaluate this YouTube channel for spam bot characteristics. Focus on subtle signs of automation, engagement manipulation, or deceptive content.
- Channel title: {title}
- Description: {description}
- Subscriber count: {subscribers}
- Video count: {videos}
- View count: {views}
- Initial AI analysis: {initial_reasoning}

Is this channel definitively a spam bot? Respond with JSON only:
{{
    "is_valid_bot": true/false,
    "validation_reasoning": "brief explanation"
}}"#,
        title = record.title,
        description = record.description,
        subscribers = record.subscriber_count,
        videos = record.video_count,
        views = record.view_count,
        initial_reasoning = classification.reasoning,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(video_count: u64, view_count: u64) -> ChannelRecord {
        ChannelRecord {
            channel_id: "UC1".into(),
            title: "channel".into(),
            description: String::new(),
            subscriber_count: 100,
            video_count,
            view_count,
            found_via_query: "spam bot".into(),
            url: ChannelRecord::canonical_url("UC1"),
        }
    }

    #[test]
    fn heuristic_fires_on_few_videos_with_high_views() {
        assert!(heuristic_confirms(&record(2, 50_000)));
        assert!(heuristic_confirms(&record(4, 10_001)));
    }

    #[test]
    fn heuristic_requires_both_conditions() {
        assert!(!heuristic_confirms(&record(50, 200_000)));
        assert!(!heuristic_confirms(&record(2, 10_000)));
        assert!(!heuristic_confirms(&record(5, 50_000)));
    }
}
