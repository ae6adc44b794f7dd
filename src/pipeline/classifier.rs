use std::sync::Arc;

use anyhow::{bail, Result};

use crate::ai::{extract_json, GroqClient};
use crate::domain::{ChannelRecord, ClassificationVerdict};

/// Stage 1: one rubric-driven inference call per candidate. A failed call
/// or an unparseable reply yields no verdict, which downstream treats the
/// same as "not spam". No retries.
pub struct Classifier {
    groq: Arc<GroqClient>,
}

impl Classifier {
    pub fn new(groq: Arc<GroqClient>) -> Self {
        Self { groq }
    }

    pub async fn classify(&self, record: &ChannelRecord) -> Option<ClassificationVerdict> {
        match self.try_classify(record).await {
            Ok(verdict) => Some(verdict),
            Err(err) => {
                tracing::warn!(
                    target: "classifier",
                    error = %err,
                    channel_id = %record.channel_id,
                    title = %record.title,
                    "classification failed; treating channel as not spam"
                );
                None
            }
        }
    }

    async fn try_classify(&self, record: &ChannelRecord) -> Result<ClassificationVerdict> {
        let reply = self.groq.complete(&build_prompt(record)).await?;
        let verdict: ClassificationVerdict = extract_json(&reply)?;
        if !(0.0..=1.0).contains(&verdict.confidence) {
            bail!("confidence {} outside [0, 1]", verdict.confidence);
        }
        Ok(verdict)
    }
}

fn build_prompt(record: &ChannelRecord) -> String {
    format!(
        r#"Analyze this YouTube channel and determine if it's a spam bot. Consider:
- Channel title: {title}
- Description: {description}
- Subscriber count: {subscribers}
- Video count: {videos}
- View count: {views}

Look for signs of:
1. Adult content promotion (OnlyFans, webcam, explicit content)
2. Crypto/financial scams (free Bitcoin, generators, hacks)
3. General spam patterns (fake accounts, sub4sub, suspicious engagement)
4. UTTP/raid bots

Respond with JSON only:
{{
    "is_spam_bot": true/false,
    "confidence": 0.0-1.0,
    "bot_type": "adult_content" | "crypto_scam" | "general_spam" | "uttp_bot",
    "reasoning": "brief explanation",
    "risk_level": "low" | "medium" | "high"
}}"#,
        title = record.title,
        description = record.description,
        subscribers = record.subscriber_count,
        videos = record.video_count,
        views = record.view_count,
    )
}
