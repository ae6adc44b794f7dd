use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::channel::ChannelRecord;

/// Stage-1 verdict decoded from the classification reply. A run never
/// holds a verdict with out-of-range confidence; the classifier rejects
/// those as decode failures before they reach the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationVerdict {
    pub is_spam_bot: bool,
    pub confidence: f64,
    pub bot_type: BotCategory,
    pub reasoning: String,
    pub risk_level: RiskLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BotCategory {
    AdultContent,
    CryptoScam,
    GeneralSpam,
    UttpBot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// Stage-2 verdict. Always produced for a spam-flagged candidate, either
/// by the statistics heuristic or by the second inference call; failures
/// collapse to `confirmed = false` with the failure as reasoning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationVerdict {
    pub confirmed: bool,
    pub reasoning: String,
}

/// A channel that survived both stages. Appended to the durable log the
/// moment it is created and kept in memory for the final report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfirmedBot {
    #[serde(flatten)]
    pub channel: ChannelRecord,
    pub ai_analysis: ClassificationVerdict,
    pub validation: ValidationVerdict,
    pub detected_at: DateTime<Utc>,
}

impl ConfirmedBot {
    pub fn new(
        channel: ChannelRecord,
        ai_analysis: ClassificationVerdict,
        validation: ValidationVerdict,
    ) -> Self {
        Self {
            channel,
            ai_analysis,
            validation,
            detected_at: Utc::now(),
        }
    }
}
