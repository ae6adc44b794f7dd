pub mod channel;
pub mod verdict;

pub use channel::ChannelRecord;
pub use verdict::{BotCategory, ClassificationVerdict, ConfirmedBot, RiskLevel, ValidationVerdict};
