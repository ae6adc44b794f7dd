pub mod client;
pub mod types;

pub use client::{SearchError, YouTubeClient};
pub use types::ChannelDetails;
