pub mod client;
pub mod inference;

pub use client::GroqClient;
pub use inference::{extract_json, ExtractError};
