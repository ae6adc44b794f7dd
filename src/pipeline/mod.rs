pub mod classifier;
pub mod crawler;
pub mod queries;
pub mod runner;
pub mod sink;
pub mod validator;

pub use classifier::Classifier;
pub use crawler::Crawler;
pub use queries::SEARCH_QUERIES;
pub use runner::{RunController, RunSummary};
pub use sink::ResultSink;
pub use validator::Validator;
