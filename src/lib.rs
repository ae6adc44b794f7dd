pub mod ai;
pub mod app;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod pipeline;
pub mod youtube;
