use std::sync::Arc;

use anyhow::Result;
use reqwest::Client;

use crate::{
    ai::GroqClient,
    config::AppConfig,
    infrastructure::directories::ResolvedPaths,
    pipeline::{queries, Classifier, Crawler, ResultSink, RunController, Validator},
    youtube::YouTubeClient,
};

pub struct SweepApp {
    config: Arc<AppConfig>,
    paths: ResolvedPaths,
    youtube: Arc<YouTubeClient>,
    groq: Arc<GroqClient>,
}

impl SweepApp {
    pub fn initialize(config: AppConfig, paths: ResolvedPaths) -> Result<Self> {
        let config = Arc::new(config);

        let http_client = Client::builder()
            .user_agent(format!("botsweep/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        let youtube = Arc::new(YouTubeClient::new(
            http_client.clone(),
            config.youtube.clone(),
            config.crawl.page_size,
        ));
        let groq = Arc::new(GroqClient::new(http_client, config.groq.clone()));

        Ok(Self {
            config,
            paths,
            youtube,
            groq,
        })
    }

    pub async fn run(self) -> Result<()> {
        tracing::info!("starting AI-powered spam bot sweep");

        let sink = ResultSink::open(
            self.paths.detection_log_path.clone(),
            self.paths.report_path.clone(),
        )
        .await?;

        let controller = RunController::new(
            Crawler::new(self.youtube.clone()),
            Classifier::new(self.groq.clone()),
            Validator::new(self.groq),
            sink,
            queries::default_queries(),
            self.config.crawl.analysis_delay,
        );

        let summary = controller.run().await?;

        tracing::info!(
            total_analyzed = summary.total_analyzed,
            total_confirmed = summary.total_confirmed,
            report = %self.paths.report_path.display(),
            "sweep finished"
        );
        Ok(())
    }
}
