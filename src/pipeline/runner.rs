use std::time::Duration;

use anyhow::Result;
use tokio::time::sleep;

use crate::domain::ConfirmedBot;
use crate::youtube::SearchError;

use super::{Classifier, Crawler, ResultSink, Validator};

#[derive(Debug, Clone, Copy, Default)]
pub struct RunSummary {
    pub total_analyzed: usize,
    pub total_confirmed: usize,
    pub quota_exhausted: bool,
}

/// Drives one batch run: discovery, classification, validation and
/// persistence, strictly one candidate at a time. Quota exhaustion stops
/// the crawl but still reaches the final report; every other failure
/// degrades the single candidate or query it hit.
pub struct RunController {
    crawler: Crawler,
    classifier: Classifier,
    validator: Validator,
    sink: ResultSink,
    queries: Vec<String>,
    analysis_delay: Duration,
}

impl RunController {
    pub fn new(
        crawler: Crawler,
        classifier: Classifier,
        validator: Validator,
        sink: ResultSink,
        queries: Vec<String>,
        analysis_delay: Duration,
    ) -> Self {
        Self {
            crawler,
            classifier,
            validator,
            sink,
            queries,
            analysis_delay,
        }
    }

    pub async fn run(mut self) -> Result<RunSummary> {
        let mut summary = RunSummary::default();

        'queries: for query in &self.queries {
            tracing::info!(target: "runner", %query, "searching for channels");

            let hits = match self.crawler.search(query).await {
                Ok(hits) => hits,
                Err(SearchError::QuotaExceeded) => {
                    tracing::warn!(target: "runner", %query, "search quota exhausted; stopping crawl");
                    summary.quota_exhausted = true;
                    break 'queries;
                }
                Err(err) => {
                    tracing::error!(target: "runner", %query, error = %err, "search failed; skipping query");
                    continue;
                }
            };

            for channel_id in hits {
                let record = match self.crawler.resolve(&channel_id, query).await {
                    Ok(Some(record)) => record,
                    Ok(None) => continue,
                    Err(SearchError::QuotaExceeded) => {
                        tracing::warn!(target: "runner", %query, "quota exhausted during detail lookup; stopping crawl");
                        summary.quota_exhausted = true;
                        break 'queries;
                    }
                    Err(err) => {
                        tracing::error!(target: "runner", %query, error = %err, "detail lookup failed; abandoning query");
                        continue 'queries;
                    }
                };

                summary.total_analyzed += 1;
                tracing::info!(
                    target: "runner",
                    analyzed = summary.total_analyzed,
                    title = %record.title,
                    "analyzing channel"
                );

                if let Some(classification) = self.classifier.classify(&record).await {
                    if classification.is_spam_bot {
                        let validation = self.validator.validate(&record, &classification).await;
                        if validation.confirmed {
                            let bot = ConfirmedBot::new(record, classification, validation);
                            report_detection(&bot, summary.total_confirmed + 1);
                            self.sink.record(bot).await?;
                            summary.total_confirmed += 1;
                        } else {
                            tracing::info!(
                                target: "runner",
                                title = %record.title,
                                reasoning = %validation.reasoning,
                                "candidate failed validation"
                            );
                        }
                    }
                }

                sleep(self.analysis_delay).await;
            }
        }

        self.sink.finalize().await?;

        tracing::info!(
            target: "runner",
            total_analyzed = summary.total_analyzed,
            total_confirmed = summary.total_confirmed,
            quota_exhausted = summary.quota_exhausted,
            "sweep complete"
        );
        Ok(summary)
    }
}

fn report_detection(bot: &ConfirmedBot, ordinal: usize) {
    tracing::info!(
        target: "runner",
        ordinal,
        title = %bot.channel.title,
        bot_type = ?bot.ai_analysis.bot_type,
        confidence = bot.ai_analysis.confidence,
        risk = ?bot.ai_analysis.risk_level,
        url = %bot.channel.url,
        subscribers = bot.channel.subscriber_count,
        videos = bot.channel.video_count,
        "spam bot confirmed"
    );
}
