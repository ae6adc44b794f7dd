use std::path::PathBuf;

use anyhow::{Context, Result};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

use crate::domain::ConfirmedBot;

/// Persistence for confirmed detections. Every confirmation is appended
/// to an NDJSON log the moment it is recorded, so a crash later in the
/// run cannot lose it; the in-memory sequence only feeds the final report.
pub struct ResultSink {
    log_path: PathBuf,
    report_path: PathBuf,
    confirmed: Vec<ConfirmedBot>,
}

impl ResultSink {
    /// Opens the sink for a fresh run, truncating any previous append-log.
    pub async fn open(log_path: PathBuf, report_path: PathBuf) -> Result<Self> {
        fs::write(&log_path, b"")
            .await
            .with_context(|| format!("failed to reset detection log {}", log_path.display()))?;
        Ok(Self {
            log_path,
            report_path,
            confirmed: Vec::new(),
        })
    }

    /// Appends one detection. The file is opened and closed per call; the
    /// log line lands before the in-memory push so the log is never
    /// missing an entry the report would contain.
    pub async fn record(&mut self, bot: ConfirmedBot) -> Result<()> {
        let mut line = serde_json::to_string(&bot)?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.log_path)
            .await
            .with_context(|| format!("failed to open detection log {}", self.log_path.display()))?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;
        drop(file);

        self.confirmed.push(bot);
        Ok(())
    }

    /// Writes the aggregate report, overwriting any previous run's file.
    /// Also runs after a quota abort, so the report always reflects what
    /// the append-log already holds.
    pub async fn finalize(&self) -> Result<()> {
        let report = serde_json::to_string_pretty(&self.confirmed)?;
        fs::write(&self.report_path, report).await.with_context(|| {
            format!("failed to write final report {}", self.report_path.display())
        })?;
        Ok(())
    }

    pub fn confirmed(&self) -> &[ConfirmedBot] {
        &self.confirmed
    }
}
