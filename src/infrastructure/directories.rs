use std::{fs, path::PathBuf};

use anyhow::{Context, Result};

use crate::config::{DirectoryConfig, SinkConfig};

#[derive(Debug, Clone)]
pub struct ResolvedPaths {
    pub logs_dir: PathBuf,
    pub data_dir: PathBuf,
    pub detection_log_path: PathBuf,
    pub report_path: PathBuf,
}

pub fn ensure_directories(dirs: &DirectoryConfig, sink: &SinkConfig) -> Result<ResolvedPaths> {
    let logs_dir = ensure_dir(&dirs.logs_dir)?;
    let data_dir = ensure_dir(&dirs.data_dir)?;

    // Fail at startup if the data dir is not writable, rather than at the
    // first confirmed detection.
    let probe_file = data_dir.join(".write-test");
    fs::write(&probe_file, b"ok")?;
    fs::remove_file(&probe_file)?;

    Ok(ResolvedPaths {
        detection_log_path: data_dir.join(&sink.log_filename),
        report_path: data_dir.join(&sink.report_filename),
        logs_dir,
        data_dir,
    })
}

fn ensure_dir(path: &str) -> Result<PathBuf> {
    let dir = PathBuf::from(path);
    if !dir.exists() {
        fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create directory {}", path))?;
    }
    Ok(dir.canonicalize().unwrap_or(dir))
}
