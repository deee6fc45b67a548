use std::fs::{self, OpenOptions};
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::config::{self, LogSettings};

/// Send `tracing` output to the log file. The terminal belongs to the view.
///
/// Returns the path written to.
pub fn init(settings: &LogSettings) -> Result<PathBuf> {
    let log_path = settings.file.clone().unwrap_or_else(config::default_log_path);
    if let Some(dir) = log_path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
    }

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {}", log_path.display()))?;

    // RUST_LOG wins over the configured filter.
    let log_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| settings.filter.clone());
    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(log_filter.as_str())
        .with_ansi(false)
        .init();

    Ok(log_path)
}
