//! # Logging
//!
//! File-based `tracing` setup. The TUI owns the terminal, so log output goes
//! to `bannergen.log` in the platform data directory unless a path is given.
//! The filter is read from `RUST_LOG` and defaults to `info`.

use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

/// Default location of the log file.
pub fn default_log_path() -> Result<PathBuf> {
    let dirs = directories::ProjectDirs::from("", "", "bannergen")
        .context("Could not determine data directory")?;
    Ok(dirs.data_local_dir().join("bannergen.log"))
}

/// Install the global subscriber writing to `path` (or the default
/// location). Returns the path actually used.
pub fn init(path: Option<&Path>) -> Result<PathBuf> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => default_log_path()?,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install log subscriber: {}", e))?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Logging initialized");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_path_file_name() {
        if let Ok(path) = default_log_path() {
            assert_eq!(
                path.file_name().and_then(|n| n.to_str()),
                Some("bannergen.log")
            );
        }
    }
}
