//! # Settings File
//!
//! Settings live in one JSON document, `config.json` under the platform
//! config directory (`~/.config/bannergen/` on Linux). Each key is optional;
//! an absent key takes its default and an unrecognized key is an error.
//!
//! ```json
//! { "theme": "Catppuccin Mocha", "endpoint": "https://...", "timeout_secs": 250 }
//! ```
//!
//! Command-line flags are applied on top with [`Config::with_overrides`] and
//! are never written back; only the theme is persisted from a session.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::client::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECS};
use crate::ui::theme::Theme;

const FILE_NAME: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Built-in theme name, matched case-insensitively
    pub theme: String,
    /// Copy-generation webhook URL
    pub endpoint: String,
    /// Upper bound on one generation request, in seconds
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: Theme::default_theme().name.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Location of the settings file for this user.
    pub fn path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("", "", "bannergen")
            .context("No home directory to hold settings")?;
        Ok(dirs.config_dir().join(FILE_NAME))
    }

    /// Settings for this user, or the defaults when the file is absent or
    /// unreadable.
    pub fn load() -> Self {
        let loaded = Self::path().and_then(|path| Self::read(&path));
        loaded.unwrap_or_else(|e| {
            tracing::warn!("Falling back to default settings: {:#}", e);
            Self::default()
        })
    }

    /// Parse the settings at `path`. A missing file is not an error.
    pub fn read(path: &Path) -> Result<Self> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(e).with_context(|| format!("Cannot read settings: {}", path.display()))
            }
        };
        serde_json::from_str(&text)
            .with_context(|| format!("Invalid settings in {}", path.display()))
    }

    /// Record `theme` in the user's settings file.
    pub fn store_theme(theme: &str) -> Result<()> {
        Self::save_theme(&Self::path()?, theme)
    }

    /// Replace only the theme at `path`. A file that cannot be read or parsed
    /// is left untouched and the error returned.
    pub fn save_theme(path: &Path, theme: &str) -> Result<()> {
        let stored = Self::read(path).context("Theme not saved")?;
        if stored.theme == theme {
            return Ok(());
        }
        Self {
            theme: theme.to_string(),
            ..stored
        }
        .write(path)
    }

    /// Write to `path`, creating parent directories.
    pub fn write(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Cannot create {}", dir.display()))?;
        }
        let text = serde_json::to_string_pretty(self).context("Cannot encode settings")?;
        fs::write(path, text).with_context(|| format!("Cannot write {}", path.display()))
    }

    /// Copy with per-run values replacing the stored ones.
    pub fn with_overrides(
        &self,
        endpoint: Option<&str>,
        timeout_secs: Option<u64>,
        theme: Option<&str>,
    ) -> Self {
        Self {
            endpoint: endpoint.map_or_else(|| self.endpoint.clone(), str::to_string),
            timeout_secs: timeout_secs.unwrap_or(self.timeout_secs),
            theme: theme.map_or_else(|| self.theme.clone(), str::to_string),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// The configured theme. `None` when the name matches no built-in theme.
    pub fn resolve_theme(&self) -> Option<&'static Theme> {
        Theme::by_name(&self.theme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.timeout(), Duration::from_secs(250));
        assert_eq!(config.resolve_theme(), Some(Theme::default_theme()));
    }

    #[test]
    fn test_partial_document_fills_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"timeout_secs": 30}"#).expect("deserialize");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.theme, Theme::default_theme().name);

        let empty: Config = serde_json::from_str("{}").expect("deserialize");
        assert_eq!(empty, Config::default());
    }

    #[test]
    fn test_unrecognized_key_rejected() {
        assert!(serde_json::from_str::<Config>(r#"{"timeout": 30}"#).is_err());
    }

    #[test]
    fn test_write_then_read() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("a").join("b").join(FILE_NAME);
        let config = Config {
            theme: "Catppuccin Frappe".to_string(),
            endpoint: "http://127.0.0.1:8080/".to_string(),
            timeout_secs: 10,
        };

        config.write(&path).expect("write");
        assert_eq!(Config::read(&path).expect("read"), config);
    }

    #[test]
    fn test_read_missing_and_broken_files() {
        let dir = TempDir::new().expect("temp dir");
        let missing = dir.path().join(FILE_NAME);
        assert_eq!(Config::read(&missing).expect("read"), Config::default());

        fs::write(&missing, "{ not json").expect("write");
        let err = Config::read(&missing).expect_err("should fail");
        assert!(format!("{:#}", err).contains("Invalid settings"));
    }

    #[test]
    fn test_save_theme_keeps_other_settings() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join(FILE_NAME);
        fs::write(
            &path,
            r#"{"endpoint": "http://127.0.0.1:8080/", "timeout_secs": 10}"#,
        )
        .expect("write");

        Config::save_theme(&path, "Catppuccin Latte").expect("save");

        let config = Config::read(&path).expect("read");
        assert_eq!(config.theme, "Catppuccin Latte");
        assert_eq!(config.endpoint, "http://127.0.0.1:8080/");
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn test_overrides_leave_unset_values() {
        let base = Config::default();
        let config = base.with_overrides(Some("http://localhost/hook"), None, Some("nope"));
        assert_eq!(config.endpoint, "http://localhost/hook");
        assert_eq!(config.timeout_secs, base.timeout_secs);
        assert!(config.resolve_theme().is_none());
    }
}
