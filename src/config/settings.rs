//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files.  The workflow core never
//! reads configuration itself; these settings only parameterise the host
//! session (where the service lives, which options are preselected).

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::AppPaths;
use crate::service::Task;

// ---------------------------------------------------------------------------
// ServiceConfig
// ---------------------------------------------------------------------------

/// Location of the remote transcription service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Base URL the `/transcribe`, `/supported-languages` and `/download`
    /// routes are resolved against (e.g. `http://localhost:5001`).
    pub base_url: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5001".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// DefaultsConfig
// ---------------------------------------------------------------------------

/// Options preselected in the language and task selectors at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Source language code, or `"auto"` for server-side detection.
    pub language: String,
    /// Task mode sent with every request.
    pub task: Task,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            language: "auto".into(),
            task: Task::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// # Persistence
///
/// ```rust,no_run
/// use media_transcriber::config::AppConfig;
///
/// // Load (returns Default when file is missing)
/// let config = AppConfig::load().unwrap();
/// println!("{}", config.service.base_url);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Transcription service endpoint.
    #[serde(default)]
    pub service: ServiceConfig,
    /// Initial selector values.
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet
    /// so callers never need to special-case a missing file.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path (useful for tests).
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save to `path`, creating parent directories as needed.  The binary
    /// calls this on first run with the resolved `settings.toml` path.
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn load_missing_returns_default() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nonexistent.toml");

        let config = AppConfig::load_from(&path).expect("should not error");

        assert_eq!(config.service.base_url, "http://localhost:5001");
        assert_eq!(config.defaults.language, "auto");
        assert_eq!(config.defaults.task, Task::Transcribe);
    }

    #[test]
    fn round_trip_modified_values() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nested").join("settings.toml");

        let mut cfg = AppConfig::default();
        cfg.service.base_url = "https://transcribe.example.com".into();
        cfg.defaults.language = "de".into();
        cfg.defaults.task = Task::Translate;

        cfg.save_to(&path).expect("save");
        let loaded = AppConfig::load_from(&path).expect("load");

        assert_eq!(loaded.service.base_url, "https://transcribe.example.com");
        assert_eq!(loaded.defaults.language, "de");
        assert_eq!(loaded.defaults.task, Task::Translate);
    }

    /// A file that only sets the service section keeps the other defaults.
    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "[service]\nbase_url = \"http://10.0.0.2:5001\"\n").unwrap();

        let loaded = AppConfig::load_from(&path).expect("load");

        assert_eq!(loaded.service.base_url, "http://10.0.0.2:5001");
        assert_eq!(loaded.defaults.language, "auto");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "service = [[[").unwrap();

        assert!(AppConfig::load_from(&path).is_err());
    }
}
