//! Configuration management for AdminHub
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! `ADMINHUB__<SECTION>__<KEY>` environment variables.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;

/// Environment variable prefix for overrides
pub const ENV_PREFIX: &str = "ADMINHUB";

/// Main configuration struct
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// TUI configuration
    pub tui: TuiConfig,

    /// Simulated backend configuration
    pub actions: ActionsConfig,

    /// Export configuration
    pub export: ExportConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from defaults, an optional file and the environment.
    ///
    /// An explicit `path` must exist. Without one, `config.toml` in the
    /// platform config directory is read if present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        match path {
            Some(path) => {
                debug!(path = %path.display(), "Reading configuration file");
                builder = builder.add_source(config::File::from(path).required(true));
            }
            None => {
                if let Some(dirs) = project_dirs() {
                    let default_path = dirs.config_dir().join("config.toml");
                    builder = builder.add_source(config::File::from(default_path).required(false));
                }
            }
        }

        let settings = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}

/// Platform directories for AdminHub files
pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("dev", "adminhub", "adminhub")
}

/// TUI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    /// Tick rate in milliseconds
    pub refresh_rate_ms: u64,
    /// How long a toast stays visible, in milliseconds
    pub toast_ttl_ms: u64,
}

impl TuiConfig {
    pub fn refresh_rate(&self) -> Duration {
        Duration::from_millis(self.refresh_rate_ms)
    }

    pub fn toast_ttl(&self) -> Duration {
        Duration::from_millis(self.toast_ttl_ms)
    }
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            refresh_rate_ms: 250,
            toast_ttl_ms: 3000,
        }
    }
}

/// Simulated backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionsConfig {
    /// Artificial latency applied to every backend action, in milliseconds
    pub latency_ms: u64,
}

impl ActionsConfig {
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}

impl Default for ActionsConfig {
    fn default() -> Self {
        Self { latency_ms: 1000 }
    }
}

/// Export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory export files are written to
    pub directory: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level
    pub level: String,
    /// Log format (json or pretty)
    pub format: String,
    /// Directory for the dashboard's log file
    pub directory: Option<PathBuf>,
}

impl LoggingConfig {
    /// Directory the dashboard writes its log file to
    pub fn log_directory(&self) -> PathBuf {
        self.directory
            .clone()
            .or_else(|| project_dirs().map(|dirs| dirs.data_local_dir().join("logs")))
            .unwrap_or_else(|| PathBuf::from("logs"))
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            directory: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.tui.refresh_rate(), Duration::from_millis(250));
        assert_eq!(config.tui.toast_ttl(), Duration::from_secs(3));
        assert_eq!(config.actions.latency(), Duration::from_secs(1));
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_load_partial_file_keeps_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[actions]\nlatency_ms = 10\n\n[export]\ndirectory = \"/tmp/out\"").unwrap();

        let config = Config::load(Some(file.path())).unwrap();

        assert_eq!(config.actions.latency_ms, 10);
        assert_eq!(config.export.directory, PathBuf::from("/tmp/out"));
        assert_eq!(config.tui.toast_ttl_ms, 3000);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load(Some(&dir.path().join("absent.toml")));
        assert!(matches!(result, Err(crate::Error::Config(_))));
    }

    #[test]
    fn test_log_directory_override() {
        let logging = LoggingConfig {
            directory: Some(PathBuf::from("/var/log/adminhub")),
            ..LoggingConfig::default()
        };
        assert_eq!(logging.log_directory(), PathBuf::from("/var/log/adminhub"));
    }
}
