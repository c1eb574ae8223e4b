/// Application configuration
use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tapedeck_playback::PlaybackConfig;

/// Config file read from the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "tapedeck.toml";

/// Prefix for environment overrides, e.g. `TAPEDECK_STORAGE__DATABASE_URL`
pub const ENV_PREFIX: &str = "TAPEDECK";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default = "default_storage")]
    pub storage: StorageSettings,

    #[serde(default)]
    pub playback: PlaybackConfig,

    #[serde(default = "default_offline_cache")]
    pub offline_cache: OfflineCacheSettings,

    #[serde(default = "default_logging")]
    pub logging: LoggingSettings,

    #[serde(default = "default_transport")]
    pub transport: TransportSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_database_url")]
    pub database_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OfflineCacheSettings {
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    #[serde(default = "default_cache_dir")]
    pub dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingSettings {
    /// Used when `RUST_LOG` is not set
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TransportSettings {
    /// Clock resolution of the silent transport
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
}

impl TransportSettings {
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

impl AppConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; the default `tapedeck.toml` is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings =
                    settings.add_source(config::File::from(path.to_path_buf()).required(true));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables (prefixed with TAPEDECK_)
        settings = settings.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings.build()?;

        Ok(config.try_deserialize()?)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.storage.database_url.trim().is_empty() {
            return Err(CliError::Config(
                "Database URL is required (set TAPEDECK_STORAGE__DATABASE_URL)".to_string(),
            ));
        }

        let step = self.playback.seek_step_secs;
        if !step.is_finite() || step <= 0.0 {
            return Err(CliError::Config(format!(
                "Seek step must be a positive number of seconds, got {}",
                step
            )));
        }

        if self.transport.tick_ms == 0 {
            return Err(CliError::Config(
                "Transport tick must be at least 1 ms".to_string(),
            ));
        }

        if self.offline_cache.enabled && self.offline_cache.dir.as_os_str().is_empty() {
            return Err(CliError::Config(
                "Offline cache is enabled but no directory is set".to_string(),
            ));
        }

        Ok(())
    }

    /// Render the effective configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| CliError::Config(e.to_string()))
    }
}

// Default values
fn default_storage() -> StorageSettings {
    StorageSettings {
        database_url: default_database_url(),
    }
}

fn default_database_url() -> String {
    "sqlite://tapedeck.db".to_string()
}

fn default_offline_cache() -> OfflineCacheSettings {
    OfflineCacheSettings {
        enabled: default_enabled(),
        dir: default_cache_dir(),
    }
}

fn default_enabled() -> bool {
    true
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from("./.tapedeck-cache")
}

fn default_logging() -> LoggingSettings {
    LoggingSettings {
        filter: default_log_filter(),
    }
}

fn default_log_filter() -> String {
    "tapedeck=info,tapedeck_cli=info,tapedeck_storage=info,tapedeck_playback=info".to_string()
}

fn default_transport() -> TransportSettings {
    TransportSettings {
        tick_ms: default_tick_ms(),
    }
}

fn default_tick_ms() -> u64 {
    250
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage: default_storage(),
            playback: PlaybackConfig::default(),
            offline_cache: default_offline_cache(),
            logging: default_logging(),
            transport: default_transport(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("tapedeck.toml");
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn defaults_are_valid() {
        let config = AppConfig::default();

        assert_eq!(config.storage.database_url, "sqlite://tapedeck.db");
        assert_eq!(config.playback.seek_step_secs, 5.0);
        assert!(config.playback.auto_select_first);
        assert_eq!(config.transport.tick(), Duration::from_millis(250));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"
            [storage]
            database_url = "sqlite://elsewhere.db"

            [playback]
            seek_step_secs = 10.0
            "#,
        );

        let config = AppConfig::load(Some(&path)).unwrap();

        assert_eq!(config.storage.database_url, "sqlite://elsewhere.db");
        assert_eq!(config.playback.seek_step_secs, 10.0);
        assert!(config.playback.auto_select_first);
        assert_eq!(config.transport.tick_ms, 250);
        assert!(config.offline_cache.enabled);
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope.toml");

        let result = AppConfig::load(Some(&path));

        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn rendered_config_loads_back() {
        let dir = TempDir::new().unwrap();
        let mut config = AppConfig::default();
        config.transport.tick_ms = 100;
        config.offline_cache.enabled = false;

        let path = write_config(&dir, &config.to_toml().unwrap());
        let loaded = AppConfig::load(Some(&path)).unwrap();

        assert_eq!(loaded.transport.tick_ms, 100);
        assert!(!loaded.offline_cache.enabled);
    }

    #[test]
    fn validate_rejects_empty_database_url() {
        let mut config = AppConfig::default();
        config.storage.database_url = "  ".to_string();

        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_seek_step() {
        let mut config = AppConfig::default();

        config.playback.seek_step_secs = 0.0;
        assert!(config.validate().is_err());

        config.playback.seek_step_secs = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_tick() {
        let mut config = AppConfig::default();
        config.transport.tick_ms = 0;

        assert!(config.validate().is_err());
    }
}
