/// CLI configuration
use crate::error::{CliError, Result};
use drip_schedule::ScheduleConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file read from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "drip.toml";

/// Prefix of environment overrides, e.g. `DRIP_SCHEDULE__GROUP_GAP_DAYS=2`
pub const ENV_PREFIX: &str = "DRIP";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct DripConfig {
    #[serde(default)]
    pub schedule: ScheduleConfig,

    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoggingSettings {
    /// `tracing` filter used when `RUST_LOG` is unset
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl DripConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; the default `drip.toml` is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, environment())
    }

    /// Load with a caller-supplied environment source
    pub fn load_with_env(path: Option<&Path>, env: config::Environment) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path).required(true));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables (prefixed with DRIP_)
        settings = settings.add_source(env);

        let config = settings
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| CliError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.schedule.live_session_minutes == 0 {
            return Err(CliError::Config(
                "schedule.live_session_minutes must be at least 1".to_string(),
            ));
        }

        if self.logging.filter.trim().is_empty() {
            return Err(CliError::Config("logging.filter must not be empty".to_string()));
        }

        Ok(())
    }
}

/// Environment source for `DRIP_`-prefixed overrides
///
/// Sections and keys are split by a double underscore so that keys may
/// contain single underscores (`DRIP_SCHEDULE__GROUP_GAP_DAYS`).
pub fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

// Default values
fn default_filter() -> String {
    "drip=info,drip_sync=info".to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = DripConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.schedule.group_gap_days, 1);
        assert_eq!(config.logging.filter, "drip=info,drip_sync=info");
    }

    #[test]
    fn zero_length_live_sessions_are_rejected() {
        let mut config = DripConfig::default();
        config.schedule.live_session_minutes = 0;
        assert!(matches!(config.validate(), Err(CliError::Config(_))));
    }
}
