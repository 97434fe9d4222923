//! quickcal configuration.

use std::path::{Path, PathBuf};

use chrono::Duration;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::defaults::{
    DEFAULT_DURATION_MINUTES, DEFAULT_TITLE, DefaultPolicy, MAX_DEFAULT_DURATION_DAYS,
};
use crate::error::{QuickcalError, QuickcalResult};

static DEFAULT_CALENDAR_PATH: &str = "~/calendar";

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

fn default_duration() -> String {
    format!("{DEFAULT_DURATION_MINUTES}m")
}

fn default_calendar_dir() -> PathBuf {
    PathBuf::from(DEFAULT_CALENDAR_PATH)
}

/// Global configuration at ~/.config/quickcal/config.toml
///
/// Every key may also be set through a `QUICKCAL_`-prefixed environment
/// variable (`QUICKCAL_DEFAULT_TITLE=Busy`).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct QuickcalConfig {
    /// Title for events whose text has nothing left after the date is removed.
    #[serde(default = "default_title")]
    pub default_title: String,

    /// Length of events without an explicit end, in humantime syntax ("1h", "45m").
    #[serde(default = "default_duration")]
    pub default_duration: String,

    /// Where `quickcal new` writes .ics files.
    #[serde(default = "default_calendar_dir")]
    pub calendar_dir: PathBuf,
}

impl Default for QuickcalConfig {
    fn default() -> Self {
        QuickcalConfig {
            default_title: default_title(),
            default_duration: default_duration(),
            calendar_dir: default_calendar_dir(),
        }
    }
}

impl QuickcalConfig {
    pub fn config_path() -> QuickcalResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| QuickcalError::Config("Could not determine config directory".into()))?
            .join("quickcal");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location. A missing file means all defaults.
    pub fn load() -> QuickcalResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> QuickcalResult<Self> {
        debug!(path = %path.display(), "loading config");

        Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .add_source(Environment::with_prefix("QUICKCAL"))
            .build()
            .map_err(|e| QuickcalError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| QuickcalError::Config(e.to_string()))
    }

    /// The fallback title/duration the resolver should use.
    pub fn default_policy(&self) -> QuickcalResult<DefaultPolicy> {
        let title = self.default_title.trim();
        if title.is_empty() {
            return Err(QuickcalError::Config("default_title must not be empty".into()));
        }

        let std_duration = humantime::parse_duration(&self.default_duration).map_err(|e| {
            QuickcalError::Config(format!(
                "Invalid default_duration '{}': {e}",
                self.default_duration
            ))
        })?;
        let duration = Duration::from_std(std_duration)
            .map_err(|_| QuickcalError::Config("default_duration is too large".into()))?;
        if duration <= Duration::zero() {
            return Err(QuickcalError::Config("default_duration must be positive".into()));
        }
        if duration > Duration::days(MAX_DEFAULT_DURATION_DAYS) {
            return Err(QuickcalError::Config(format!(
                "default_duration must be at most {MAX_DEFAULT_DURATION_DAYS} days"
            )));
        }

        Ok(DefaultPolicy {
            title: title.to_string(),
            duration,
        })
    }

    /// `calendar_dir` with `~` expanded.
    pub fn calendar_path(&self) -> PathBuf {
        let expanded = shellexpand::tilde(&self.calendar_dir.to_string_lossy()).into_owned();
        PathBuf::from(expanded)
    }

    /// Create a config file with every option commented out.
    pub fn create_default_config(path: &Path) -> QuickcalResult<()> {
        let contents = format!(
            "\
# quickcal configuration

# Title used when a phrase is only a date (\"tomorrow at 3pm\"):
# default_title = \"{}\"

# Length of events that don't say when they end:
# default_duration = \"{}\"

# Where new events are written as .ics files:
# calendar_dir = \"{}\"
",
            DEFAULT_TITLE,
            default_duration(),
            DEFAULT_CALENDAR_PATH
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                QuickcalError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| QuickcalError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = QuickcalConfig::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.default_title, "Event");
        assert_eq!(config.calendar_dir, PathBuf::from("~/calendar"));
        assert_eq!(config.default_policy().unwrap(), DefaultPolicy::default());
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "default_title = \"Busy\"\ndefault_duration = \"30m\"\ncalendar_dir = \"/tmp/cal\"\n",
        )
        .unwrap();

        let config = QuickcalConfig::load_from(&path).unwrap();
        let policy = config.default_policy().unwrap();
        assert_eq!(policy.title, "Busy");
        assert_eq!(policy.duration, Duration::minutes(30));
        assert_eq!(config.calendar_path(), PathBuf::from("/tmp/cal"));
    }

    #[test]
    fn generated_default_config_loads_as_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        QuickcalConfig::create_default_config(&path).unwrap();

        let config = QuickcalConfig::load_from(&path).unwrap();
        assert_eq!(config.default_policy().unwrap(), DefaultPolicy::default());
    }

    #[test]
    fn malformed_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "default_title = [not toml").unwrap();
        assert!(matches!(
            QuickcalConfig::load_from(&path),
            Err(QuickcalError::Config(_))
        ));
    }

    #[test]
    fn bad_policy_values_are_rejected() {
        let config = QuickcalConfig {
            default_duration: "soon".into(),
            ..QuickcalConfig::default()
        };
        assert!(config.default_policy().is_err());

        let config = QuickcalConfig {
            default_duration: "0s".into(),
            ..QuickcalConfig::default()
        };
        assert!(config.default_policy().is_err());

        let config = QuickcalConfig {
            default_title: "  ".into(),
            ..QuickcalConfig::default()
        };
        assert!(config.default_policy().is_err());
    }

    #[test]
    fn oversized_duration_is_rejected() {
        let config = QuickcalConfig {
            default_duration: "1000000y".into(),
            ..QuickcalConfig::default()
        };
        assert!(matches!(
            config.default_policy(),
            Err(QuickcalError::Config(_))
        ));

        let config = QuickcalConfig {
            default_duration: "1y".into(),
            ..QuickcalConfig::default()
        };
        assert!(config.default_policy().is_ok());
    }

    #[test]
    fn tilde_is_expanded() {
        let config = QuickcalConfig::default();
        assert!(!config.calendar_path().to_string_lossy().starts_with('~'));
    }
}
