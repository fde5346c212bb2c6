//! Configuration for the Disha viewer
//!
//! Loads configuration from a TOML file. Every field has a default, so a
//! partial file (or none at all) is valid.

use crate::error::{Error, Result};
use crate::estimator::{DEFAULT_ALPHA, DEFAULT_MAX_DT, FilterConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Top-level application configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    pub serial: SerialConfig,
    pub filter: FilterSettings,
    pub display: DisplayConfig,
    pub replay: ReplayConfig,
    pub logging: LoggingConfig,
}

/// Serial port carrying `ax,ay,az,gx,gy,gz` lines
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SerialConfig {
    /// Serial port path (e.g. "/dev/ttyUSB0" or "COM9")
    pub port: String,
    pub baud_rate: u32,
    /// Longest a single poll may wait for bytes, in milliseconds
    pub read_timeout_ms: u64,
}

impl SerialConfig {
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            port: "/dev/ttyUSB0".to_string(),
            baud_rate: 115_200,
            read_timeout_ms: 50,
        }
    }
}

/// Complementary filter parameters as written in the file.
///
/// Turned into a validated [`FilterConfig`] by [`FilterSettings::validate`].
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FilterSettings {
    /// Gyro weight in [0, 1]
    pub alpha: f64,
    /// Largest accepted gap between samples, in seconds
    pub max_dt: f64,
}

impl FilterSettings {
    /// Validate into a [`FilterConfig`], failing on out-of-range values.
    pub fn validate(&self) -> Result<FilterConfig> {
        FilterConfig::new(self.alpha, self.max_dt)
    }
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            max_dt: DEFAULT_MAX_DT,
        }
    }
}

/// Presentation settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Initial state of the yaw display toggle
    pub show_yaw: bool,
    /// Upper bound on renders per second
    pub refresh_hz: f64,
    /// Interval between statistics log lines (0 disables)
    pub stats_interval_secs: u64,
}

impl DisplayConfig {
    /// Minimum time between renders
    pub fn render_interval(&self) -> Duration {
        if self.refresh_hz.is_finite() && self.refresh_hz > 0.0 {
            Duration::from_secs_f64(1.0 / self.refresh_hz)
        } else {
            Duration::ZERO
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_yaw: false,
            refresh_hz: 30.0,
            stats_interval_secs: 10,
        }
    }
}

/// Playback of recorded captures
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ReplayConfig {
    /// Rate the capture was recorded at, in samples per second
    pub rate_hz: f64,
}

impl ReplayConfig {
    /// Spacing between replayed samples.
    ///
    /// Fails when the rate is not positive, or when the spacing would exceed
    /// `filter.max_dt()` (every replayed sample would be discarded).
    pub fn sample_period(&self, filter: &FilterConfig) -> Result<Duration> {
        if !self.rate_hz.is_finite() || self.rate_hz <= 0.0 {
            return Err(Error::InvalidConfig {
                field: "rate_hz",
                reason: format!("must be a positive rate, got {}", self.rate_hz),
            });
        }
        let period = 1.0 / self.rate_hz;
        if period > filter.max_dt() {
            return Err(Error::InvalidConfig {
                field: "rate_hz",
                reason: format!(
                    "sample spacing {:.3}s exceeds max_dt {:.3}s",
                    period,
                    filter.max_dt()
                ),
            });
        }
        Ok(Duration::from_secs_f64(period))
    }
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self { rate_hz: 50.0 }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error); `RUST_LOG` takes precedence
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from TOML file
    ///
    /// # Example
    /// ```no_run
    /// use disha::config::AppConfig;
    ///
    /// let config = AppConfig::from_file("disha.toml")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Save configuration to TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.serial.port, "/dev/ttyUSB0");
        assert_eq!(config.serial.baud_rate, 115_200);
        assert_eq!(config.serial.read_timeout(), Duration::from_millis(50));
        assert_eq!(config.filter.alpha, 0.98);
        assert_eq!(config.filter.max_dt, 0.1);
        assert!(!config.display.show_yaw);
        assert_eq!(config.logging.level, "info");
        assert!(config.filter.validate().is_ok());
    }

    #[test]
    fn test_toml_serialization() {
        let toml_string = toml::to_string_pretty(&AppConfig::default()).unwrap();

        assert!(toml_string.contains("[serial]"));
        assert!(toml_string.contains("[filter]"));
        assert!(toml_string.contains("[display]"));
        assert!(toml_string.contains("[replay]"));
        assert!(toml_string.contains("[logging]"));
        assert!(toml_string.contains("alpha = 0.98"));
        assert!(toml_string.contains("port = \"/dev/ttyUSB0\""));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config = AppConfig::from_toml(
            r#"
[serial]
port = "COM9"

[filter]
alpha = 0.9
"#,
        )
        .unwrap();

        assert_eq!(config.serial.port, "COM9");
        assert_eq!(config.serial.baud_rate, 115_200);
        assert_eq!(config.filter.alpha, 0.9);
        assert_eq!(config.filter.max_dt, 0.1);
        assert_eq!(config.display.refresh_hz, 30.0);
    }

    #[test]
    fn test_empty_file_is_default() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config.serial.port, AppConfig::default().serial.port);
    }

    #[test]
    fn test_bad_type_is_parse_error() {
        let result = AppConfig::from_toml("[filter]\nalpha = \"high\"\n");
        assert!(matches!(result, Err(Error::ConfigParse(_))));
    }

    #[test]
    fn test_invalid_filter_fails_validation() {
        let config = AppConfig::from_toml("[filter]\nalpha = 1.2\n").unwrap();
        assert!(matches!(
            config.filter.validate(),
            Err(Error::InvalidConfig { field: "alpha", .. })
        ));

        let config = AppConfig::from_toml("[filter]\nmax_dt = 0.0\n").unwrap();
        assert!(matches!(
            config.filter.validate(),
            Err(Error::InvalidConfig { field: "max_dt", .. })
        ));
    }

    #[test]
    fn test_render_interval() {
        let mut display = DisplayConfig::default();
        display.refresh_hz = 50.0;
        assert_eq!(display.render_interval(), Duration::from_millis(20));
        display.refresh_hz = 0.0;
        assert_eq!(display.render_interval(), Duration::ZERO);
    }

    #[test]
    fn test_replay_sample_period() {
        let filter = FilterConfig::default();
        let mut replay = ReplayConfig::default();
        assert_eq!(replay.sample_period(&filter).unwrap(), Duration::from_millis(20));

        replay.rate_hz = 0.0;
        assert!(matches!(
            replay.sample_period(&filter),
            Err(Error::InvalidConfig { field: "rate_hz", .. })
        ));

        // 5 Hz is 0.2s per sample, longer than the default 0.1s max_dt
        replay.rate_hz = 5.0;
        assert!(replay.sample_period(&filter).is_err());
    }
}
