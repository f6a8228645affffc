use crate::error::{config_error, env_error, ScheduleResult};
use chrono_tz::Tz;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Vertical distance (in pixels) under which two fragments share a row
pub const DEFAULT_Y_TOLERANCE: f64 = 15.0;

/// Zone the reference deployment exports events in
pub const DEFAULT_TIMEZONE: &str = "America/Chicago";

pub const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379";

pub const DEFAULT_DETECTION_TIMEOUT_SECS: u64 = 60;

/// Optional file overriding the environment
pub const CONFIG_FILE: &str = "config/schedule_snap.toml";

/// Deployment configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Row grouping tolerance
    pub y_tolerance: f64,
    /// IANA zone identifier used for every exported event
    pub timezone: String,
    /// Redis connection string for the schedule store
    pub redis_url: String,
    /// Endpoint of the text detection service
    pub detection_url: Option<String>,
    /// Bearer key for the text detection service
    pub detection_api_key: Option<String>,
    /// Upper bound on a single detection call
    pub detection_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            y_tolerance: DEFAULT_Y_TOLERANCE,
            timezone: DEFAULT_TIMEZONE.to_string(),
            redis_url: DEFAULT_REDIS_URL.to_string(),
            detection_url: None,
            detection_api_key: None,
            detection_timeout_secs: DEFAULT_DETECTION_TIMEOUT_SECS,
        }
    }
}

/// Keys accepted in the override file. Anything left out keeps its
/// environment value.
#[derive(Debug, Default, Deserialize)]
struct FileOverrides {
    y_tolerance: Option<f64>,
    timezone: Option<String>,
    redis_url: Option<String>,
    detection_url: Option<String>,
    detection_timeout_secs: Option<u64>,
}

impl Config {
    /// Load configuration from environment and config file
    pub fn load() -> ScheduleResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        let mut config = Self::from_env()?;

        if Path::new(CONFIG_FILE).exists() {
            let content = fs::read_to_string(CONFIG_FILE)?;
            config.apply_overrides(&content)?;
        }

        // Fail early on a zone we cannot resolve
        config.zone()?;

        Ok(config)
    }

    /// Build the configuration from environment variables only
    pub fn from_env() -> ScheduleResult<Self> {
        let defaults = Self::default();

        let y_tolerance = match env::var("ROW_Y_TOLERANCE") {
            Ok(raw) => raw
                .parse::<f64>()
                .map_err(|_| env_error("ROW_Y_TOLERANCE"))?,
            Err(_) => defaults.y_tolerance,
        };

        let detection_timeout_secs = match env::var("DETECTION_TIMEOUT_SECS") {
            Ok(raw) => raw
                .parse::<u64>()
                .map_err(|_| env_error("DETECTION_TIMEOUT_SECS"))?,
            Err(_) => defaults.detection_timeout_secs,
        };

        Ok(Config {
            y_tolerance,
            timezone: env::var("TIMEZONE").unwrap_or(defaults.timezone),
            redis_url: env::var("REDIS_URL").unwrap_or(defaults.redis_url),
            detection_url: env::var("DETECTION_URL").ok(),
            detection_api_key: env::var("DETECTION_API_KEY").ok(),
            detection_timeout_secs,
        })
    }

    /// Merge TOML overrides into this configuration
    pub fn apply_overrides(&mut self, content: &str) -> ScheduleResult<()> {
        let overrides: FileOverrides = toml::from_str(content)?;

        if let Some(y_tolerance) = overrides.y_tolerance {
            self.y_tolerance = y_tolerance;
        }
        if let Some(timezone) = overrides.timezone {
            self.timezone = timezone;
        }
        if let Some(redis_url) = overrides.redis_url {
            self.redis_url = redis_url;
        }
        if let Some(detection_url) = overrides.detection_url {
            self.detection_url = Some(detection_url);
        }
        if let Some(timeout) = overrides.detection_timeout_secs {
            self.detection_timeout_secs = timeout;
        }

        if self.y_tolerance <= 0.0 {
            return Err(config_error("y_tolerance must be positive"));
        }

        Ok(())
    }

    /// Resolve the configured zone identifier
    pub fn zone(&self) -> ScheduleResult<Tz> {
        Tz::from_str(&self.timezone)
            .map_err(|_| config_error(&format!("Unknown timezone: {}", self.timezone)))
    }
}
