use log::LevelFilter;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Environment variable overriding [`Config::video_threshold`]
pub const VIDEO_THRESHOLD_VAR: &str = "PHASH_VIDEO_THRESHOLD";
/// Environment variable overriding [`Config::similarity_threshold`]
pub const SIMILARITY_THRESHOLD_VAR: &str = "PHASH_SIMILARITY_THRESHOLD";
/// Environment variable overriding [`Config::log_level`]
pub const LOG_LEVEL_VAR: &str = "PHASH_LOG_LEVEL";

/// Log level for the library's own logger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

impl FromStr for LogLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "trace" => Ok(Self::Trace),
            other => Err(Error::Configuration(format!("bad log level '{other}'"))),
        }
    }
}

/// Configuration for hash comparisons
#[derive(Debug, Clone)]
pub struct Config {
    /// Threshold handed to the native video distance routine. Its meaning is
    /// defined by pHash; it is never reinterpreted here.
    pub video_threshold: i32,

    /// Maximum Hamming distance (0-64) for two image hashes to count as similar
    pub similarity_threshold: u32,

    /// Log level
    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            video_threshold: 21,
            similarity_threshold: 10,
            log_level: LogLevel::Info,
        }
    }
}

impl Config {
    /// Build a configuration from the process environment, loading a `.env`
    /// file first if one is present.
    pub fn from_env() -> Result<Self> {
        // A missing .env file is not an error
        let _ = dotenv::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup. Unset keys keep
    /// their default value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(VIDEO_THRESHOLD_VAR) {
            config.video_threshold = parse_var(VIDEO_THRESHOLD_VAR, &value)?;
        }

        if let Some(value) = lookup(SIMILARITY_THRESHOLD_VAR) {
            let threshold: u32 = parse_var(SIMILARITY_THRESHOLD_VAR, &value)?;
            if threshold > 64 {
                return Err(Error::Configuration(format!(
                    "{} must be between 0 and 64, got {}",
                    SIMILARITY_THRESHOLD_VAR, threshold
                )));
            }
            config.similarity_threshold = threshold;
        }

        if let Some(value) = lookup(LOG_LEVEL_VAR) {
            config.log_level = value.parse()?;
        }

        Ok(config)
    }
}

fn parse_var<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::Configuration(format!("{} has invalid value '{}'", key, value)))
}
