use log::{info, warn, LevelFilter};
use std::path::Path;

// For file-based logging with rotation
use log4rs::append::rolling_file::policy::compound::roll::fixed_window::FixedWindowRoller;
use log4rs::append::rolling_file::policy::compound::trigger::size::SizeTrigger;
use log4rs::append::rolling_file::policy::compound::CompoundPolicy;
use log4rs::append::rolling_file::RollingFileAppender;
use log4rs::config::{Appender, Config as Log4rsConfig, Root};
use log4rs::encode::pattern::PatternEncoder;

use crate::config::Config;
use crate::error::{Error, Result};

/// Environment variable that overrides [`Config::log_level`] in [`init_logger`]
pub const LOG_ENV_VAR: &str = "PHASH_LOG";

/// Initialize a rolling file logger with timestamp, log level, and module path.
///
/// Intended for host applications that have no logger of their own; the
/// library itself only talks to the `log` facade.
pub fn init_logger(log_dir: impl AsRef<Path>, config: &Config) -> Result<()> {
    let log_dir = log_dir.as_ref();
    std::fs::create_dir_all(log_dir)
        .map_err(|e| Error::Logging(format!("Failed to create {}: {}", log_dir.display(), e)))?;

    let log_file_path = log_dir.join("phash.log");
    let archived_logs_pattern = format!("{}/phash.{{}}.log", log_dir.display());

    // Rotate at 10MB, keep 5 archived log files
    let file_trigger = SizeTrigger::new(10 * 1024 * 1024);
    let file_roller = FixedWindowRoller::builder()
        .build(&archived_logs_pattern, 5)
        .map_err(|e| Error::Logging(format!("Failed to create log roller: {}", e)))?;

    let compound_policy = CompoundPolicy::new(Box::new(file_trigger), Box::new(file_roller));

    let rolling_file = RollingFileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] [{M}:{L}] - {m}{n}",
        )))
        .build(&log_file_path, Box::new(compound_policy))
        .map_err(|e| Error::Logging(format!("Failed to create log appender: {}", e)))?;

    let log_config = Log4rsConfig::builder()
        .appender(Appender::builder().build("file", Box::new(rolling_file)))
        .build(Root::builder().appender("file").build(LevelFilter::Trace))
        .map_err(|e| Error::Logging(format!("Failed to build log config: {}", e)))?;

    log4rs::init_config(log_config)
        .map_err(|e| Error::Logging(format!("Failed to initialize log4rs: {}", e)))?;

    let env_override = std::env::var(LOG_ENV_VAR).ok();
    log::set_max_level(resolve_level(config, env_override.as_deref()));

    info!("Logging to file: {}", log_file_path.display());
    Ok(())
}

/// Pick the effective level: a parseable override wins over the configured level
fn resolve_level(config: &Config, env_override: Option<&str>) -> LevelFilter {
    env_override
        .and_then(|value| value.parse::<LevelFilter>().ok())
        .unwrap_or_else(|| config.log_level.into())
}

/// Log a failed native call
pub fn log_native_error(operation: &str, path: Option<&Path>, status: i32) {
    match path {
        Some(path) => warn!(
            "Native call failed - Operation: {}, Path: {}, Status: {}",
            operation,
            path.display(),
            status
        ),
        None => warn!(
            "Native call failed - Operation: {}, Status: {}",
            operation, status
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LogLevel, LOG_LEVEL_VAR};

    fn config_with(level: LogLevel) -> Config {
        Config {
            log_level: level,
            ..Config::default()
        }
    }

    #[test]
    fn test_env_override_wins() {
        let config = config_with(LogLevel::Info);
        assert_eq!(resolve_level(&config, Some("debug")), LevelFilter::Debug);

        let config = config_with(LogLevel::Trace);
        assert_eq!(resolve_level(&config, Some("off")), LevelFilter::Off);
    }

    #[test]
    fn test_unparseable_override_ignored() {
        let config = config_with(LogLevel::Warn);
        assert_eq!(resolve_level(&config, Some("chatty")), LevelFilter::Warn);

        let config = config_with(LogLevel::Error);
        assert_eq!(resolve_level(&config, None), LevelFilter::Error);
    }

    #[test]
    fn test_configured_level_comes_from_lookup() {
        let lookup = |key: &str| (key == LOG_LEVEL_VAR).then(|| "debug".to_string());
        let config = Config::from_lookup(lookup).unwrap();

        assert_eq!(resolve_level(&config, None), LevelFilter::Debug);
    }

    #[test]
    fn test_init_logger_writes_log_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = config_with(LogLevel::Info);

        init_logger(dir.path(), &config).unwrap();
        assert!(dir.path().join("phash.log").exists());
    }
}
