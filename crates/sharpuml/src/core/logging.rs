//! Logging setup
//!
//! Events go to stderr so a diagram written to stdout is never mixed with
//! log output. Without explicit arguments the level comes from
//! `SHARPUML_LOG_LEVEL`, then `RUST_LOG`, then `info`; the format from
//! `SHARPUML_LOG_FORMAT`, then `compact`.

use std::str::FromStr;

use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "compact" => Ok(LogFormat::Compact),
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

/// Install the global subscriber.
///
/// Fails on an unknown format or when a subscriber is already installed.
pub fn init_logging(
    level: Option<&str>,
    format: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let filter = match level {
        Some(level) => level_filter(level),
        None => std::env::var("SHARPUML_LOG_LEVEL")
            .map(|level| level_filter(&level))
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| EnvFilter::new("info")),
    };

    let format = match format {
        Some(format) => format.to_string(),
        None => std::env::var("SHARPUML_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string()),
    };
    let format = LogFormat::from_str(&format).map_err(|e| format!("Invalid log format: {}", e))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Compact => builder
            .compact()
            .with_target(false)
            .try_init()
            .map_err(|e| e as Box<dyn std::error::Error>)?,
        LogFormat::Pretty => builder
            .pretty()
            .with_file(true)
            .with_line_number(true)
            .try_init()
            .map_err(|e| e as Box<dyn std::error::Error>)?,
        LogFormat::Json => builder
            .json()
            .try_init()
            .map_err(|e| e as Box<dyn std::error::Error>)?,
    }

    Ok(())
}

/// A bad directive falls back to `info` rather than silencing everything
fn level_filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"))
}
