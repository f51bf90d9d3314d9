//! Tracing subscriber setup: stderr plus a daily log file.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::LoggingConfig;

/// Installs the global subscriber and returns the log file path.
///
/// `RUST_LOG` overrides the configured level; each `-v` raises it. The
/// file receives every enabled event, stderr only warnings unless verbose.
pub(crate) fn init(config: &LoggingConfig, verbose: u8) -> Result<PathBuf> {
    let level = match verbose {
        0 => config.level.as_str(),
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .with_context(|| format!("Invalid log level: {level}"))?;

    fs::create_dir_all(&config.dir)
        .with_context(|| format!("Failed to create log directory {}", config.dir.display()))?;
    let path = config.dir.join(log_file_name(Local::now().date_naive()));
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    let stderr_level = if verbose > 0 {
        LevelFilter::TRACE
    } else {
        LevelFilter::WARN
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_filter(stderr_level),
        )
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(path)
}

fn log_file_name(date: NaiveDate) -> String {
    format!("{}.log", date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_file_name() {
        let date = NaiveDate::from_ymd_opt(2023, 1, 9).unwrap();
        assert_eq!(log_file_name(date), "2023-01-09.log");
    }
}
