//! Tracing setup for the binary.
//!
//! The player owns the terminal while it runs, so stderr is only an option for
//! the dump formats. Anything else logs to `--log-file` or not at all.

use crate::error::CliError;
use std::fs::File;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Mutex;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{Layer, Registry};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
    Off,
}

impl LogTarget {
    pub fn choose(log_file: Option<PathBuf>, screen_is_busy: bool) -> Self {
        match log_file {
            Some(path) => LogTarget::File(path),
            None if screen_is_busy => LogTarget::Off,
            None => LogTarget::Stderr,
        }
    }
}

/// `-v` raises the configured level to debug, `-vv` to trace.
pub fn level_filter(configured: &str, verbosity: u8) -> Result<LevelFilter, CliError> {
    match verbosity {
        0 => LevelFilter::from_str(configured).map_err(|_| CliError::LogLevel(configured.into())),
        1 => Ok(LevelFilter::DEBUG),
        _ => Ok(LevelFilter::TRACE),
    }
}

pub fn init(target: LogTarget, level: LevelFilter) -> Result<(), CliError> {
    let layer: Box<dyn Layer<Registry> + Send + Sync> = match target {
        LogTarget::Off => return Ok(()),
        LogTarget::Stderr => tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_filter(level)
            .boxed(),
        LogTarget::File(path) => {
            let file = File::create(path)?;
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .with_filter(level)
                .boxed()
        }
    };

    tracing_subscriber::registry()
        .with(layer)
        .try_init()
        .map_err(|err| CliError::Logging(err.to_string()))
}
