use crate::error::{CliError, Result};
use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::{
    filter::{LevelFilter, Targets},
    fmt::{self},
    prelude::*,
};

/// Emits one record per pooled block, which floods the console on large batches.
const BLOCK_POOLING_TARGET: &str = "paepair::engine::blocks";

fn level_filter(verbosity: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::OFF;
    }
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

fn console_filter(verbosity: u8, quiet: bool) -> Targets {
    let level = level_filter(verbosity, quiet);
    Targets::new()
        .with_default(level)
        .with_target(BLOCK_POOLING_TARGET, level.min(LevelFilter::DEBUG))
}

/// The log file keeps at least per-prediction progress and failures, even under `--quiet`.
fn file_filter(verbosity: u8) -> LevelFilter {
    level_filter(verbosity, false).max(LevelFilter::INFO)
}

/// Installs the global subscriber: compact records on stderr, plus a plain-text copy
/// with thread ids and targets when `log_file` is given.
pub fn setup_logging(verbosity: u8, quiet: bool, log_file: Option<&PathBuf>) -> Result<()> {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(false)
        .compact()
        .with_filter(console_filter(verbosity, quiet));

    let file_layer = match log_file {
        Some(path) => {
            let file = File::create(path).map_err(CliError::Io)?;
            Some(
                fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false)
                    .with_thread_ids(true)
                    .with_target(true)
                    .with_filter(file_filter(verbosity)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .init();

    Ok(())
}
