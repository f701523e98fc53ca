use crate::error::{Result as ServerErrorResult, ServerError};

use cr_config::LogLevel;

use std::panic::Location;
use std::path::PathBuf;
use std::time::SystemTime;

use error_location::ErrorLocation;
use fern::Dispatch;
use fern::colors::{Color, ColoredLevelConfig};
use log::{Record, info};

fn line(out: fern::FormatCallback, message: &std::fmt::Arguments, record: &Record, level: String) {
    out.finish(format_args!(
        "[{date} - {level}] {message} [{file}:{line}]",
        date = humantime::format_rfc3339(SystemTime::now()),
        level = level,
        message = message,
        file = record.file().unwrap_or("unknown"),
        line = record.line().unwrap_or(0),
    ))
}

/// Install the global logger.
///
/// `log_file` of `None` writes to stdout, colored when `colored` is set.
/// File output is always plain and appends.
#[track_caller]
pub fn initialize(
    log_level: LogLevel,
    log_file: Option<PathBuf>,
    colored: bool,
) -> ServerErrorResult<()> {
    let level_filter = log_level.0;
    let caller = Location::caller();

    let dispatch = if let Some(ref log_path) = log_file {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)
            .map_err(|e| ServerError::Logger {
                message: format!("Failed to open log file {}: {}", log_path.display(), e),
                location: ErrorLocation::from(caller),
            })?;

        Dispatch::new()
            .format(|out, message, record| line(out, message, record, record.level().to_string()))
            .chain(file)
    } else if colored {
        let colors = ColoredLevelConfig::new()
            .trace(Color::Magenta)
            .debug(Color::Blue)
            .info(Color::Green)
            .warn(Color::Yellow)
            .error(Color::Red);

        Dispatch::new()
            .format(move |out, message, record| {
                line(out, message, record, colors.color(record.level()).to_string())
            })
            .chain(std::io::stdout())
    } else {
        Dispatch::new()
            .format(|out, message, record| line(out, message, record, record.level().to_string()))
            .chain(std::io::stdout())
    };

    Dispatch::new()
        .level(level_filter)
        // reqwest's connection pool is chatty at debug
        .level_for("hyper_util", log::LevelFilter::Warn)
        .chain(dispatch)
        .apply()
        .map_err(|e| ServerError::Logger {
            message: format!("Failed to initialize logger: {e}"),
            location: ErrorLocation::from(caller),
        })?;

    match log_file {
        Some(ref path) => info!(
            "Logger initialized: level={:?}, file={}",
            level_filter,
            path.display()
        ),
        None => info!("Logger initialized: level={:?}, stdout", level_filter),
    }

    // Worker spans and events are emitted through `tracing`
    tracing_log::LogTracer::init().ok();

    Ok(())
}
