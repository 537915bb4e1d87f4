use crate::error::{Result as ServerErrorResult, ServerError};

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::time::SystemTime;

use fern::Dispatch;
use fern::colors::{Color, ColoredLevelConfig};
use log::info;

/// Install the global fern logger.
///
/// With a `log_file` every line is appended there uncolored. Otherwise lines
/// go to stdout, colored by level when `colored` is set.
pub fn initialize(
    log_level: lp_config::LogLevel,
    log_file: Option<PathBuf>,
    colored: bool,
) -> ServerErrorResult<()> {
    let level_filter = log_level.0;

    let output = match &log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| ServerError::LogFile {
                    path: path.display().to_string(),
                    source: e,
                })?;
            formatted(None).chain(file)
        }
        None => formatted(colored.then(level_colors)).chain(std::io::stdout()),
    };

    Dispatch::new()
        .level(level_filter)
        .chain(output)
        .apply()
        .map_err(|e| ServerError::Logger {
            message: e.to_string(),
        })?;

    let target = log_file
        .as_deref()
        .map_or_else(|| "stdout".to_string(), |p| p.display().to_string());
    info!("Logger initialized: level={level_filter}, output={target}");

    Ok(())
}

fn level_colors() -> ColoredLevelConfig {
    ColoredLevelConfig::new()
        .trace(Color::Magenta)
        .debug(Color::Blue)
        .info(Color::Green)
        .warn(Color::Yellow)
        .error(Color::Red)
}

/// `[<rfc3339> - <LEVEL>] <message> [<file>:<line>]`
fn formatted(colors: Option<ColoredLevelConfig>) -> Dispatch {
    Dispatch::new().format(move |out, message, record| {
        let date = humantime::format_rfc3339(SystemTime::now());
        let file = record.file().unwrap_or("unknown");
        let line = record.line().unwrap_or(0);
        match &colors {
            Some(colors) => out.finish(format_args!(
                "[{date} - {}] {message} [{file}:{line}]",
                colors.color(record.level())
            )),
            None => out.finish(format_args!(
                "[{date} - {}] {message} [{file}:{line}]",
                record.level()
            )),
        }
    })
}
