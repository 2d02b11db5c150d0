//! The program logger.
//!
//! LandScout logs through the [`log`] facade and this module installs a [`fern`] backend for it.
//! Where each message ends up depends on its level:
//!
//! * `info`, `debug` and `trace` messages are written to stdout;
//! * warnings and errors are written to stderr;
//! * if a log directory is given, ordinary messages are also written to `landscout_info.log` and
//!   warnings and errors to `landscout_error.log`.
//!
//! Terminal output is coloured by level when the stream is a terminal. The level is taken from the
//! `LANDSCOUT_LOG_LEVEL` environment variable if it is set, then from `settings.toml`, and falls
//! back to [`DEFAULT_LOG_LEVEL`]. The log files never go below `info`, so a run with a quiet
//! terminal still leaves a record of its progress.
use anyhow::{Result, bail};
use chrono::Local;
use fern::colors::{Color, ColoredLevelConfig};
use fern::{Dispatch, FormatCallback};
use log::{LevelFilter, Metadata, Record};
use std::env;
use std::fmt::Arguments;
use std::fs::{File, OpenOptions};
use std::io::IsTerminal;
use std::path::Path;
use std::sync::OnceLock;

/// Set once the logger has been installed
static LOGGER_INIT: OnceLock<()> = OnceLock::new();

/// The log level used when neither the environment nor the settings file choose one
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable which takes precedence over the `log_level` setting
const LOG_LEVEL_ENV_VAR: &str = "LANDSCOUT_LOG_LEVEL";

/// Log file for ordinary progress messages
const LOG_INFO_FILE_NAME: &str = "landscout_info.log";

/// Log file for warnings and errors
const LOG_ERROR_FILE_NAME: &str = "landscout_error.log";

/// Whether the program logger has been initialised
pub fn is_logger_initialised() -> bool {
    LOGGER_INIT.get().is_some()
}

/// Install the program logger.
///
/// # Arguments
///
/// * `log_level_from_settings`: The `log_level` from `settings.toml`, if any
/// * `log_dir`: Directory in which to create the log files. No files are written if `None`.
///
/// # Panics
///
/// If a logger has already been installed for this process.
pub fn init(log_level_from_settings: Option<&str>, log_dir: Option<&Path>) -> Result<()> {
    let from_env = env::var(LOG_LEVEL_ENV_VAR).ok();
    let log_level = choose_log_level(from_env.as_deref(), log_level_from_settings)?;

    let mut dispatch = Dispatch::new().chain(terminal_dispatch(log_level));
    if let Some(log_dir) = log_dir {
        dispatch = dispatch.chain(file_dispatch(log_dir, log_level)?);
    }

    dispatch.apply().expect("Logger already initialised");
    LOGGER_INIT.set(()).unwrap();

    Ok(())
}

/// Pick the log level, preferring the environment variable to the settings file
fn choose_log_level(from_env: Option<&str>, from_settings: Option<&str>) -> Result<LevelFilter> {
    parse_log_level(from_env.or(from_settings).unwrap_or(DEFAULT_LOG_LEVEL))
}

/// Convert a log level name (`off`, `error`, `warn`, `info`, `debug` or `trace`, in any case) to a
/// [`LevelFilter`]
pub fn parse_log_level(log_level: &str) -> Result<LevelFilter> {
    let level = match log_level.trim().to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        unknown => bail!("Unknown log level: {unknown}"),
    };

    Ok(level)
}

/// Whether a message is a warning or an error, which go to stderr and the error log
fn is_problem(metadata: &Metadata) -> bool {
    metadata.level() <= LevelFilter::Warn
}

/// Output to stdout and stderr at the chosen level
fn terminal_dispatch(log_level: LevelFilter) -> Dispatch {
    let colours = ColoredLevelConfig::new()
        .error(Color::Red)
        .warn(Color::Yellow)
        .info(Color::Green)
        .debug(Color::Blue)
        .trace(Color::Magenta);
    let stdout_colours = std::io::stdout().is_terminal().then_some(colours);
    let stderr_colours = std::io::stderr().is_terminal().then_some(colours);

    Dispatch::new()
        .level(log_level)
        .chain(
            Dispatch::new()
                .filter(|metadata| !is_problem(metadata))
                .format(move |out, message, record| {
                    write_record(out, message, record, stdout_colours.as_ref());
                })
                .chain(std::io::stdout()),
        )
        .chain(
            Dispatch::new()
                .filter(is_problem)
                .format(move |out, message, record| {
                    write_record(out, message, record, stderr_colours.as_ref());
                })
                .chain(std::io::stderr()),
        )
}

/// Output to the info and error log files in `log_dir`.
///
/// The info file records at least `info` messages, even if the terminal is quieter.
fn file_dispatch(log_dir: &Path, log_level: LevelFilter) -> Result<Dispatch> {
    let create = |file_name| -> Result<File> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(log_dir.join(file_name))?;
        Ok(file)
    };

    Ok(Dispatch::new()
        .chain(
            Dispatch::new()
                .level(log_level.max(LevelFilter::Info))
                .filter(|metadata| !is_problem(metadata))
                .format(write_plain)
                .chain(create(LOG_INFO_FILE_NAME)?),
        )
        .chain(
            Dispatch::new()
                .level(LevelFilter::Warn)
                .format(write_plain)
                .chain(create(LOG_ERROR_FILE_NAME)?),
        ))
}

/// Write a log line without colour
fn write_plain(out: FormatCallback, message: &Arguments, record: &Record) {
    write_record(out, message, record, None);
}

/// Write a log line as `[time level target] message`, colouring the level if asked to
fn write_record(
    out: FormatCallback,
    message: &Arguments,
    record: &Record,
    colours: Option<&ColoredLevelConfig>,
) {
    let timestamp = Local::now().format("%H:%M:%S");
    let target = record.target();

    match colours {
        Some(colours) => {
            let level = colours.color(record.level());
            out.finish(format_args!("[{timestamp} {level} {target}] {message}"));
        }
        None => {
            let level = record.level();
            out.finish(format_args!("[{timestamp} {level} {target}] {message}"));
        }
    }
}
