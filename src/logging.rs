// Conditional logging macros - only active in debug builds

use env_logger::{Builder, Env, Target};
use log::LevelFilter;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        log::debug!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {{}};
}

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        log::info!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {{}};
}

const LOG_DIR_NAME: &str = "absurdle";
const LOG_FILE_NAME: &str = "absurdle.log";

/// Where log records go when the terminal belongs to the UI.
pub fn log_file_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join(LOG_DIR_NAME).join(LOG_FILE_NAME))
}

/// Install the global logger.
///
/// `RUST_LOG` picks the level (default `warn`); `verbose` forces `debug`.
/// With `to_file` set, records are appended to [`log_file_path`] instead of
/// stderr, and that path is returned.
pub fn init_logging(verbose: bool, to_file: bool) -> io::Result<Option<PathBuf>> {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.format(|buf, record| {
        writeln!(
            buf,
            "{} {:<5} [{}] {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            record.level(),
            record.target(),
            record.args()
        )
    });

    let mut written_to = None;
    if to_file && let Some(path) = log_file_path() {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        builder.target(Target::Pipe(Box::new(file)));
        written_to = Some(path);
    }

    // A logger may already be installed (tests, embedding); keep it.
    if builder.try_init().is_err() {
        debug_log!("Logger already initialized");
    }
    Ok(written_to)
}
