//! Console logger for the `log` facade.
//!
//! Library code (core session/adapter, client, mock server) logs through
//! `log::info!` and friends; this logger prints those records to stderr with
//! a timestamp and a level prefix, keeping stdout free for results.

use chrono::Local;
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

/// Prints log records to stderr.
pub struct ConsoleLogger {
    level: LevelFilter,
}

impl ConsoleLogger {
    pub fn new(level: LevelFilter) -> Self {
        Self { level }
    }

    /// Format one line: `[HH:MM:SS] <prefix> message`.
    pub fn format_line(level: Level, timestamp: &str, message: &str) -> String {
        format!("[{}] {} {}", timestamp, prefix(level), message)
    }
}

fn prefix(level: Level) -> &'static str {
    match level {
        Level::Error => "❌",
        Level::Warn => "⚠️ ",
        Level::Info => "ℹ️ ",
        Level::Debug => "🔍",
        Level::Trace => "  ",
    }
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let timestamp = Local::now().format("%H:%M:%S").to_string();
        eprintln!(
            "{}",
            Self::format_line(record.level(), &timestamp, &record.args().to_string())
        );
    }

    fn flush(&self) {}
}

/// Install the console logger. `verbose` enables debug records.
pub fn init(verbose: bool) -> Result<(), SetLoggerError> {
    let level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };
    log::set_boxed_logger(Box::new(ConsoleLogger::new(level)))?;
    log::set_max_level(level);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_line() {
        let line = ConsoleLogger::format_line(Level::Error, "12:00:01", "upload failed");
        assert_eq!(line, "[12:00:01] ❌ upload failed");
    }

    #[test]
    fn test_level_filter() {
        let logger = ConsoleLogger::new(LevelFilter::Info);
        let debug = Metadata::builder().level(Level::Debug).build();
        let warn = Metadata::builder().level(Level::Warn).build();
        assert!(!logger.enabled(&debug));
        assert!(logger.enabled(&warn));
    }
}
