//! # Stderr Logger
//!
//! A minimal [`log`] backend for the CLI. Records are written as
//!
//! ```text
//! [LEVEL] file:line message
//! ```
//!
//! The level lives in the logger value itself; [`StderrLogger::install`]
//! also sets `log`'s max level so filtered records cost nothing.

use std::io::Write;

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

#[derive(Debug, Clone, Copy)]
pub struct StderrLogger {
    level: LevelFilter,
}

impl StderrLogger {
    pub fn new(level: LevelFilter) -> Self {
        Self { level }
    }

    pub fn level(&self) -> LevelFilter {
        self.level
    }

    /// Make this the process-wide `log` backend.
    pub fn install(self) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(self.level);
        Ok(())
    }
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let _ = writeln!(std::io::stderr().lock(), "{}", format_record(record));
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn format_record(record: &Record) -> String {
    format!(
        "[{}] {}:{} {}",
        record.level(),
        record.file().unwrap_or("?"),
        record.line().unwrap_or(0),
        record.args()
    )
}
