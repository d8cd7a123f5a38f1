//! Custom logging module.
//!
//! Provides a logger implementation that captures log entries and
//! forwards them to a shared buffer for display in the TUI footer.

use log::{Level, Log, Metadata, Record};
use std::sync::{Arc, Mutex};

/// How many log lines the buffer retains.
const BUFFER_CAPACITY: usize = 100;

/// Shared buffer of formatted log lines.
pub type LogBuffer = Arc<Mutex<Vec<String>>>;

/// Format a log record into a string for display
///
pub fn format_log(record: &Record) -> String {
    let timestamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S%.3f");
    let level_str = match record.level() {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    };
    format!("{} {} {}", timestamp, level_str, record.args())
}

/// Logger that captures formatted entries into a shared buffer.
///
pub struct BufferLogger {
    buffer: LogBuffer,
}

impl BufferLogger {
    pub fn new(buffer: LogBuffer) -> Self {
        BufferLogger { buffer }
    }
}

impl Log for BufferLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            if let Ok(mut buffer) = self.buffer.lock() {
                buffer.push(format_log(record));
                let excess = buffer.len().saturating_sub(BUFFER_CAPACITY);
                if excess > 0 {
                    buffer.drain(..excess);
                }
            }
            // If the lock fails the entry is dropped; logging is
            // non-critical here
        }
    }

    fn flush(&self) {
        // No-op
    }
}
