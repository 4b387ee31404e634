use log::{Level, Log, Metadata, Record};
use std::sync::{Arc, Mutex};

/// Shared buffer of formatted log lines, newest last.
pub type LogBuffer = Arc<Mutex<Vec<String>>>;

/// In-memory logger feeding the log overlay. Writing to stderr would tear the
/// alternate screen, so records are kept in a ring of recent lines instead.
pub struct TuiLogger {
    log_buffer: LogBuffer,
    level: Level,
}

impl TuiLogger {
    pub const CAPACITY: usize = 100;

    pub fn new(level: Level) -> (Self, LogBuffer) {
        let log_buffer: LogBuffer = Arc::new(Mutex::new(Vec::new()));
        (TuiLogger { log_buffer: log_buffer.clone(), level }, log_buffer)
    }

    /// Install as the global logger. Returns the buffer to render from.
    pub fn install(level: Level) -> Result<LogBuffer, log::SetLoggerError> {
        let (logger, buffer) = Self::new(level);
        log::set_boxed_logger(Box::new(logger))
            .map(|()| log::set_max_level(level.to_level_filter()))?;
        Ok(buffer)
    }
}

impl Log for TuiLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let msg = format!("{:<5} {}", record.level(), record.args());
        if let Ok(mut buffer) = self.log_buffer.lock() {
            buffer.push(msg);
            if buffer.len() > Self::CAPACITY {
                let excess = buffer.len() - Self::CAPACITY;
                buffer.drain(..excess);
            }
        }
    }

    fn flush(&self) {}
}

/// The last `n` lines of `buffer`.
pub fn tail(buffer: &LogBuffer, n: usize) -> Vec<String> {
    match buffer.lock() {
        Ok(lines) => lines[lines.len().saturating_sub(n)..].to_vec(),
        Err(_) => Vec::new(),
    }
}
