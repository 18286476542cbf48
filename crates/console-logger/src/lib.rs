//! Console Logger
//!
//! A `log` backend that writes to the browser console (stderr off-wasm)
//! and keeps the most recent lines in a circular buffer.

use std::collections::VecDeque;
use std::sync::{Mutex, OnceLock};

use chrono::Local;
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

/// Default number of lines retained in the buffer
pub const DEFAULT_CAPACITY: usize = 200;

static LOGGER: OnceLock<ConsoleLogger> = OnceLock::new();

/// Fixed-size buffer that drops the oldest line when full
#[derive(Debug)]
pub struct RingBuffer {
    lines: VecDeque<String>,
    capacity: usize,
}

impl RingBuffer {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            lines: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, line: String) {
        if self.lines.len() == self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
    }

    /// Lines in the order they were written, oldest first
    pub fn snapshot(&self) -> Vec<String> {
        self.lines.iter().cloned().collect()
    }
}

pub struct ConsoleLogger {
    level: LevelFilter,
    buffer: Mutex<RingBuffer>,
}

impl ConsoleLogger {
    pub fn new(level: LevelFilter, capacity: usize) -> Self {
        Self {
            level,
            buffer: Mutex::new(RingBuffer::new(capacity)),
        }
    }

    pub fn recent_lines(&self) -> Vec<String> {
        self.buffer
            .lock()
            .map(|buffer| buffer.snapshot())
            .unwrap_or_default()
    }
}

/// Format a record the same way for the console and the buffer
pub fn format_line(level: Level, target: &str, message: &str) -> String {
    format!(
        "{} {:<5} {}: {}",
        Local::now().format("%H:%M:%S%.3f"),
        level,
        target,
        message
    )
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_line(record.level(), record.target(), &record.args().to_string());
        write_console(record.level(), &line);
        if let Ok(mut buffer) = self.buffer.lock() {
            buffer.push(line);
        }
    }

    fn flush(&self) {}
}

#[cfg(target_arch = "wasm32")]
fn write_console(level: Level, line: &str) {
    let value = &wasm_bindgen::JsValue::from_str(line);
    match level {
        Level::Error => web_sys::console::error_1(value),
        Level::Warn => web_sys::console::warn_1(value),
        Level::Info => web_sys::console::info_1(value),
        Level::Debug | Level::Trace => web_sys::console::debug_1(value),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn write_console(_level: Level, line: &str) {
    eprintln!("{}", line);
}

/// Install the logger as the global `log` backend.
///
/// Calling this twice returns the error from `log::set_logger`.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    init_with_capacity(level, DEFAULT_CAPACITY)
}

pub fn init_with_capacity(level: LevelFilter, capacity: usize) -> Result<(), SetLoggerError> {
    let logger = LOGGER.get_or_init(|| ConsoleLogger::new(level, capacity));
    log::set_logger(logger)?;
    log::set_max_level(level);
    Ok(())
}

/// Recent lines from the installed logger (empty before `init`)
pub fn recent_lines() -> Vec<String> {
    LOGGER.get().map(ConsoleLogger::recent_lines).unwrap_or_default()
}
