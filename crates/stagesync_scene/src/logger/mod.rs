//! Process-wide logger
//!
//! Ядро не знает, куда печатать: хост (headless тесты, Godot) ставит свой
//! `LogPrinter`. Без printer'а все вызовы — no-op.

use once_cell::sync::Lazy;
use std::sync::Mutex;

static PRINTER: Lazy<Mutex<Option<Box<dyn LogPrinter>>>> = Lazy::new(|| Mutex::new(None));

static MIN_LEVEL: Lazy<Mutex<LogLevel>> = Lazy::new(|| Mutex::new(LogLevel::Debug));

/// Severity, ordered from chattiest to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
        }
    }
}

/// Sink for already-formatted, timestamped lines.
pub trait LogPrinter: Send + Sync {
    fn print(&self, level: LogLevel, line: &str);
}

/// Stdout printer used by headless runs.
pub struct ConsoleLogger;

impl LogPrinter for ConsoleLogger {
    fn print(&self, level: LogLevel, line: &str) {
        println!("[{}] {}", level.as_str(), line);
    }
}

pub fn set_logger(printer: Box<dyn LogPrinter>) {
    if let Ok(mut slot) = PRINTER.lock() {
        *slot = Some(printer);
    }
}

/// Install `printer` unless another one is already in place.
pub fn set_logger_if_needed(printer: Box<dyn LogPrinter>) {
    if let Ok(mut slot) = PRINTER.lock() {
        if slot.is_none() {
            *slot = Some(printer);
        }
    }
}

pub fn set_log_level(level: LogLevel) {
    if let Ok(mut min) = MIN_LEVEL.lock() {
        *min = level;
    }
}

pub fn log_level() -> LogLevel {
    MIN_LEVEL.lock().map(|min| *min).unwrap_or(LogLevel::Debug)
}

pub fn init_logger() {
    set_logger_if_needed(Box::new(ConsoleLogger));
}

pub fn log(message: &str) {
    log_with_level(LogLevel::Debug, message);
}

pub fn log_info(message: &str) {
    log_with_level(LogLevel::Info, message);
}

pub fn log_warning(message: &str) {
    log_with_level(LogLevel::Warning, message);
}

pub fn log_error(message: &str) {
    log_with_level(LogLevel::Error, message);
}

pub fn log_with_level(level: LogLevel, message: &str) {
    if level < log_level() {
        return;
    }

    let Ok(slot) = PRINTER.lock() else {
        return;
    };

    if let Some(printer) = slot.as_ref() {
        // Timestamp ставим здесь, printer'ы получают готовую строку
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        printer.print(level, &format!("[{}] {}", timestamp, message));
    }
}
