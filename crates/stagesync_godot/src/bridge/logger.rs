//! GodotLogger — LogPrinter → godot_print!/godot_warn!/godot_error! + logs/stage.log

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};

use stagesync_scene::{LogLevel, LogPrinter};

// Godot запускается из godot/ директории, путь относительно project root
const LOG_PATH: &str = "../logs/stage.log";

static FILE_ERROR_REPORTED: AtomicBool = AtomicBool::new(false);

pub struct GodotLogger;

impl LogPrinter for GodotLogger {
    fn print(&self, level: LogLevel, line: &str) {
        match level {
            LogLevel::Error => godot::prelude::godot_error!("{}", line),
            LogLevel::Warning => godot::prelude::godot_warn!("{}", line),
            _ => godot::prelude::godot_print!("[{}] {}", level.as_str(), line),
        }

        Self::append(level, line);
    }
}

impl GodotLogger {
    /// Start a fresh log file for this session.
    pub fn clear_log_file() {
        let path = std::path::Path::new(LOG_PATH);
        let header = format!(
            "=== stagesync session {} ===\n",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
        );

        let result = match path.parent() {
            Some(parent) => std::fs::create_dir_all(parent),
            None => Ok(()),
        }
        .and_then(|_| std::fs::write(path, header));

        if let Err(err) = result {
            Self::report_file_error(&err);
        }
    }

    fn append(level: LogLevel, line: &str) {
        let result = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(LOG_PATH)
            .and_then(|mut file| writeln!(file, "[{}] {}", level.as_str(), line));

        if let Err(err) = result {
            Self::report_file_error(&err);
        }
    }

    /// Ошибку файла репортим один раз, дальше молча
    fn report_file_error(err: &std::io::Error) {
        if first_report(&FILE_ERROR_REPORTED) {
            godot::prelude::godot_error!("Failed to write log file {}: {}", LOG_PATH, err);
        }
    }
}

/// `true` only for the first caller.
fn first_report(flag: &AtomicBool) -> bool {
    !flag.swap(true, Ordering::Relaxed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_error_reported_once() {
        let flag = AtomicBool::new(false);

        assert!(first_report(&flag));
        assert!(!first_report(&flag));
        assert!(!first_report(&flag));
    }
}
