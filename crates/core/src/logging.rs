//! Diagnostic logging shared by the admin and launch frontends.
//!
//! Every failure the frontends swallow (and turn into a short user-facing
//! message) is reported here first, so the full error is never lost.
//!
//! # Architecture
//!
//! - **LogConfig**: process-wide configuration using atomic operations
//! - **LogLevel**: hierarchical log levels (Off < Error < Warn < Info < Debug < Trace)
//! - **LogCategory**: API traffic, admin screens, launch resolution, emulator boot
//! - **log()**: lazily formatted output to stderr or a log file
//!
//! File output is written by a background thread so a slow disk never
//! stalls a request.
//!
//! # Usage
//!
//! ```rust
//! use romsite_core::logging::{log, LogCategory, LogLevel};
//!
//! log(LogCategory::Launch, LogLevel::Warn, || {
//!     format!("no ROM or tag for {:?}", "sonic3")
//! });
//! ```

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::mpsc::{channel, Sender};
use std::sync::{Mutex, OnceLock};
use std::thread;

/// Log level for controlling verbosity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum LogLevel {
    Off = 0,
    Error = 1,
    Warn = 2,
    Info = 3,
    Debug = 4,
    Trace = 5,
}

impl LogLevel {
    /// Parse log level from string (case-insensitive)
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "off" | "0" => Some(LogLevel::Off),
            "error" | "err" | "1" => Some(LogLevel::Error),
            "warn" | "warning" | "2" => Some(LogLevel::Warn),
            "info" | "3" => Some(LogLevel::Info),
            "debug" | "4" => Some(LogLevel::Debug),
            "trace" | "5" => Some(LogLevel::Trace),
            _ => None,
        }
    }

    fn from_u8(val: u8) -> Self {
        match val {
            1 => LogLevel::Error,
            2 => LogLevel::Warn,
            3 => LogLevel::Info,
            4 => LogLevel::Debug,
            5 => LogLevel::Trace,
            _ => LogLevel::Off,
        }
    }

    fn tag(self) -> &'static str {
        match self {
            LogLevel::Off => "OFF",
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::Trace => "TRACE",
        }
    }
}

/// Log category for the frontend components
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogCategory {
    /// Requests to the site API
    Api,
    /// Admin list and form handling
    Admin,
    /// Identifier resolution on the launch page
    Launch,
    /// Emulator loader configuration and injection
    Emulator,
}

impl LogCategory {
    const COUNT: usize = 4;

    fn index(self) -> usize {
        match self {
            LogCategory::Api => 0,
            LogCategory::Admin => 1,
            LogCategory::Launch => 2,
            LogCategory::Emulator => 3,
        }
    }

    pub fn all() -> &'static [LogCategory] {
        &[
            LogCategory::Api,
            LogCategory::Admin,
            LogCategory::Launch,
            LogCategory::Emulator,
        ]
    }
}

/// Global logging configuration
pub struct LogConfig {
    /// Applies to every category without its own level
    global_level: AtomicU8,
    category_levels: [AtomicU8; LogCategory::COUNT],
    /// Set while a log file is open
    log_sender: Mutex<Option<Sender<String>>>,
}

impl LogConfig {
    /// Errors only, to stderr
    fn new() -> Self {
        Self {
            global_level: AtomicU8::new(LogLevel::Error as u8),
            category_levels: Default::default(),
            log_sender: Mutex::new(None),
        }
    }

    pub fn global() -> &'static Self {
        static INSTANCE: OnceLock<LogConfig> = OnceLock::new();
        INSTANCE.get_or_init(LogConfig::new)
    }

    pub fn set_global_level(&self, level: LogLevel) {
        self.global_level.store(level as u8, Ordering::Relaxed);
    }

    pub fn get_global_level(&self) -> LogLevel {
        LogLevel::from_u8(self.global_level.load(Ordering::Relaxed))
    }

    pub fn set_level(&self, category: LogCategory, level: LogLevel) {
        self.category_levels[category.index()].store(level as u8, Ordering::Relaxed);
    }

    pub fn get_level(&self, category: LogCategory) -> LogLevel {
        LogLevel::from_u8(self.category_levels[category.index()].load(Ordering::Relaxed))
    }

    /// A category level other than Off overrides the global level.
    pub fn should_log(&self, category: LogCategory, level: LogLevel) -> bool {
        if level == LogLevel::Off {
            return false;
        }
        let category_level = self.get_level(category);
        if category_level != LogLevel::Off {
            level <= category_level
        } else {
            level <= self.get_global_level()
        }
    }

    /// Back to the startup configuration (errors only, no log file)
    pub fn reset(&self) {
        self.set_global_level(LogLevel::Error);
        for category in LogCategory::all() {
            self.set_level(*category, LogLevel::Off);
        }
        self.clear_log_file();
    }

    /// Append log output to `path` instead of stderr.
    ///
    /// Replaces any previously configured file.
    pub fn set_log_file(&self, path: PathBuf) -> std::io::Result<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        let (sender, receiver) = channel::<String>();

        thread::Builder::new()
            .name("log-writer".to_string())
            .spawn(move || {
                while let Ok(message) = receiver.recv() {
                    let _ = writeln!(file, "{}", message);
                    let _ = file.flush();
                }
            })?;

        if let Ok(mut slot) = self.log_sender.lock() {
            *slot = Some(sender);
        }
        Ok(())
    }

    /// Stop writing to the log file; the writer thread exits on its own.
    pub fn clear_log_file(&self) {
        if let Ok(mut slot) = self.log_sender.lock() {
            *slot = None;
        }
    }

    fn write_message(&self, message: String) {
        let unsent = match self.log_sender.lock() {
            Ok(slot) => match slot.as_ref() {
                Some(sender) => sender.send(message).err().map(|e| e.0),
                None => Some(message),
            },
            Err(_) => Some(message),
        };
        if let Some(message) = unsent {
            eprintln!("{}", message);
        }
    }
}

/// Log a message for `category` at `level`.
///
/// `message_fn` only runs when the message will actually be written.
pub fn log<F>(category: LogCategory, level: LogLevel, message_fn: F)
where
    F: FnOnce() -> String,
{
    let config = LogConfig::global();
    if config.should_log(category, level) {
        let message = format!("[{}] {:?}: {}", level.tag(), category, message_fn());
        config.write_message(message);
    }
}
