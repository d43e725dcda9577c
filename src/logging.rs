use chrono::Local;
use log::{LevelFilter, Metadata, Record, SetLoggerError};
use std::collections::HashSet;
use std::io::{self, Write};
use std::sync::OnceLock;

/// Log targets usable with `--debug-filter`.
pub const TOPICS: [&str; 4] = ["physics", "collision", "camera", "input"];

// Custom logger structure
#[derive(Debug)]
struct SlingshotLogger {
    level: LevelFilter,
    debug_filters: Option<HashSet<String>>,
}

impl SlingshotLogger {
    fn topic_enabled(&self, target: &str) -> bool {
        match &self.debug_filters {
            Some(filters) => filters.contains(target) || filters.iter().any(|f| target.starts_with(f.as_str())),
            None => true,
        }
    }
}

// Extract the "[F000123]" tick tag the topic macros put at the start of a message
fn tick_context(message: &str) -> Option<u64> {
    let rest = message.strip_prefix("[F")?;
    let end = rest.find(']')?;
    rest[..end].parse().ok()
}

impl log::Log for SlingshotLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        if metadata.level() > self.level {
            return false;
        }
        // Topic filters only narrow debug and trace output
        match metadata.level() {
            log::Level::Debug | log::Level::Trace => self.topic_enabled(metadata.target()),
            _ => true,
        }
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let level_color = match record.level() {
            log::Level::Error => "\x1B[31m", // Red
            log::Level::Warn => "\x1B[33m",  // Yellow
            log::Level::Info => "\x1B[32m",  // Green
            log::Level::Debug => "\x1B[36m", // Cyan
            log::Level::Trace => "\x1B[35m", // Magenta
        };
        let reset = "\x1B[0m";
        let timestamp = Local::now().format("%H:%M:%S%.3f");

        let message = record.args().to_string();
        let (context, message) = match tick_context(&message) {
            Some(tick) => {
                let body = message.split_once("] ").map_or("", |(_, body)| body);
                (format!("[F{:06}] ", tick), body.to_string())
            }
            None => (String::new(), message),
        };

        let mut stdout = io::stdout().lock();
        let _ = writeln!(
            stdout,
            "{timestamp} {level_color}{level:5}{reset} {context}{target}: {message}",
            level = record.level(),
            target = record.target(),
        );
        let _ = stdout.flush();
    }

    fn flush(&self) {
        let _ = io::stdout().flush();
    }
}

static LOGGER: OnceLock<SlingshotLogger> = OnceLock::new();

/// Parse a `--log-level` string, falling back to `Info` for anything unknown.
pub fn parse_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

fn parse_filters(filter: &str) -> HashSet<String> {
    filter
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

// Initialize the logger with optional debug topic filters
pub fn init_logger(level: LevelFilter, debug_filter: Option<String>) -> Result<(), SetLoggerError> {
    let logger = LOGGER.get_or_init(|| SlingshotLogger {
        level,
        debug_filters: debug_filter.as_deref().map(parse_filters),
    });
    log::set_logger(logger).map(|()| log::set_max_level(level))
}

// Topic macros. The tick variant tags the message with the simulation tick.
#[macro_export]
macro_rules! debug_physics {
    (tick = $tick:expr; $($arg:tt)*) => {
        log::debug!(target: "physics", "[F{}] {}", $tick, format_args!($($arg)*))
    };
    ($($arg:tt)*) => {
        log::debug!(target: "physics", "{}", format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_collision {
    (tick = $tick:expr; $($arg:tt)*) => {
        log::debug!(target: "collision", "[F{}] {}", $tick, format_args!($($arg)*))
    };
    ($($arg:tt)*) => {
        log::debug!(target: "collision", "{}", format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_camera {
    (tick = $tick:expr; $($arg:tt)*) => {
        log::debug!(target: "camera", "[F{}] {}", $tick, format_args!($($arg)*))
    };
    ($($arg:tt)*) => {
        log::debug!(target: "camera", "{}", format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_input {
    ($($arg:tt)*) => {
        log::debug!(target: "input", "{}", format_args!($($arg)*))
    };
}
