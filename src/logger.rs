use crate::config::Config;
use chrono::{DateTime, Local};
use colored::*;
use log::{Level, LevelFilter, Metadata, Record};
use once_cell::sync::Lazy;
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::sync::Mutex;
use std::time::{Duration, Instant};
use uuid::Uuid;

static TUTOR_LOGGER: Lazy<TutorLogger> = Lazy::new(TutorLogger::new);

pub fn init() -> Result<(), String> {
    init_with_config(LoggerConfig::from_env())
}

pub fn init_with_config(config: LoggerConfig) -> Result<(), String> {
    let level = config.min_level;
    TUTOR_LOGGER.update_config(config)?;

    log::set_logger(&*TUTOR_LOGGER).map_err(|e| format!("Failed to set logger: {:?}", e))?;
    log::set_max_level(level);
    Ok(())
}

fn level_color(level: Level) -> Color {
    match level {
        Level::Trace => Color::Cyan,
        Level::Debug => Color::Blue,
        Level::Info => Color::Green,
        Level::Warn => Color::Yellow,
        Level::Error => Color::Red,
    }
}

fn level_emoji(level: Level) -> &'static str {
    match level {
        Level::Trace => "🔍",
        Level::Debug => "🐛",
        Level::Info => "💡",
        Level::Warn => "⚠️",
        Level::Error => "❌",
    }
}

/// One emitted line, as written in JSON mode.
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub id: String,
    pub timestamp: DateTime<Local>,
    pub level: String,
    pub message: String,
    pub module: String,
    pub line: u32,
}

impl LogEntry {
    fn from_record(record: &Record) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            timestamp: Local::now(),
            level: record.level().to_string(),
            message: record.args().to_string(),
            module: record.module_path().unwrap_or("unknown").to_string(),
            line: record.line().unwrap_or(0),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub min_level: LevelFilter,
    pub show_colors: bool,
    pub show_emojis: bool,
    pub show_module: bool,
    pub timestamp_format: String,
    pub output_json: bool,
    pub log_file_path: Option<String>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            min_level: LevelFilter::Info,
            show_colors: true,
            show_emojis: true,
            show_module: true,
            timestamp_format: "%Y-%m-%d %H:%M:%S%.3f".to_string(),
            output_json: false,
            log_file_path: None,
        }
    }
}

impl LoggerConfig {
    /// Reads `LOG_LEVEL`, `LOG_JSON` and `LOG_FILE`.
    pub fn from_env() -> Self {
        let mut config = match std::env::var("LOG_JSON").as_deref() {
            Ok("true") | Ok("1") => Self::production(),
            _ => Self::development(),
        };
        if let Some(level) = std::env::var("LOG_LEVEL")
            .ok()
            .and_then(|level| level.parse().ok())
        {
            config.min_level = level;
        }
        if let Ok(path) = std::env::var("LOG_FILE") {
            config.log_file_path = Some(path);
        }
        config
    }

    pub fn production() -> Self {
        Self {
            show_colors: false,
            show_emojis: false,
            output_json: true,
            ..Default::default()
        }
    }

    pub fn development() -> Self {
        Self {
            min_level: LevelFilter::Debug,
            ..Default::default()
        }
    }
}

pub struct TutorLogger {
    config: Mutex<LoggerConfig>,
    log_file: Mutex<Option<File>>,
}

impl TutorLogger {
    fn new() -> Self {
        Self {
            config: Mutex::new(LoggerConfig::default()),
            log_file: Mutex::new(None),
        }
    }

    fn update_config(&self, new_config: LoggerConfig) -> Result<(), String> {
        let file = match &new_config.log_file_path {
            Some(path) => Some(
                OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .map_err(|e| format!("Failed to open log file {}: {}", path, e))?,
            ),
            None => None,
        };

        if let Ok(mut log_file) = self.log_file.lock() {
            *log_file = file;
        }
        if let Ok(mut config) = self.config.lock() {
            *config = new_config;
        }
        Ok(())
    }

    fn format_line(&self, entry: &LogEntry, level: Level, config: &LoggerConfig) -> String {
        if config.output_json {
            return serde_json::to_string(entry).unwrap_or_default();
        }

        let timestamp = entry.timestamp.format(&config.timestamp_format).to_string();
        let level_str = if config.show_emojis {
            format!("{} {}", level_emoji(level), entry.level)
        } else {
            entry.level.clone()
        };
        let module = if config.show_module {
            format!("{}:{} ", entry.module, entry.line)
        } else {
            String::new()
        };

        if config.show_colors {
            format!(
                "{} [{}] {}{}",
                timestamp.bright_black(),
                level_str.color(level_color(level)).bold(),
                module.bright_blue(),
                entry.message
            )
        } else {
            format!("{} [{}] {}{}", timestamp, level_str, module, entry.message)
        }
    }
}

impl log::Log for TutorLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.config
            .lock()
            .map(|config| metadata.level() <= config.min_level)
            .unwrap_or(true)
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let entry = LogEntry::from_record(record);
        let Ok(config) = self.config.lock() else {
            return;
        };
        println!("{}", self.format_line(&entry, record.level(), &config));

        if let Ok(mut guard) = self.log_file.lock() {
            if let Some(file) = guard.as_mut() {
                let plain = LoggerConfig {
                    show_colors: false,
                    ..config.clone()
                };
                let _ = writeln!(file, "{}", self.format_line(&entry, record.level(), &plain));
            }
        }
    }

    fn flush(&self) {
        let _ = io::stdout().flush();
        if let Ok(mut guard) = self.log_file.lock() {
            if let Some(file) = guard.as_mut() {
                let _ = file.flush();
            }
        }
    }
}

/// Logs how long a request took when dropped.
pub struct Timer {
    start: Instant,
    name: String,
    request_id: String,
}

impl Timer {
    pub fn new(name: &str) -> Self {
        let request_id = Uuid::new_v4().simple().to_string()[..8].to_string();
        log::info!("⏱️  {} [req:{}]", name, request_id);
        Self {
            start: Instant::now(),
            name: name.to_string(),
            request_id,
        }
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        log::info!(
            "⏱️  {} [req:{}] completed in {}ms",
            self.name,
            self.request_id,
            self.elapsed().as_millis()
        );
    }
}

pub fn timer(name: &str) -> Timer {
    Timer::new(name)
}

pub fn log_startup_info(config: &Config) {
    log::info!("🚀 Starting {} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    log::info!("🌐 Server will run on http://{}:{}", config.host, config.port);
    log::info!("⚙️  Configuration loaded:");
    log::info!("   Text model: {}", config.gemini.text_model);
    log::info!("   Image model: {}", config.gemini.image_model);
    log::info!(
        "   Default API key: {}",
        if config.gemini.api_key.is_some() { "✅" } else { "❌" }
    );
    log::info!(
        "   Hugging Face key: {}",
        if config.hf_api_key.is_some() { "✅" } else { "❌" }
    );
    log::info!("   Code dir: {}", config.dirs.code_dir.display());
    log::info!("   Audio dir: {}", config.dirs.audio_dir.display());
    log::info!(
        "   Retry: {} attempts, {}s backoff",
        config.retry.max_attempts,
        config.retry.backoff.as_secs()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logger_presets() {
        let dev = LoggerConfig::development();
        assert_eq!(dev.min_level, LevelFilter::Debug);
        assert!(dev.show_colors);

        let prod = LoggerConfig::production();
        assert!(!prod.show_colors);
        assert!(prod.output_json);
    }

    #[test]
    fn test_plain_line_format() {
        let logger = TutorLogger::new();
        let config = LoggerConfig {
            show_colors: false,
            show_emojis: false,
            show_module: false,
            ..Default::default()
        };
        let entry = LogEntry {
            id: "id".into(),
            timestamp: Local::now(),
            level: "WARN".into(),
            message: "Rate limit hit".into(),
            module: "mltutor::tutor".into(),
            line: 7,
        };

        let line = logger.format_line(&entry, Level::Warn, &config);
        assert!(line.ends_with("[WARN] Rate limit hit"));
    }

    #[test]
    fn test_timer_request_id() {
        let timer = timer("GET /api/model-info");
        assert_eq!(timer.request_id().len(), 8);
    }
}
