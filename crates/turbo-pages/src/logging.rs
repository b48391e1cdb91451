//! Structured binding logs scoped to one page.

use std::collections::BTreeMap;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::page::PageId;

/// Log level for binding logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

/// Output format for logs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per entry.
    #[default]
    Json,
    /// `[LEVEL] page message | k=v` lines.
    Human,
}

/// One binding event.
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub level: LogLevel,
    pub page: String,
    pub message: String,
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
    pub elapsed_us: u64,
}

impl LogEntry {
    /// Render the entry in the given format.
    pub fn format(&self, format: LogFormat) -> String {
        match format {
            LogFormat::Json => {
                serde_json::to_string(self).unwrap_or_else(|_| self.message.clone())
            }
            LogFormat::Human => {
                let level = format!("{:?}", self.level).to_ascii_uppercase();
                let mut line = format!(
                    "[{}] {} {} ({}us)",
                    level, self.page, self.message, self.elapsed_us
                );
                for (i, (key, value)) in self.fields.iter().enumerate() {
                    line.push_str(if i == 0 { " | " } else { " " });
                    line.push_str(&format!("{}={}", key, value));
                }
                line
            }
        }
    }
}

/// Logger for a single page binding.
///
/// Entries go out as `tracing` events under the `turbo_pages` target.
#[derive(Debug, Clone)]
pub struct StructuredLogger {
    page: PageId,
    started: Instant,
    min_level: LogLevel,
    format: LogFormat,
}

impl StructuredLogger {
    /// Create a logger for a page, at info level in JSON format.
    pub fn new(page: PageId) -> Self {
        Self {
            page,
            started: Instant::now(),
            min_level: LogLevel::Info,
            format: LogFormat::Json,
        }
    }

    /// Set minimum log level.
    pub fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Set output format.
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Whether entries at this level are emitted.
    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    /// Start an event at the given level.
    pub fn event(&self, level: LogLevel, message: impl Into<String>) -> LogEvent<'_> {
        LogEvent {
            logger: self,
            entry: LogEntry {
                level,
                page: self.page.to_string(),
                message: message.into(),
                fields: BTreeMap::new(),
                elapsed_us: self.started.elapsed().as_micros() as u64,
            },
        }
    }
}

/// An event under construction.
pub struct LogEvent<'a> {
    logger: &'a StructuredLogger,
    entry: LogEntry,
}

impl LogEvent<'_> {
    /// Attach a field. Values that fail to serialize are recorded as `null`.
    pub fn field(mut self, key: &str, value: impl Serialize) -> Self {
        let value = serde_json::to_value(value).unwrap_or(Value::Null);
        self.entry.fields.insert(key.to_string(), value);
        self
    }

    /// The entry as it would be emitted.
    pub fn entry(&self) -> &LogEntry {
        &self.entry
    }

    /// Emit the event if its level is enabled.
    pub fn emit(self) {
        if !self.logger.enabled(self.entry.level) {
            return;
        }

        let line = self.entry.format(self.logger.format);
        match self.entry.level {
            LogLevel::Trace => tracing::trace!(target: "turbo_pages", "{}", line),
            LogLevel::Debug => tracing::debug!(target: "turbo_pages", "{}", line),
            LogLevel::Info => tracing::info!(target: "turbo_pages", "{}", line),
            LogLevel::Warn => tracing::warn!(target: "turbo_pages", "{}", line),
            LogLevel::Error => tracing::error!(target: "turbo_pages", "{}", line),
        }
    }
}
