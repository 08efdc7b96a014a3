//! Bounded diagnostic log shown on demand under the panel.

use std::collections::VecDeque;

use chrono::{DateTime, Local};
use tracing::{error, info};

/// Entries kept before the oldest is dropped.
pub const MAX_LOGS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Error,
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub at: DateTime<Local>,
    pub level: LogLevel,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct DebugLog {
    entries: VecDeque<LogEntry>,
}

impl DebugLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(LogLevel::Info, message.into());
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(LogLevel::Error, message.into());
    }

    fn push(&mut self, level: LogLevel, message: String) {
        match level {
            LogLevel::Info => info!(target: "bias_analyzer::panel", "{}", message),
            LogLevel::Error => error!(target: "bias_analyzer::panel", "{}", message),
        }
        if self.entries.len() == MAX_LOGS {
            self.entries.pop_front();
        }
        self.entries.push_back(LogEntry {
            at: Local::now(),
            level,
            message,
        });
    }

    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// One line per entry: `HH:MM:SS [LEVEL] message`.
    pub fn render(&self) -> String {
        self.entries
            .iter()
            .map(|entry| {
                let level = match entry.level {
                    LogLevel::Info => "INFO",
                    LogLevel::Error => "ERROR",
                };
                format!("{} [{}] {}", entry.at.format("%H:%M:%S"), level, entry.message)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
