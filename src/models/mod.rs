// src/models/mod.rs

//! Domain models for the notifier.

mod config;
mod record;

// Re-export all public types
pub use config::{
    Config, FilterConfig, GlobalConfig, HttpConfig, MAX_LINES, RunOptions, RunSettings,
    TelegramConfig,
};
pub use record::{Fragment, FragmentKind, Record};

/// Outcome of folding the iconized delta into one message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notification {
    /// Text to print or send
    pub message: String,
    /// Number of report header lines found
    pub report_count: usize,
}

impl Notification {
    /// Whether any report header made it into the message.
    pub fn has_reports(&self) -> bool {
        self.report_count > 0
    }
}
