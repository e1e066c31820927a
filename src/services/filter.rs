//! Relevance filter for pager records.

use regex::{Regex, RegexBuilder, RegexSet, RegexSetBuilder};

use crate::error::{AppError, Result};
use crate::models::{FilterConfig, Record};

/// Decides which records are worth reporting.
///
/// A record is relevant when its message matches any configured pattern or
/// its call type matches the Lifeliner pattern. All matching is
/// case-insensitive.
pub struct RelevanceFilter {
    message_patterns: RegexSet,
    lifeliner: Regex,
}

impl RelevanceFilter {
    /// Compile the filter from configuration.
    pub fn from_config(config: &FilterConfig) -> Result<Self> {
        let message_patterns = RegexSetBuilder::new(&config.patterns)
            .case_insensitive(true)
            .build()
            .map_err(|e| AppError::pattern(config.patterns.join(" | "), e))?;

        let lifeliner = RegexBuilder::new(&config.lifeliner)
            .case_insensitive(true)
            .build()
            .map_err(|e| AppError::pattern(&config.lifeliner, e))?;

        Ok(Self {
            message_patterns,
            lifeliner,
        })
    }

    /// Check whether a record should be reported.
    pub fn is_relevant(&self, record: &Record) -> bool {
        self.message_patterns.is_match(&record.message)
            || self.lifeliner.is_match(&record.call_type)
    }
}
