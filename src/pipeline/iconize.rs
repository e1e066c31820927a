// src/pipeline/iconize.rs

//! Pictogram tagging of delta lines.

use regex::Regex;

use crate::error::{AppError, Result};
use crate::models::Notification;

/// Report header detector: a comma, a space, then an hour `00`-`29` and a
/// colon, as produced by the date prefix of a rendered record.
const REPORT_HEADER: &str = r", [012][0-9]:";

/// Category symbol prepended to a report header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pictogram {
    Ambulance,
    Fire,
    Lifeliner,
    Police,
}

impl Pictogram {
    pub const ALL: [Self; 4] = [Self::Ambulance, Self::Fire, Self::Lifeliner, Self::Police];

    /// Pick a pictogram from the keywords in a header line.
    pub fn classify(line: &str) -> Self {
        let lower = line.to_lowercase();
        if lower.contains("ambu") {
            Self::Ambulance
        } else if lower.contains("brand") {
            Self::Fire
        } else if lower.contains("life") {
            Self::Lifeliner
        } else {
            Self::Police
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ambulance => "\u{1F691}",
            Self::Fire => "\u{1F692}",
            Self::Lifeliner => "\u{1F681}",
            Self::Police => "\u{1F693}",
        }
    }

    /// Check whether a message line is a tagged report header.
    pub fn tags(line: &str) -> bool {
        Self::ALL.iter().any(|icon| line.starts_with(icon.as_str()))
    }
}

/// Turns a delta into the outgoing message.
pub struct Iconizer {
    report_header: Regex,
}

impl Iconizer {
    pub fn new() -> Result<Self> {
        let report_header =
            Regex::new(REPORT_HEADER).map_err(|e| AppError::pattern(REPORT_HEADER, e))?;
        Ok(Self { report_header })
    }

    /// Drop separators, tag report headers and count them.
    pub fn iconize(&self, delta: &[String]) -> Notification {
        let mut notification = Notification::default();

        for line in delta {
            // Any run of four or more dashes, not only the rendered separator
            if line.starts_with("----") {
                continue;
            }

            if self.report_header.is_match(line) {
                let icon = Pictogram::classify(line);
                notification.message.push_str(icon.as_str());
                notification.message.push(' ');
                notification.report_count += 1;
            }

            notification.message.push_str(line);
            notification.message.push('\n');
        }

        notification
    }
}
