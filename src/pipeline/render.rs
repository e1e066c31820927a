// src/pipeline/render.rs

//! Rendered line block assembly.

use crate::error::{AppError, Result};
use crate::models::Record;
use crate::services::RelevanceFilter;

/// Line closing every record's block.
pub const SEPARATOR: &str = "-----";

/// Format a record when it is relevant, or return an empty string.
pub fn render(record: &Record, filter: &RelevanceFilter) -> String {
    if filter.is_relevant(record) {
        record.format()
    } else {
        String::new()
    }
}

/// Render the first `count` records, each followed by a separator line.
///
/// Irrelevant records contribute only their separator. Asking for more
/// records than were extracted is an error rather than a silent truncation.
pub fn render_block(
    records: &[Record],
    count: usize,
    filter: &RelevanceFilter,
) -> Result<Vec<String>> {
    let selected = records
        .get(..count)
        .ok_or(AppError::InsufficientRecords {
            requested: count,
            available: records.len(),
        })?;

    let mut lines = Vec::new();
    for record in selected {
        lines.extend(render(record, filter).lines().map(String::from));
        lines.push(SEPARATOR.to_string());
    }
    Ok(lines)
}
