//! Line (category) record.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A named category that audio files are grouped under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    pub id: String,
    /// Unique, stored lowercase.
    pub name: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Normalize a requested line name: trimmed and lowercased.
///
/// Returns `None` when nothing is left after trimming.
pub fn normalize_line_name(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}
