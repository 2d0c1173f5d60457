//! Audio file metadata records.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Metadata row describing one uploaded audio file and where its bytes live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioFile {
    pub id: String,
    /// Display name: original base name without extension, trimmed and lowercased.
    pub filename: String,
    /// Lowercased extension without the leading dot; empty when the upload had none.
    pub filetype: String,
    pub path: String,
    /// Becomes `None` when the referenced line is deleted (ON DELETE SET NULL).
    pub line_id: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insert payload for `audio_files`; timestamps are assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAudioFile {
    pub id: String,
    pub filename: String,
    pub filetype: String,
    pub path: String,
    pub line_id: Option<String>,
}
