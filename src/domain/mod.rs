//! Domain types for the audio catalog.
//!
//! This module provides:
//! - `Line` and `AudioFile` records as stored in SQLite
//! - `NewAudioFile`, the insert payload built by the upload workflow
//! - Filename derivation helpers (safe on-disk names, display names, filetypes)

pub mod audio;
pub mod filename;
pub mod line;

pub use audio::{AudioFile, NewAudioFile};
pub use filename::{DerivedName, StreamNameError};
pub use line::Line;
