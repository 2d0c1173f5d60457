//! Database module for SQLite operations.
//!
//! This module provides:
//! - Database initialization and schema creation
//! - SQLite pragma configuration
//! - Repository layer for lines and audio files

pub mod migrations;
pub mod repo;

pub use migrations::{init_db, InitError};
pub use repo::Repository;
