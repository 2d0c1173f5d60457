//! Repository layer for database operations.
//!
//! This module provides the `Repository` struct for all database operations.
//! Methods are organized across submodules by entity:
//! - `lines.rs` - Line create and lookup operations
//! - `audio.rs` - Audio file create, lookup, and delete operations
//!
//! Lookups by id or name fail with `sqlx::Error::RowNotFound` when the row is absent.
//! Errors are returned as-is; callers decide how to classify them.

mod audio;
mod lines;

use sqlx::sqlite::SqlitePool;

/// Repository for database operations.
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Repository { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// True when `err` is a UNIQUE constraint violation reported by the database.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.is_unique_violation(),
        _ => false,
    }
}
