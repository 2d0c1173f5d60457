//! Database initialization and schema management.

use sqlx::sqlite::{SqliteConnection, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Schema objects in creation order. `audio_files` references `lines`, so `lines` goes first.
const SCHEMA: [(&str, &str); 4] = [
    (
        "table 'lines'",
        r#"
        CREATE TABLE IF NOT EXISTS lines (
            id TEXT NOT NULL PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    ),
    (
        "trigger 'update_lines_updated_at'",
        r#"
        CREATE TRIGGER IF NOT EXISTS update_lines_updated_at
        AFTER UPDATE ON lines
        FOR EACH ROW
        BEGIN
            UPDATE lines SET updated_at = CURRENT_TIMESTAMP WHERE id = OLD.id;
        END
        "#,
    ),
    (
        "table 'audio_files'",
        r#"
        CREATE TABLE IF NOT EXISTS audio_files (
            id TEXT NOT NULL PRIMARY KEY,
            filename TEXT UNIQUE,
            filetype TEXT,
            path TEXT,
            line_id TEXT,
            created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
            FOREIGN KEY(line_id) REFERENCES lines(id) ON DELETE SET NULL
        )
        "#,
    ),
    (
        "trigger 'update_audio_files_updated_at'",
        r#"
        CREATE TRIGGER IF NOT EXISTS update_audio_files_updated_at
        AFTER UPDATE ON audio_files
        FOR EACH ROW
        BEGIN
            UPDATE audio_files SET updated_at = CURRENT_TIMESTAMP WHERE id = OLD.id;
        END
        "#,
    ),
];

#[derive(Debug, Error)]
pub enum InitError {
    #[error("failed to open database at {path}: {source}")]
    Connect {
        path: String,
        #[source]
        source: sqlx::Error,
    },
    #[error("failed to create {object}: {source}")]
    Schema {
        object: &'static str,
        #[source]
        source: sqlx::Error,
    },
}

/// Open (or create) the SQLite database and ensure the schema exists.
pub async fn init_db(db_path: &str) -> Result<SqlitePool, InitError> {
    if let Some(parent) = Path::new(db_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).ok();
        }
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .after_connect(|conn, _meta| Box::pin(async move { configure_pragmas_conn(conn).await }))
        .connect(&format!("sqlite:{}?mode=rwc", db_path))
        .await
        .map_err(|source| InitError::Connect {
            path: db_path.to_string(),
            source,
        })?;

    run_migrations(&pool).await?;

    info!("Database initialized with tables 'lines' and 'audio_files' at {}", db_path);
    Ok(pool)
}

/// Create every schema object that does not exist yet, in order.
async fn run_migrations(pool: &SqlitePool) -> Result<(), InitError> {
    info!("Running database migrations...");

    for (object, statement) in SCHEMA {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(|source| InitError::Schema { object, source })?;
    }

    info!("Migrations completed successfully");
    Ok(())
}

async fn configure_pragmas_conn(conn: &mut SqliteConnection) -> Result<(), sqlx::Error> {
    use sqlx::Row;

    // ON DELETE SET NULL on audio_files.line_id only fires with enforcement on.
    sqlx::query("PRAGMA foreign_keys = ON")
        .execute(&mut *conn)
        .await?;

    // journal_mode returns the actual mode set; must use fetch to get result
    let row = sqlx::query("PRAGMA journal_mode = WAL")
        .fetch_one(&mut *conn)
        .await?;
    let journal_mode: String = row.get(0);
    tracing::debug!("SQLite journal_mode set to: {}", journal_mode);

    sqlx::query("PRAGMA busy_timeout = 5000")
        .execute(&mut *conn)
        .await?;
    sqlx::query("PRAGMA synchronous = NORMAL")
        .execute(&mut *conn)
        .await?;

    Ok(())
}
