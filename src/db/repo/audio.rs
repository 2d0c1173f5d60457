use super::Repository;
use crate::domain::{AudioFile, NewAudioFile};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

const AUDIO_COLUMNS: &str = "id, filename, filetype, path, line_id, created_at, updated_at";

fn audio_from_row(row: &SqliteRow) -> AudioFile {
    AudioFile {
        id: row.get("id"),
        filename: row.get::<Option<String>, _>("filename").unwrap_or_default(),
        filetype: row.get::<Option<String>, _>("filetype").unwrap_or_default(),
        path: row.get::<Option<String>, _>("path").unwrap_or_default(),
        line_id: row.get("line_id"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

impl Repository {
    // =========================================================================
    // Audio file operations
    // =========================================================================

    /// Insert an audio file row and return it as stored.
    ///
    /// Insert and re-read are separate statements; the id was generated by the caller,
    /// so nothing else can have written it in between.
    ///
    /// # Errors
    /// Returns a database error on a duplicate filename or when `line_id` references
    /// no existing line.
    pub async fn create_audio_file(&self, audio: &NewAudioFile) -> Result<AudioFile, sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO audio_files (id, filename, filetype, path, line_id)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&audio.id)
        .bind(&audio.filename)
        .bind(&audio.filetype)
        .bind(&audio.path)
        .bind(audio.line_id.as_deref())
        .execute(&self.pool)
        .await?;

        self.get_audio_file_by_id(&audio.id).await
    }

    /// # Errors
    /// Returns `sqlx::Error::RowNotFound` if no audio file has this id.
    pub async fn get_audio_file_by_id(&self, id: &str) -> Result<AudioFile, sqlx::Error> {
        let sql = format!("SELECT {} FROM audio_files WHERE id = ?", AUDIO_COLUMNS);
        let row = sqlx::query(&sql).bind(id).fetch_one(&self.pool).await?;
        Ok(audio_from_row(&row))
    }

    /// All audio files ordered by filename.
    pub async fn list_audio_files(&self) -> Result<Vec<AudioFile>, sqlx::Error> {
        let sql = format!(
            "SELECT {} FROM audio_files ORDER BY filename ASC",
            AUDIO_COLUMNS
        );
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        Ok(rows.iter().map(audio_from_row).collect())
    }

    /// Delete an audio file row, returning the number of rows removed.
    ///
    /// A missing id is not an error here; it yields `Ok(0)`.
    pub async fn delete_audio_file(&self, id: &str) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM audio_files WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
