use super::CatalogError;
use crate::db::Repository;
use crate::domain::filename::stream_name;
use crate::domain::{AudioFile, DerivedName, NewAudioFile};
use crate::storage::AudioStore;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// A buffered file part from an upload.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Filename as sent by the client; may include directories.
    pub original_name: String,
    pub bytes: Vec<u8>,
}

/// Raw upload inputs; every field is optional until validated.
#[derive(Debug, Clone, Default)]
pub struct UploadRequest {
    pub line_id: Option<String>,
    pub display_name: Option<String>,
    pub file: Option<UploadedFile>,
}

#[derive(Clone)]
pub struct AudioLibrary {
    repo: Arc<Repository>,
    store: AudioStore,
}

impl AudioLibrary {
    pub fn new(repo: Arc<Repository>, store: AudioStore) -> Self {
        Self { repo, store }
    }

    /// Validate an upload, write its bytes under the safe name, and record it.
    ///
    /// Validation order: line id, line existence, display name, file part. The file is
    /// never overwritten: an existing entry at the destination is a conflict. If the
    /// insert fails after the write, the written file is removed again. A crash between
    /// those two steps leaves the file orphaned.
    pub async fn upload(&self, request: UploadRequest) -> Result<AudioFile, CatalogError> {
        let line_id = required(request.line_id, "line_id is required")?;

        match self.repo.get_line_by_id(&line_id).await {
            Ok(_) => {}
            Err(sqlx::Error::RowNotFound) => {
                return Err(CatalogError::NotFound("Line does not exist".into()))
            }
            Err(e) => return Err(CatalogError::persistence("Failed to look up line", e)),
        }

        required(request.display_name, "file_name is required")?;

        let file = request
            .file
            .ok_or_else(|| CatalogError::Validation("No audio file was uploaded".into()))?;

        let derived = DerivedName::from_original(&file.original_name);
        let destination = self.store.path_for(&derived.safe_name);

        let taken = self
            .store
            .exists(&destination)
            .await
            .map_err(|e| CatalogError::storage("Failed to check audio storage", e))?;
        if taken {
            return Err(conflict(&derived.safe_name));
        }

        if let Err(e) = self.store.write_new(&destination, &file.bytes).await {
            if e.kind() == io::ErrorKind::AlreadyExists {
                return Err(conflict(&derived.safe_name));
            }
            return Err(CatalogError::storage("Failed to save audio file", e));
        }

        let new_audio = NewAudioFile {
            id: Uuid::new_v4().to_string(),
            filename: derived.filename,
            filetype: derived.filetype,
            path: destination.to_string_lossy().into_owned(),
            line_id: Some(line_id),
        };

        match self.repo.create_audio_file(&new_audio).await {
            Ok(audio) => {
                info!(
                    audio_id = %audio.id,
                    filename = %audio.filename,
                    path = %audio.path,
                    size = file.bytes.len(),
                    "Audio file uploaded"
                );
                Ok(audio)
            }
            Err(e) => {
                self.discard(&destination).await;
                Err(CatalogError::persistence("Failed to save audio metadata", e))
            }
        }
    }

    /// Delete the row, then the file it points at.
    ///
    /// The database is the source of truth: once the row is gone the delete succeeds
    /// even if the file cannot be removed.
    pub async fn delete(&self, id: &str) -> Result<AudioFile, CatalogError> {
        let audio = match self.repo.get_audio_file_by_id(id).await {
            Ok(audio) => audio,
            Err(sqlx::Error::RowNotFound) => {
                return Err(CatalogError::NotFound("Audio file not found".into()))
            }
            Err(e) => return Err(CatalogError::persistence("Failed to look up audio file", e)),
        };

        let removed = self
            .repo
            .delete_audio_file(id)
            .await
            .map_err(|e| CatalogError::persistence("Failed to delete audio file", e))?;
        if removed == 0 {
            // Deleted concurrently; that request owns the file removal.
            return Err(CatalogError::NotFound("Audio file not found".into()));
        }

        if let Err(e) = self.store.remove(Path::new(&audio.path)).await {
            warn!(
                audio_id = %audio.id,
                path = %audio.path,
                error = %e,
                "Failed to remove audio file from disk"
            );
        }

        info!(audio_id = %audio.id, filename = %audio.filename, "Audio file deleted");
        Ok(audio)
    }

    pub async fn list(&self) -> Result<Vec<AudioFile>, CatalogError> {
        self.repo
            .list_audio_files()
            .await
            .map_err(|e| CatalogError::persistence("Failed to list audio files", e))
    }

    /// Resolve a requested filename to a stored file.
    ///
    /// Only the last path component of `requested` is used. Rows whose file went
    /// missing are not consulted here; a missing file is simply not found.
    pub async fn resolve_stream(&self, requested: &str) -> Result<PathBuf, CatalogError> {
        let name = stream_name(requested)
            .map_err(|e| CatalogError::NotFound(e.message().to_string()))?;

        let path = self.store.path_for(name);
        if !self.store.is_file(&path).await {
            return Err(CatalogError::NotFound("Audio file not found".into()));
        }
        Ok(path)
    }

    async fn discard(&self, path: &Path) {
        match self.store.remove(path).await {
            Ok(()) => info!(path = %path.display(), "Removed audio file after failed insert"),
            Err(e) => warn!(
                path = %path.display(),
                error = %e,
                "Failed to remove audio file after failed insert"
            ),
        }
    }
}

fn required(value: Option<String>, message: &str) -> Result<String, CatalogError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(CatalogError::Validation(message.to_string())),
    }
}

fn conflict(safe_name: &str) -> CatalogError {
    CatalogError::Conflict(format!("A file named '{}' already exists", safe_name))
}
