use axum::extract::multipart::MultipartError;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, Path, Request, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tower::util::ServiceExt;
use tower_http::services::ServeFile;

use super::{AppState, ListResponse};
use crate::domain::AudioFile;
use crate::error::AppError;
use crate::orchestration::{UploadRequest, UploadedFile};

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: String,
    pub audio: AudioFile,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
    pub id: String,
}

pub async fn list_audio(
    State(state): State<AppState>,
) -> Result<Json<ListResponse<AudioFile>>, AppError> {
    let audio_files = state.audio.list().await?;
    Ok(Json(audio_files.into()))
}

/// Multipart upload with fields `line_id`, `file_name`, and `audio_file`.
///
/// Unknown fields are ignored. An `audio_file` part without a filename is not
/// treated as a file.
pub async fn upload_audio(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<UploadResponse>), AppError> {
    let mut multipart = multipart
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {}", e.body_text())))?;

    let mut request = UploadRequest::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().map(|s| s.to_string());
        match name.as_deref() {
            Some("line_id") => {
                request.line_id = Some(field.text().await.map_err(multipart_error)?);
            }
            Some("file_name") => {
                request.display_name = Some(field.text().await.map_err(multipart_error)?);
            }
            Some("audio_file") => {
                if let Some(original_name) = field.file_name().map(|s| s.to_string()) {
                    let bytes = field.bytes().await.map_err(multipart_error)?;
                    request.file = Some(UploadedFile {
                        original_name,
                        bytes: bytes.to_vec(),
                    });
                }
            }
            _ => {}
        }
    }

    let audio = state.audio.upload(request).await?;

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            message: "Audio file uploaded successfully".to_string(),
            audio,
        }),
    ))
}

pub async fn delete_audio(
    State(state): State<AppState>,
    Path(audio_id): Path<String>,
) -> Result<Json<DeleteResponse>, AppError> {
    let audio = state.audio.delete(&audio_id).await?;

    Ok(Json(DeleteResponse {
        message: "Audio file deleted successfully".to_string(),
        id: audio.id,
    }))
}

/// Serve a stored file by its safe name, with range and HEAD support.
pub async fn play_audio(
    State(state): State<AppState>,
    Path(filename): Path<String>,
    request: Request,
) -> Result<Response, AppError> {
    let path = state.audio.resolve_stream(&filename).await?;

    let response = ServeFile::new(path)
        .oneshot(request)
        .await
        .unwrap_or_else(|never| match never {});

    Ok(response.into_response())
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::Validation("Uploaded file is too large".into())
    } else {
        AppError::Validation(format!("Invalid multipart body: {}", err.body_text()))
    }
}
