use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::{AppState, ListResponse};
use crate::domain::Line;
use crate::error::AppError;

#[derive(Debug, Deserialize)]
pub struct CreateLineRequest {
    pub name: Option<String>,
}

pub async fn list_lines(
    State(state): State<AppState>,
) -> Result<Json<ListResponse<Line>>, AppError> {
    let lines = state.lines.list().await?;
    Ok(Json(lines.into()))
}

pub async fn create_line(
    State(state): State<AppState>,
    payload: Result<Json<CreateLineRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Line>), AppError> {
    let name = payload
        .ok()
        .and_then(|Json(body)| body.name)
        .ok_or_else(|| AppError::Validation("Line name is required".into()))?;

    let line = state.lines.create(&name).await?;
    Ok((StatusCode::CREATED, Json(line)))
}
