pub mod audio;
pub mod health;
pub mod lines;

use crate::config::Config;
use crate::db::Repository;
use crate::orchestration::{AudioLibrary, LineRegistry};
use crate::storage::AudioStore;
use axum::extract::DefaultBodyLimit;
use axum::{
    routing::{delete, get},
    Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub config: Config,
    pub lines: LineRegistry,
    pub audio: AudioLibrary,
}

impl AppState {
    pub fn new(repo: Arc<Repository>, store: AudioStore, config: Config) -> Self {
        Self {
            lines: LineRegistry::new(repo.clone()),
            audio: AudioLibrary::new(repo.clone(), store),
            repo,
            config,
        }
    }
}

/// List payload: every collection is wrapped in a `dados` field.
#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub dados: Vec<T>,
}

impl<T> From<Vec<T>> for ListResponse<T> {
    fn from(dados: Vec<T>) -> Self {
        Self { dados }
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let upload_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route(
            "/api/v1/audio",
            get(audio::list_audio).post(audio::upload_audio),
        )
        .route("/api/v1/audio/play/:filename", get(audio::play_audio))
        .route("/api/v1/audio/:audio_id", delete(audio::delete_audio))
        .route(
            "/api/v1/lines",
            get(lines::list_lines).post(lines::create_line),
        )
        .layer(upload_limit)
        .layer(cors)
        .with_state(state)
}
