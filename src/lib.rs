pub mod api;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod orchestration;
pub mod storage;

pub use config::Config;
pub use db::{init_db, Repository};
pub use domain::{AudioFile, Line, NewAudioFile};
pub use error::AppError;
pub use orchestration::{AudioLibrary, CatalogError, LineRegistry};
pub use storage::AudioStore;
