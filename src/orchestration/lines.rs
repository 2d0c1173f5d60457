use super::CatalogError;
use crate::db::repo::is_unique_violation;
use crate::db::Repository;
use crate::domain::line::normalize_line_name;
use crate::domain::Line;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct LineRegistry {
    repo: Arc<Repository>,
}

impl LineRegistry {
    pub fn new(repo: Arc<Repository>) -> Self {
        Self { repo }
    }

    /// Create a line from a user-supplied name.
    ///
    /// The name is trimmed and lowercased before the uniqueness check, so "Oxum" and
    /// "oxum" collide.
    pub async fn create(&self, raw_name: &str) -> Result<Line, CatalogError> {
        let name = normalize_line_name(raw_name)
            .ok_or_else(|| CatalogError::Validation("Line name is empty".into()))?;

        match self.repo.get_line_by_name(&name).await {
            Ok(_) => {
                return Err(CatalogError::Conflict(
                    "A line with this name already exists".into(),
                ))
            }
            Err(sqlx::Error::RowNotFound) => {}
            Err(e) => return Err(CatalogError::persistence("Failed to look up line", e)),
        }

        let line = self.repo.create_line(&name).await.map_err(|e| {
            if is_unique_violation(&e) {
                CatalogError::Conflict("A line with this name already exists".into())
            } else {
                CatalogError::persistence("Failed to create line", e)
            }
        })?;

        info!(line_id = %line.id, name = %line.name, "Line created");
        Ok(line)
    }

    pub async fn list(&self) -> Result<Vec<Line>, CatalogError> {
        self.repo
            .list_lines()
            .await
            .map_err(|e| CatalogError::persistence("Failed to list lines", e))
    }
}
