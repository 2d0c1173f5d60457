use super::Repository;
use crate::domain::Line;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

const LINE_COLUMNS: &str = "id, name, created_at, updated_at";

fn line_from_row(row: &SqliteRow) -> Line {
    Line {
        id: row.get("id"),
        name: row.get("name"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

impl Repository {
    // =========================================================================
    // Line operations
    // =========================================================================

    /// Insert a new line and return it as stored.
    ///
    /// The row is re-read after the insert so the returned timestamps are the ones
    /// assigned by SQLite.
    ///
    /// # Errors
    /// Returns a database error if `name` is already taken.
    pub async fn create_line(&self, name: &str) -> Result<Line, sqlx::Error> {
        let id = Uuid::new_v4().to_string();

        sqlx::query("INSERT INTO lines (id, name) VALUES (?, ?)")
            .bind(&id)
            .bind(name)
            .execute(&self.pool)
            .await?;

        self.get_line_by_id(&id).await
    }

    /// # Errors
    /// Returns `sqlx::Error::RowNotFound` if no line has this id.
    pub async fn get_line_by_id(&self, id: &str) -> Result<Line, sqlx::Error> {
        let sql = format!("SELECT {} FROM lines WHERE id = ?", LINE_COLUMNS);
        let row = sqlx::query(&sql).bind(id).fetch_one(&self.pool).await?;
        Ok(line_from_row(&row))
    }

    /// Exact match on the stored (lowercase) name.
    ///
    /// # Errors
    /// Returns `sqlx::Error::RowNotFound` if no line has this name.
    pub async fn get_line_by_name(&self, name: &str) -> Result<Line, sqlx::Error> {
        let sql = format!("SELECT {} FROM lines WHERE name = ?", LINE_COLUMNS);
        let row = sqlx::query(&sql).bind(name).fetch_one(&self.pool).await?;
        Ok(line_from_row(&row))
    }

    /// All lines ordered by name.
    pub async fn list_lines(&self) -> Result<Vec<Line>, sqlx::Error> {
        let sql = format!("SELECT {} FROM lines ORDER BY name ASC", LINE_COLUMNS);
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        Ok(rows.iter().map(line_from_row).collect())
    }
}

#[cfg(test)]
mod tests {
    use crate::db::repo::is_unique_violation;
    use crate::db::repo::test_support::setup_test_db;

    #[tokio::test]
    async fn test_create_then_get_by_id_round_trips() {
        let (repo, _temp) = setup_test_db().await;

        let created = repo.create_line("oxum").await.unwrap();
        assert_eq!(created.name, "oxum");
        assert!(!created.id.is_empty());

        let fetched = repo.get_line_by_id(&created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_get_by_name_exact_match() {
        let (repo, _temp) = setup_test_db().await;

        let created = repo.create_line("caboclos").await.unwrap();
        let fetched = repo.get_line_by_name("caboclos").await.unwrap();
        assert_eq!(fetched.id, created.id);

        let err = repo.get_line_by_name("Caboclos").await.unwrap_err();
        assert!(matches!(err, sqlx::Error::RowNotFound));
    }

    #[tokio::test]
    async fn test_get_missing_line_is_row_not_found() {
        let (repo, _temp) = setup_test_db().await;

        let err = repo.get_line_by_id("does-not-exist").await.unwrap_err();
        assert!(matches!(err, sqlx::Error::RowNotFound));
    }

    #[tokio::test]
    async fn test_duplicate_name_is_unique_violation() {
        let (repo, _temp) = setup_test_db().await;

        repo.create_line("exu").await.unwrap();
        let err = repo.create_line("exu").await.unwrap_err();
        assert!(is_unique_violation(&err), "unexpected error: {:?}", err);
    }

    #[tokio::test]
    async fn test_list_lines_empty_and_sorted() {
        let (repo, _temp) = setup_test_db().await;

        assert!(repo.list_lines().await.unwrap().is_empty());

        for name in ["pretos velhos", "baianos", "erês"] {
            repo.create_line(name).await.unwrap();
        }

        let names: Vec<String> = repo
            .list_lines()
            .await
            .unwrap()
            .into_iter()
            .map(|l| l.name)
            .collect();
        assert_eq!(names, vec!["baianos", "erês", "pretos velhos"]);
    }
}
