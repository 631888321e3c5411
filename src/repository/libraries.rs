//! Libraries repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::library::{CreateLibrary, Library, LibraryQuery, UpdateLibrary},
};

#[derive(Clone)]
pub struct LibrariesRepository {
    pool: Pool<Postgres>,
}

impl LibrariesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get library by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Library> {
        sqlx::query_as::<_, Library>("SELECT * FROM libraries WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Library with id {} not found", id)))
    }

    /// List libraries with title search
    pub async fn search(&self, query: &LibraryQuery) -> AppResult<(Vec<Library>, i64)> {
        let (limit, offset) = super::page_bounds(query.page, query.per_page);
        let pattern = query
            .search
            .as_ref()
            .map(|s| format!("%{}%", s))
            .unwrap_or_else(|| "%".to_string());

        let libraries = sqlx::query_as::<_, Library>(
            r#"
            SELECT * FROM libraries
            WHERE title ILIKE $1
            ORDER BY title
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(&pattern)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM libraries WHERE title ILIKE $1")
                .bind(&pattern)
                .fetch_one(&self.pool)
                .await?;

        Ok((libraries, total))
    }

    /// Create a new library
    pub async fn create(&self, library: &CreateLibrary) -> AppResult<Library> {
        let created = sqlx::query_as::<_, Library>(
            r#"
            INSERT INTO libraries (title, location, phone)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(&library.title)
        .bind(&library.location)
        .bind(&library.phone)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Update a library (absent fields untouched)
    pub async fn update(&self, id: i32, update: &UpdateLibrary) -> AppResult<Library> {
        sqlx::query_as::<_, Library>(
            r#"
            UPDATE libraries SET
                title = COALESCE($2, title),
                location = COALESCE($3, location),
                phone = COALESCE($4, phone)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&update.title)
        .bind(&update.location)
        .bind(&update.phone)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Library with id {} not found", id)))
    }

    /// Delete a library
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM libraries WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Library with id {} not found", id)));
        }
        Ok(())
    }
}
