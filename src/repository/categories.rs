//! Categories repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::category::{Category, CategoryQuery, CreateCategory, UpdateCategory},
};

#[derive(Clone)]
pub struct CategoriesRepository {
    pool: Pool<Postgres>,
}

impl CategoriesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get category by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Category> {
        sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Category with id {} not found", id)))
    }

    /// List categories with title search
    pub async fn search(&self, query: &CategoryQuery) -> AppResult<(Vec<Category>, i64)> {
        let (limit, offset) = super::page_bounds(query.page, query.per_page);
        let pattern = query
            .search
            .as_ref()
            .map(|s| format!("%{}%", s))
            .unwrap_or_else(|| "%".to_string());

        let categories = sqlx::query_as::<_, Category>(
            r#"
            SELECT * FROM categories
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
            sqlx::query_scalar("SELECT COUNT(*) FROM categories WHERE title ILIKE $1")
                .bind(&pattern)
                .fetch_one(&self.pool)
                .await?;

        Ok((categories, total))
    }

    /// Create a new category
    pub async fn create(&self, category: &CreateCategory) -> AppResult<Category> {
        let created = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (title, description)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(&category.title)
        .bind(&category.description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if super::is_unique_violation(&e) {
                AppError::Conflict(format!("Category '{}' already exists", category.title))
            } else {
                e.into()
            }
        })?;

        Ok(created)
    }

    /// Update a category (absent fields untouched)
    pub async fn update(&self, id: i32, update: &UpdateCategory) -> AppResult<Category> {
        sqlx::query_as::<_, Category>(
            r#"
            UPDATE categories SET
                title = COALESCE($2, title),
                description = COALESCE($3, description)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&update.title)
        .bind(&update.description)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Category with id {} not found", id)))
    }

    /// Delete a category
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Category with id {} not found", id)));
        }
        Ok(())
    }
}
