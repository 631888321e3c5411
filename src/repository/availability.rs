//! Availability repository: (book, library) stock facts

use sqlx::{Pool, Postgres, Transaction};

use crate::{
    error::{AppError, AppResult},
    models::availability::{
        Availability, AvailabilityDetail, AvailabilityFact, AvailabilityQuery, CreateAvailability,
    },
};

#[derive(Clone)]
pub struct AvailabilityRepository {
    pool: Pool<Postgres>,
}

impl AvailabilityRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get availability record by ID with resolved titles
    pub async fn get_by_id(&self, id: i32) -> AppResult<AvailabilityDetail> {
        sqlx::query_as::<_, AvailabilityDetail>(
            r#"
            SELECT al.id, al.book_id, b.title AS book_title,
                   al.library_id, l.title AS library_title, al.available
            FROM book_library_availability al
            JOIN books b ON al.book_id = b.id
            JOIN libraries l ON al.library_id = l.id
            WHERE al.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Availability record with id {} not found", id)))
    }

    /// List availability records, optionally filtered by book and/or library
    pub async fn search(
        &self,
        query: &AvailabilityQuery,
    ) -> AppResult<(Vec<AvailabilityDetail>, i64)> {
        let (limit, offset) = super::page_bounds(query.page, query.per_page);

        let records = sqlx::query_as::<_, AvailabilityDetail>(
            r#"
            SELECT al.id, al.book_id, b.title AS book_title,
                   al.library_id, l.title AS library_title, al.available
            FROM book_library_availability al
            JOIN books b ON al.book_id = b.id
            JOIN libraries l ON al.library_id = l.id
            WHERE ($1::int IS NULL OR al.book_id = $1)
              AND ($2::int IS NULL OR al.library_id = $2)
            ORDER BY b.title, l.title
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(query.book_id)
        .bind(query.library_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM book_library_availability al
            WHERE ($1::int IS NULL OR al.book_id = $1)
              AND ($2::int IS NULL OR al.library_id = $2)
            "#,
        )
        .bind(query.book_id)
        .bind(query.library_id)
        .fetch_one(&self.pool)
        .await?;

        Ok((records, total))
    }

    /// Create an availability record; duplicate (book, library) pairs conflict
    pub async fn create(&self, record: &CreateAvailability) -> AppResult<Availability> {
        sqlx::query_as::<_, Availability>(
            r#"
            INSERT INTO book_library_availability (book_id, library_id, available)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(record.book_id)
        .bind(record.library_id)
        .bind(record.available)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if super::is_unique_violation(&e) {
                AppError::Conflict(format!(
                    "Availability for book {} at library {} already exists",
                    record.book_id, record.library_id
                ))
            } else {
                e.into()
            }
        })
    }

    /// Set the availability flag
    pub async fn update(&self, id: i32, available: bool) -> AppResult<Availability> {
        sqlx::query_as::<_, Availability>(
            "UPDATE book_library_availability SET available = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(available)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Availability record with id {} not found", id)))
    }

    /// Delete an availability record
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM book_library_availability WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Availability record with id {} not found",
                id
            )));
        }
        Ok(())
    }

    /// Fetch the facts for the exact (book, library) pairs a borrow request
    /// names, locking the rows until the surrounding transaction completes
    /// so concurrent requests for the same pair serialize.
    pub async fn facts_for_update(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        book_ids: &[i32],
        library_id: i32,
    ) -> AppResult<Vec<AvailabilityFact>> {
        let facts = sqlx::query_as::<_, AvailabilityFact>(
            r#"
            SELECT al.book_id, b.title AS book_title, al.available
            FROM book_library_availability al
            JOIN books b ON al.book_id = b.id
            WHERE al.library_id = $1 AND al.book_id = ANY($2)
            FOR UPDATE OF al
            "#,
        )
        .bind(library_id)
        .bind(book_ids)
        .fetch_all(&mut **tx)
        .await?;

        Ok(facts)
    }
}
