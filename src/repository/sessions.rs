//! Borrow sessions repository for database operations

use sqlx::{postgres::PgRow, Pool, Postgres, Row, Transaction};
use std::collections::HashMap;

use crate::{
    error::{AppError, AppResult},
    models::{
        session::{
            BorrowSession, CreateSession, SessionAdminQuery, SessionBook, SessionDetails,
            SessionQuery, UpdateSession,
        },
        user::UserShort,
    },
};

#[derive(Clone)]
pub struct SessionsRepository {
    pool: Pool<Postgres>,
}

const DETAILS_SELECT: &str = r#"
    SELECT s.id, s.user_id, s.library_id, s.start_date, s.end_date,
           s.is_accepted, s.is_closed, s.message, s.created_at,
           u.username, l.title AS library_title
    FROM borrow_sessions s
    JOIN users u ON s.user_id = u.id
    JOIN libraries l ON s.library_id = l.id
"#;

fn details_from_row(row: &PgRow) -> SessionDetails {
    SessionDetails {
        id: row.get("id"),
        user: UserShort {
            id: row.get("user_id"),
            username: row.get("username"),
        },
        library_id: row.get("library_id"),
        library_title: row.get("library_title"),
        books: Vec::new(),
        start_date: row.get("start_date"),
        end_date: row.get("end_date"),
        is_accepted: row.get("is_accepted"),
        is_closed: row.get("is_closed"),
        message: row.get("message"),
        created_at: row.get("created_at"),
    }
}

impl SessionsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get raw session row by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<BorrowSession> {
        sqlx::query_as::<_, BorrowSession>("SELECT * FROM borrow_sessions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Session with id {} not found", id)))
    }

    /// Get session with resolved user, library, and books
    pub async fn get_details(&self, id: i32) -> AppResult<SessionDetails> {
        let row = sqlx::query(&format!("{} WHERE s.id = $1", DETAILS_SELECT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Session with id {} not found", id)))?;

        let mut details = [details_from_row(&row)];
        self.attach_books(&mut details).await?;
        let [details] = details;
        Ok(details)
    }

    /// List a user's own sessions, newest first
    pub async fn list_for_user(
        &self,
        user_id: i32,
        query: &SessionQuery,
    ) -> AppResult<(Vec<SessionDetails>, i64)> {
        let (limit, offset) = super::page_bounds(query.page, query.per_page);

        let filter = r#"
            WHERE s.user_id = $1
              AND ($2::bool IS NULL OR s.is_accepted = $2)
              AND ($3::bool IS NULL OR s.is_closed = $3)
        "#;

        let rows = sqlx::query(&format!(
            "{} {} ORDER BY s.created_at DESC LIMIT $4 OFFSET $5",
            DETAILS_SELECT, filter
        ))
        .bind(user_id)
        .bind(query.is_accepted)
        .bind(query.is_closed)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM borrow_sessions s {}",
            filter
        ))
        .bind(user_id)
        .bind(query.is_accepted)
        .bind(query.is_closed)
        .fetch_one(&self.pool)
        .await?;

        let mut details: Vec<SessionDetails> = rows.iter().map(details_from_row).collect();
        self.attach_books(&mut details).await?;

        Ok((details, total))
    }

    /// Administrative listing across all users with search and filters
    pub async fn search(
        &self,
        query: &SessionAdminQuery,
    ) -> AppResult<(Vec<SessionDetails>, i64)> {
        let (limit, offset) = super::page_bounds(query.page, query.per_page);
        let pattern = query
            .search
            .as_ref()
            .map(|s| format!("%{}%", s))
            .unwrap_or_else(|| "%".to_string());

        let filter = r#"
            WHERE (u.username ILIKE $1 OR l.title ILIKE $1
                   OR EXISTS (
                       SELECT 1 FROM session_books sb
                       JOIN books b ON sb.book_id = b.id
                       WHERE sb.session_id = s.id AND b.title ILIKE $1
                   ))
              AND ($2::bool IS NULL OR s.is_accepted = $2)
              AND ($3::bool IS NULL OR s.is_closed = $3)
              AND ($4::date IS NULL OR s.created_at >= $4)
              AND ($5::date IS NULL OR s.created_at < $5 + INTERVAL '1 day')
        "#;

        let rows = sqlx::query(&format!(
            "{} {} ORDER BY s.created_at DESC LIMIT $6 OFFSET $7",
            DETAILS_SELECT, filter
        ))
        .bind(&pattern)
        .bind(query.is_accepted)
        .bind(query.is_closed)
        .bind(query.created_after)
        .bind(query.created_before)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar(&format!(
            r#"
            SELECT COUNT(*) FROM borrow_sessions s
            JOIN users u ON s.user_id = u.id
            JOIN libraries l ON s.library_id = l.id
            {}
            "#,
            filter
        ))
        .bind(&pattern)
        .bind(query.is_accepted)
        .bind(query.is_closed)
        .bind(query.created_after)
        .bind(query.created_before)
        .fetch_one(&self.pool)
        .await?;

        let mut details: Vec<SessionDetails> = rows.iter().map(details_from_row).collect();
        self.attach_books(&mut details).await?;

        Ok((details, total))
    }

    /// Insert a validated session and its book links inside the caller's
    /// transaction. Sessions always start unaccepted and open.
    pub async fn insert(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user_id: i32,
        session: &CreateSession,
    ) -> AppResult<i32> {
        let session_id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO borrow_sessions
                (user_id, library_id, start_date, end_date, is_accepted, is_closed, message)
            VALUES ($1, $2, $3, $4, FALSE, FALSE, $5)
            RETURNING id
            "#,
        )
        .bind(user_id)
        .bind(session.library_id)
        .bind(session.start_date)
        .bind(session.end_date)
        .bind(session.message.as_deref().unwrap_or("-"))
        .fetch_one(&mut **tx)
        .await?;

        for book_id in &session.book_ids {
            sqlx::query(
                "INSERT INTO session_books (session_id, book_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
            )
            .bind(session_id)
            .bind(book_id)
            .execute(&mut **tx)
            .await?;
        }

        Ok(session_id)
    }

    /// Apply a partial update (the mutation guard runs in the service)
    pub async fn update(&self, id: i32, update: &UpdateSession) -> AppResult<BorrowSession> {
        sqlx::query_as::<_, BorrowSession>(
            r#"
            UPDATE borrow_sessions SET
                start_date = COALESCE($2, start_date),
                end_date = COALESCE($3, end_date),
                is_accepted = COALESCE($4, is_accepted),
                is_closed = COALESCE($5, is_closed),
                message = COALESCE($6, message)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(update.start_date)
        .bind(update.end_date)
        .bind(update.is_accepted)
        .bind(update.is_closed)
        .bind(&update.message)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Session with id {} not found", id)))
    }

    /// Delete a session
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM borrow_sessions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Session with id {} not found", id)));
        }
        Ok(())
    }

    /// Fill book lists for a page of session details with one query
    async fn attach_books(&self, details: &mut [SessionDetails]) -> AppResult<()> {
        if details.is_empty() {
            return Ok(());
        }
        let ids: Vec<i32> = details.iter().map(|d| d.id).collect();

        let rows = sqlx::query(
            r#"
            SELECT sb.session_id, b.id, b.title
            FROM session_books sb
            JOIN books b ON sb.book_id = b.id
            WHERE sb.session_id = ANY($1)
            ORDER BY b.title
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let mut by_session: HashMap<i32, Vec<SessionBook>> = HashMap::new();
        for row in rows {
            by_session
                .entry(row.get("session_id"))
                .or_default()
                .push(SessionBook {
                    id: row.get("id"),
                    title: row.get("title"),
                });
        }
        for detail in details.iter_mut() {
            if let Some(books) = by_session.remove(&detail.id) {
                detail.books = books;
            }
        }
        Ok(())
    }
}
