//! Books repository for database operations

use sqlx::{postgres::PgRow, Pool, Postgres, Row};
use std::collections::HashMap;

use crate::{
    error::{AppError, AppResult},
    models::{
        author::Author,
        book::{Book, BookDetail, BookOrdering, BookQuery, BookStock, BookSummary, CreateBook, UpdateBook},
        category::Category,
    },
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

const SUMMARY_SELECT: &str = r#"
    SELECT b.id, b.title, b.rating, b.likes,
           a.first_name, a.middle_name, a.last_name
    FROM books b
    JOIN authors a ON b.author_id = a.id
"#;

fn summary_from_row(row: &PgRow) -> BookSummary {
    let author = Author {
        id: 0,
        first_name: row.get("first_name"),
        middle_name: row.get("middle_name"),
        last_name: row.get("last_name"),
        description: None,
    };
    BookSummary {
        id: row.get("id"),
        title: row.get("title"),
        author: author.short_name(),
        rating: row.get("rating"),
        likes: row.get("likes"),
        categories: Vec::new(),
    }
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get raw book row by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    /// List books available in at least one library, with search/filter/ordering
    pub async fn search(&self, query: &BookQuery) -> AppResult<(Vec<BookSummary>, i64)> {
        let (limit, offset) = super::page_bounds(query.page, query.per_page);
        let pattern = query
            .search
            .as_ref()
            .map(|s| format!("%{}%", s))
            .unwrap_or_else(|| "%".to_string());

        let filter = r#"
            WHERE b.title ILIKE $1
              AND EXISTS (
                  SELECT 1 FROM book_library_availability al
                  WHERE al.book_id = b.id AND al.available
                    AND ($2::int IS NULL OR al.library_id = $2)
              )
              AND ($3::int IS NULL OR b.author_id = $3)
              AND ($4::int IS NULL OR EXISTS (
                  SELECT 1 FROM book_categories bc
                  WHERE bc.book_id = b.id AND bc.category_id = $4
              ))
        "#;

        let order = match query.order_by {
            Some(BookOrdering::Rating) => "ORDER BY b.rating DESC NULLS LAST, b.created_at DESC",
            Some(BookOrdering::Likes) => "ORDER BY b.likes DESC, b.created_at DESC",
            None => "ORDER BY b.created_at DESC",
        };

        let rows = sqlx::query(&format!(
            "{} {} {} LIMIT $5 OFFSET $6",
            SUMMARY_SELECT, filter, order
        ))
        .bind(&pattern)
        .bind(query.library_id)
        .bind(query.author_id)
        .bind(query.category_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM books b {}",
            filter
        ))
        .bind(&pattern)
        .bind(query.library_id)
        .bind(query.author_id)
        .bind(query.category_id)
        .fetch_one(&self.pool)
        .await?;

        let mut summaries: Vec<BookSummary> = rows.iter().map(summary_from_row).collect();
        self.attach_categories(&mut summaries).await?;

        Ok((summaries, total))
    }

    /// All books by an author
    pub async fn list_by_author(
        &self,
        author_id: i32,
        page: Option<i64>,
        per_page: Option<i64>,
    ) -> AppResult<(Vec<BookSummary>, i64)> {
        self.list_filtered("b.author_id = $1", author_id, page, per_page).await
    }

    /// All books in a category
    pub async fn list_by_category(
        &self,
        category_id: i32,
        page: Option<i64>,
        per_page: Option<i64>,
    ) -> AppResult<(Vec<BookSummary>, i64)> {
        self.list_filtered(
            "EXISTS (SELECT 1 FROM book_categories bc WHERE bc.book_id = b.id AND bc.category_id = $1)",
            category_id,
            page,
            per_page,
        )
        .await
    }

    /// All books stocked at a library (regardless of the availability flag)
    pub async fn list_by_library(
        &self,
        library_id: i32,
        page: Option<i64>,
        per_page: Option<i64>,
    ) -> AppResult<(Vec<BookSummary>, i64)> {
        self.list_filtered(
            "EXISTS (SELECT 1 FROM book_library_availability al WHERE al.book_id = b.id AND al.library_id = $1)",
            library_id,
            page,
            per_page,
        )
        .await
    }

    /// Books the user has bookmarked, with optional title search
    pub async fn list_bookmarked(
        &self,
        user_id: i32,
        search: Option<&str>,
        page: Option<i64>,
        per_page: Option<i64>,
    ) -> AppResult<(Vec<BookSummary>, i64)> {
        let (limit, offset) = super::page_bounds(page, per_page);
        let pattern = search
            .map(|s| format!("%{}%", s))
            .unwrap_or_else(|| "%".to_string());

        let filter = r#"
            WHERE b.title ILIKE $2
              AND EXISTS (
                  SELECT 1 FROM user_book_relations r
                  WHERE r.book_id = b.id AND r.user_id = $1 AND r.in_bookmarks
              )
        "#;

        let rows = sqlx::query(&format!(
            "{} {} ORDER BY b.created_at DESC LIMIT $3 OFFSET $4",
            SUMMARY_SELECT, filter
        ))
        .bind(user_id)
        .bind(&pattern)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM books b {}",
            filter
        ))
        .bind(user_id)
        .bind(&pattern)
        .fetch_one(&self.pool)
        .await?;

        let mut summaries: Vec<BookSummary> = rows.iter().map(summary_from_row).collect();
        self.attach_categories(&mut summaries).await?;

        Ok((summaries, total))
    }

    /// Get full book view with author, categories, stock lines, and the
    /// count of accepted-and-open sessions containing the book
    pub async fn get_detail(&self, id: i32) -> AppResult<BookDetail> {
        let book = self.get_by_id(id).await?;

        let author = sqlx::query_as::<_, Author>("SELECT * FROM authors WHERE id = $1")
            .bind(book.author_id)
            .fetch_one(&self.pool)
            .await?;

        let categories = sqlx::query_as::<_, Category>(
            r#"
            SELECT c.* FROM categories c
            JOIN book_categories bc ON bc.category_id = c.id
            WHERE bc.book_id = $1
            ORDER BY c.title
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        let libraries = sqlx::query_as::<_, BookStock>(
            r#"
            SELECT al.library_id, l.title AS library_title, al.available
            FROM book_library_availability al
            JOIN libraries l ON al.library_id = l.id
            WHERE al.book_id = $1
            ORDER BY l.title
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        let reading_now: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(DISTINCT s.id)
            FROM borrow_sessions s
            JOIN session_books sb ON sb.session_id = s.id
            WHERE sb.book_id = $1 AND s.is_accepted AND NOT s.is_closed
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(BookDetail {
            id: book.id,
            title: book.title,
            description: book.description,
            author,
            categories,
            libraries,
            rating: book.rating,
            likes: book.likes,
            bookmarks: book.bookmarks,
            reading_now,
            created_at: book.created_at,
        })
    }

    /// Create a new book with its category links
    pub async fn create(&self, book: &CreateBook) -> AppResult<Book> {
        let mut tx = self.pool.begin().await?;

        let created = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, description, author_id)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(&book.title)
        .bind(&book.description)
        .bind(book.author_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if super::is_unique_violation(&e) {
                AppError::Conflict(format!("A book titled '{}' already exists", book.title))
            } else {
                e.into()
            }
        })?;

        for category_id in &book.category_ids {
            sqlx::query("INSERT INTO book_categories (book_id, category_id) VALUES ($1, $2) ON CONFLICT DO NOTHING")
                .bind(created.id)
                .bind(category_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(created)
    }

    /// Update a book; a provided category set replaces the existing links
    pub async fn update(&self, id: i32, update: &UpdateBook) -> AppResult<Book> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query_as::<_, Book>(
            r#"
            UPDATE books SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                author_id = COALESCE($4, author_id)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&update.title)
        .bind(&update.description)
        .bind(update.author_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| {
            if super::is_unique_violation(&e) {
                AppError::Conflict(format!(
                    "A book titled '{}' already exists",
                    update.title.as_deref().unwrap_or_default()
                ))
            } else {
                AppError::from(e)
            }
        })?
        .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))?;

        if let Some(ref category_ids) = update.category_ids {
            sqlx::query("DELETE FROM book_categories WHERE book_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            for category_id in category_ids {
                sqlx::query("INSERT INTO book_categories (book_id, category_id) VALUES ($1, $2) ON CONFLICT DO NOTHING")
                    .bind(id)
                    .bind(category_id)
                    .execute(&mut *tx)
                    .await?;
            }
        }

        tx.commit().await?;
        Ok(updated)
    }

    /// Delete a book
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book with id {} not found", id)));
        }
        Ok(())
    }

    async fn list_filtered(
        &self,
        filter: &str,
        bind_id: i32,
        page: Option<i64>,
        per_page: Option<i64>,
    ) -> AppResult<(Vec<BookSummary>, i64)> {
        let (limit, offset) = super::page_bounds(page, per_page);

        let rows = sqlx::query(&format!(
            "{} WHERE {} ORDER BY b.created_at DESC LIMIT $2 OFFSET $3",
            SUMMARY_SELECT, filter
        ))
        .bind(bind_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM books b WHERE {}",
            filter
        ))
        .bind(bind_id)
        .fetch_one(&self.pool)
        .await?;

        let mut summaries: Vec<BookSummary> = rows.iter().map(summary_from_row).collect();
        self.attach_categories(&mut summaries).await?;

        Ok((summaries, total))
    }

    /// Fill category titles for a page of summaries with one query
    async fn attach_categories(&self, summaries: &mut [BookSummary]) -> AppResult<()> {
        if summaries.is_empty() {
            return Ok(());
        }
        let ids: Vec<i32> = summaries.iter().map(|s| s.id).collect();

        let rows = sqlx::query(
            r#"
            SELECT bc.book_id, c.title
            FROM book_categories bc
            JOIN categories c ON bc.category_id = c.id
            WHERE bc.book_id = ANY($1)
            ORDER BY c.title
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let mut by_book: HashMap<i32, Vec<String>> = HashMap::new();
        for row in rows {
            by_book
                .entry(row.get("book_id"))
                .or_default()
                .push(row.get("title"));
        }
        for summary in summaries.iter_mut() {
            if let Some(titles) = by_book.remove(&summary.id) {
                summary.categories = titles;
            }
        }
        Ok(())
    }
}
