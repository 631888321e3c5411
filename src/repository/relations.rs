//! User-book relations repository: likes, bookmarks, ratings, and the
//! aggregate queries behind the book's derived counters.

use rust_decimal::Decimal;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::relation::{UpdateRelation, UserBookRelation},
};

#[derive(Clone)]
pub struct RelationsRepository {
    pool: Pool<Postgres>,
}

impl RelationsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get or create the (user, book) relation. Returns the row and whether
    /// it was created by this call.
    pub async fn get_or_create(
        &self,
        user_id: i32,
        book_id: i32,
    ) -> AppResult<(UserBookRelation, bool)> {
        let inserted = sqlx::query_as::<_, UserBookRelation>(
            r#"
            INSERT INTO user_book_relations (user_id, book_id, like_flag, in_bookmarks, rate)
            VALUES ($1, $2, FALSE, FALSE, NULL)
            ON CONFLICT (user_id, book_id) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(book_id)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(relation) = inserted {
            return Ok((relation, true));
        }

        let existing = sqlx::query_as::<_, UserBookRelation>(
            "SELECT * FROM user_book_relations WHERE user_id = $1 AND book_id = $2",
        )
        .bind(user_id)
        .bind(book_id)
        .fetch_one(&self.pool)
        .await?;

        Ok((existing, false))
    }

    /// Apply the provided relation fields (absent fields untouched)
    pub async fn apply(
        &self,
        relation_id: i32,
        update: &UpdateRelation,
    ) -> AppResult<UserBookRelation> {
        let updated = sqlx::query_as::<_, UserBookRelation>(
            r#"
            UPDATE user_book_relations SET
                like_flag = COALESCE($2, like_flag),
                in_bookmarks = COALESCE($3, in_bookmarks),
                rate = COALESCE($4, rate)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(relation_id)
        .bind(update.like)
        .bind(update.in_bookmarks)
        .bind(update.rate)
        .fetch_one(&self.pool)
        .await?;

        Ok(updated)
    }

    /// Mean of the non-null rates for a book; None when nobody rated it
    pub async fn avg_rate(&self, book_id: i32) -> AppResult<Option<Decimal>> {
        let avg: Option<Decimal> = sqlx::query_scalar(
            "SELECT AVG(rate)::numeric FROM user_book_relations WHERE book_id = $1",
        )
        .bind(book_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(avg)
    }

    /// Count of relations with the like flag set
    pub async fn count_likes(&self, book_id: i32) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM user_book_relations WHERE book_id = $1 AND like_flag",
        )
        .bind(book_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    /// Count of relations with the bookmark flag set
    pub async fn count_bookmarks(&self, book_id: i32) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM user_book_relations WHERE book_id = $1 AND in_bookmarks",
        )
        .bind(book_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    /// Store the recomputed rating on the book
    pub async fn store_rating(&self, book_id: i32, rating: Option<Decimal>) -> AppResult<()> {
        sqlx::query("UPDATE books SET rating = $2 WHERE id = $1")
            .bind(book_id)
            .bind(rating)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Store the recomputed like count on the book
    pub async fn store_likes(&self, book_id: i32, likes: i64) -> AppResult<()> {
        sqlx::query("UPDATE books SET likes = $2 WHERE id = $1")
            .bind(book_id)
            .bind(likes as i32)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Store the recomputed bookmark count on the book
    pub async fn store_bookmarks(&self, book_id: i32, bookmarks: i64) -> AppResult<()> {
        sqlx::query("UPDATE books SET bookmarks = $2 WHERE id = $1")
            .bind(book_id)
            .bind(bookmarks as i32)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
