//! Donation offers repository for database operations

use sqlx::{postgres::PgRow, Pool, Postgres, Row};

use crate::{
    error::{AppError, AppResult},
    models::{
        offer::{
            CreateOffer, DonationOffer, OfferAdminQuery, OfferDetails, OfferQuery, UpdateOffer,
        },
        user::UserShort,
    },
};

#[derive(Clone)]
pub struct OffersRepository {
    pool: Pool<Postgres>,
}

const DETAILS_SELECT: &str = r#"
    SELECT o.id, o.user_id, o.library_id, o.quantity, o.books_description,
           o.is_accepted, o.is_closed, o.message, o.created_at,
           u.username, l.title AS library_title
    FROM donation_offers o
    JOIN users u ON o.user_id = u.id
    JOIN libraries l ON o.library_id = l.id
"#;

fn details_from_row(row: &PgRow) -> OfferDetails {
    OfferDetails {
        id: row.get("id"),
        user: UserShort {
            id: row.get("user_id"),
            username: row.get("username"),
        },
        library_id: row.get("library_id"),
        library_title: row.get("library_title"),
        quantity: row.get("quantity"),
        books_description: row.get("books_description"),
        is_accepted: row.get("is_accepted"),
        is_closed: row.get("is_closed"),
        message: row.get("message"),
        created_at: row.get("created_at"),
    }
}

impl OffersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get raw offer row by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<DonationOffer> {
        sqlx::query_as::<_, DonationOffer>("SELECT * FROM donation_offers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Offer with id {} not found", id)))
    }

    /// Get offer with resolved user and library
    pub async fn get_details(&self, id: i32) -> AppResult<OfferDetails> {
        let row = sqlx::query(&format!("{} WHERE o.id = $1", DETAILS_SELECT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Offer with id {} not found", id)))?;

        Ok(details_from_row(&row))
    }

    /// List a user's own offers, newest first
    pub async fn list_for_user(
        &self,
        user_id: i32,
        query: &OfferQuery,
    ) -> AppResult<(Vec<OfferDetails>, i64)> {
        let (limit, offset) = super::page_bounds(query.page, query.per_page);

        let filter = r#"
            WHERE o.user_id = $1
              AND ($2::bool IS NULL OR o.is_accepted = $2)
              AND ($3::bool IS NULL OR o.is_closed = $3)
        "#;

        let rows = sqlx::query(&format!(
            "{} {} ORDER BY o.created_at DESC LIMIT $4 OFFSET $5",
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
            "SELECT COUNT(*) FROM donation_offers o {}",
            filter
        ))
        .bind(user_id)
        .bind(query.is_accepted)
        .bind(query.is_closed)
        .fetch_one(&self.pool)
        .await?;

        Ok((rows.iter().map(details_from_row).collect(), total))
    }

    /// Administrative listing across all users with search and filters
    pub async fn search(&self, query: &OfferAdminQuery) -> AppResult<(Vec<OfferDetails>, i64)> {
        let (limit, offset) = super::page_bounds(query.page, query.per_page);
        let pattern = query
            .search
            .as_ref()
            .map(|s| format!("%{}%", s))
            .unwrap_or_else(|| "%".to_string());

        let filter = r#"
            WHERE (o.books_description ILIKE $1 OR u.username ILIKE $1 OR l.title ILIKE $1)
              AND ($2::bool IS NULL OR o.is_accepted = $2)
              AND ($3::bool IS NULL OR o.is_closed = $3)
              AND ($4::date IS NULL OR o.created_at >= $4)
              AND ($5::date IS NULL OR o.created_at < $5 + INTERVAL '1 day')
        "#;

        let rows = sqlx::query(&format!(
            "{} {} ORDER BY o.created_at DESC LIMIT $6 OFFSET $7",
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
            SELECT COUNT(*) FROM donation_offers o
            JOIN users u ON o.user_id = u.id
            JOIN libraries l ON o.library_id = l.id
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

        Ok((rows.iter().map(details_from_row).collect(), total))
    }

    /// Create an offer. Offers always start unaccepted and open.
    pub async fn create(&self, user_id: i32, offer: &CreateOffer) -> AppResult<DonationOffer> {
        let created = sqlx::query_as::<_, DonationOffer>(
            r#"
            INSERT INTO donation_offers
                (user_id, library_id, quantity, books_description, is_accepted, is_closed, message)
            VALUES ($1, $2, $3, $4, FALSE, FALSE, $5)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(offer.library_id)
        .bind(offer.quantity)
        .bind(&offer.books_description)
        .bind(offer.message.as_deref().unwrap_or("-"))
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Apply a partial update (the mutation guard runs in the service)
    pub async fn update(&self, id: i32, update: &UpdateOffer) -> AppResult<DonationOffer> {
        sqlx::query_as::<_, DonationOffer>(
            r#"
            UPDATE donation_offers SET
                quantity = COALESCE($2, quantity),
                books_description = COALESCE($3, books_description),
                is_accepted = COALESCE($4, is_accepted),
                is_closed = COALESCE($5, is_closed),
                message = COALESCE($6, message)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(update.quantity)
        .bind(&update.books_description)
        .bind(update.is_accepted)
        .bind(update.is_closed)
        .bind(&update.message)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Offer with id {} not found", id)))
    }

    /// Delete an offer
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM donation_offers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Offer with id {} not found", id)));
        }
        Ok(())
    }
}
