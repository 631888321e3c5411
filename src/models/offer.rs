//! Donation offer model and related types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::user::UserShort;

/// Donation offer model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct DonationOffer {
    pub id: i32,
    pub user_id: i32,
    pub library_id: i32,
    pub quantity: i16,
    pub books_description: String,
    pub is_accepted: bool,
    pub is_closed: bool,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Offer with resolved user and library records
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OfferDetails {
    pub id: i32,
    pub user: UserShort,
    pub library_id: i32,
    pub library_title: String,
    pub quantity: i16,
    pub books_description: String,
    pub is_accepted: bool,
    pub is_closed: bool,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Create offer request. The owner is always the authenticated caller.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateOffer {
    pub library_id: i32,
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: i16,
    #[validate(length(min = 1, message = "Books description must not be empty"))]
    pub books_description: String,
    pub message: Option<String>,
}

/// Update offer request (staff, partial)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateOffer {
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: Option<i16>,
    #[validate(length(min = 1, message = "Books description must not be empty"))]
    pub books_description: Option<String>,
    pub is_accepted: Option<bool>,
    pub is_closed: Option<bool>,
    pub message: Option<String>,
}

/// Offer list query parameters (own offers)
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct OfferQuery {
    pub is_accepted: Option<bool>,
    pub is_closed: Option<bool>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// Offer administration query parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct OfferAdminQuery {
    /// Substring search over books description, username, and library title
    pub search: Option<String>,
    pub is_accepted: Option<bool>,
    pub is_closed: Option<bool>,
    pub created_after: Option<NaiveDate>,
    pub created_before: Option<NaiveDate>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}
