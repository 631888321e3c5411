//! Book (catalog entry) model and related types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::author::Author;
use super::category::Category;

/// Book model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub author_id: i32,
    pub created_at: DateTime<Utc>,
    /// Derived: mean of user rates, 2 decimal places, null when unrated
    pub rating: Option<Decimal>,
    /// Derived: count of relations with the like flag set
    pub likes: i32,
    /// Derived: count of relations with the bookmark flag set
    pub bookmarks: i32,
}

/// Short book representation for lists
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookSummary {
    pub id: i32,
    pub title: String,
    /// Abbreviated author name ("F. M. Lastname")
    pub author: String,
    pub rating: Option<Decimal>,
    pub likes: i32,
    #[sqlx(skip)]
    pub categories: Vec<String>,
}

/// Per-library stock line on the book detail view
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookStock {
    pub library_id: i32,
    pub library_title: String,
    pub available: bool,
}

/// Full book view with related records
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookDetail {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub author: Author,
    pub categories: Vec<Category>,
    pub libraries: Vec<BookStock>,
    pub rating: Option<Decimal>,
    pub likes: i32,
    pub bookmarks: i32,
    /// Count of accepted and not yet closed sessions containing this book
    pub reading_now: i64,
    pub created_at: DateTime<Utc>,
}

/// Create book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,
    pub description: String,
    pub author_id: i32,
    #[serde(default)]
    pub category_ids: Vec<i32>,
}

/// Update book request (partial)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBook {
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub author_id: Option<i32>,
    /// Replaces the category set when present
    pub category_ids: Option<Vec<i32>>,
}

/// Book list ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BookOrdering {
    Rating,
    Likes,
}

/// Book list query parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct BookQuery {
    /// Substring search over the title
    pub search: Option<String>,
    pub category_id: Option<i32>,
    pub author_id: Option<i32>,
    pub library_id: Option<i32>,
    pub order_by: Option<BookOrdering>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}
