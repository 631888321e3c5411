//! Borrow session model and related types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::user::UserShort;

/// Borrow session model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BorrowSession {
    pub id: i32,
    pub user_id: i32,
    pub library_id: i32,
    /// Date the books are to be picked up
    pub start_date: NaiveDate,
    /// Date the books are to be returned
    pub end_date: NaiveDate,
    pub is_accepted: bool,
    pub is_closed: bool,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Book reference embedded in session views
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct SessionBook {
    pub id: i32,
    pub title: String,
}

/// Session with resolved user, library, and book records
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SessionDetails {
    pub id: i32,
    pub user: UserShort,
    pub library_id: i32,
    pub library_title: String,
    pub books: Vec<SessionBook>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_accepted: bool,
    pub is_closed: bool,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Create session request. The owner is always the authenticated caller,
/// never taken from the payload.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateSession {
    pub book_ids: Vec<i32>,
    pub library_id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub message: Option<String>,
}

/// Update session request (staff, partial)
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateSession {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub is_accepted: Option<bool>,
    pub is_closed: Option<bool>,
    pub message: Option<String>,
}

/// Session list query parameters (own sessions)
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct SessionQuery {
    pub is_accepted: Option<bool>,
    pub is_closed: Option<bool>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// Session administration query parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct SessionAdminQuery {
    /// Substring search over book title, username, and library title
    pub search: Option<String>,
    pub is_accepted: Option<bool>,
    pub is_closed: Option<bool>,
    pub created_after: Option<NaiveDate>,
    pub created_before: Option<NaiveDate>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}
