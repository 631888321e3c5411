//! Book availability per library: the fact table consulted by the
//! borrow-session validator.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

/// Availability record from database, unique per (book, library) pair
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Availability {
    pub id: i32,
    pub book_id: i32,
    pub library_id: i32,
    pub available: bool,
}

/// Availability record with resolved titles for list/detail views
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AvailabilityDetail {
    pub id: i32,
    pub book_id: i32,
    pub book_title: String,
    pub library_id: i32,
    pub library_title: String,
    pub available: bool,
}

/// Row shape consumed by the borrow-session validator
#[derive(Debug, Clone, FromRow)]
pub struct AvailabilityFact {
    pub book_id: i32,
    pub book_title: String,
    pub available: bool,
}

/// Create availability record request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateAvailability {
    pub book_id: i32,
    pub library_id: i32,
    pub available: bool,
}

/// Update availability record request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateAvailability {
    pub available: bool,
}

/// Availability list query parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct AvailabilityQuery {
    pub book_id: Option<i32>,
    pub library_id: Option<i32>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}
