//! Library model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Library model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Library {
    pub id: i32,
    pub title: String,
    pub location: String,
    pub phone: String,
}

/// Create library request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateLibrary {
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,
    #[validate(length(min = 1, max = 255, message = "Location must be 1-255 characters"))]
    pub location: String,
    #[validate(length(min = 1, max = 64, message = "Phone must be 1-64 characters"))]
    pub phone: String,
}

/// Update library request (partial)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateLibrary {
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 255, message = "Location must be 1-255 characters"))]
    pub location: Option<String>,
    #[validate(length(min = 1, max = 64, message = "Phone must be 1-64 characters"))]
    pub phone: Option<String>,
}

/// Library list query parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct LibraryQuery {
    /// Substring search over the title
    pub search: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}
