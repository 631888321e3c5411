//! Per-user book relation: like, bookmark, and rating.
//! Unique per (user, book); drives the book's derived counters.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Relation model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct UserBookRelation {
    pub id: i32,
    pub user_id: i32,
    pub book_id: i32,
    #[sqlx(rename = "like_flag")]
    pub like: bool,
    pub in_bookmarks: bool,
    /// 1-5, null when the user has not rated the book
    pub rate: Option<i16>,
}

/// Update relation request. Absent fields are left untouched; only the
/// counters backing the provided fields are recomputed on update.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateRelation {
    pub like: Option<bool>,
    pub in_bookmarks: Option<bool>,
    pub rate: Option<i16>,
}
