//! Per-user book relation endpoints (rating, like, bookmark)

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    error::AppResult,
    models::{
        book::BookSummary,
        relation::{UpdateRelation, UserBookRelation},
    },
};

use super::{AuthenticatedUser, PaginatedResponse};

#[derive(Debug, Deserialize, IntoParams)]
pub struct BookmarkQuery {
    /// Filter bookmarked books by title substring
    pub search: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// Set the caller's relation to a book
///
/// Absent fields keep their current value; the book's aggregated
/// rating, likes and bookmark counters are refreshed in the same call.
#[utoipa::path(
    put,
    path = "/books/{id}/relation",
    tag = "relations",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    request_body = UpdateRelation,
    responses(
        (status = 200, description = "Relation after the update", body = UserBookRelation),
        (status = 400, description = "Rate outside the 1..=5 range"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn update_relation(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(update): Json<UpdateRelation>,
) -> AppResult<Json<UserBookRelation>> {
    let relation = state
        .services
        .relations
        .rate_book(claims.user_id, id, update)
        .await?;
    Ok(Json(relation))
}

/// List the caller's bookmarked books
#[utoipa::path(
    get,
    path = "/bookmarks",
    tag = "relations",
    security(("bearer_auth" = [])),
    params(BookmarkQuery),
    responses(
        (status = 200, description = "Page of bookmarked books", body = PaginatedResponse<BookSummary>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_bookmarks(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<BookmarkQuery>,
) -> AppResult<Json<PaginatedResponse<BookSummary>>> {
    let (items, total) = state
        .services
        .catalog
        .bookmarked_books(claims.user_id, query.search.as_deref(), query.page, query.per_page)
        .await?;
    Ok(Json(PaginatedResponse::new(items, total, query.page, query.per_page)))
}
