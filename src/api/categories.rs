//! Category endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        book::BookSummary,
        category::{Category, CategoryQuery, CreateCategory, UpdateCategory},
    },
};

use super::{authors::PageQuery, AuthenticatedUser, PaginatedResponse};

/// List categories. Public; supports title search.
#[utoipa::path(
    get,
    path = "/categories",
    tag = "categories",
    params(CategoryQuery),
    responses(
        (status = 200, description = "Page of categories", body = PaginatedResponse<Category>)
    )
)]
pub async fn list_categories(
    State(state): State<crate::AppState>,
    Query(query): Query<CategoryQuery>,
) -> AppResult<Json<PaginatedResponse<Category>>> {
    let (items, total) = state.services.catalog.list_categories(&query).await?;
    Ok(Json(PaginatedResponse::new(items, total, query.page, query.per_page)))
}

/// Get category by ID. Public.
#[utoipa::path(
    get,
    path = "/categories/{id}",
    tag = "categories",
    params(
        ("id" = i32, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category", body = Category),
        (status = 404, description = "Category not found")
    )
)]
pub async fn get_category(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Category>> {
    let category = state.services.catalog.get_category(id).await?;
    Ok(Json(category))
}

/// List a category's books. Public.
#[utoipa::path(
    get,
    path = "/categories/{id}/books",
    tag = "categories",
    params(
        ("id" = i32, Path, description = "Category ID"),
        PageQuery
    ),
    responses(
        (status = 200, description = "Page of books", body = PaginatedResponse<BookSummary>),
        (status = 404, description = "Category not found")
    )
)]
pub async fn get_category_books(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<PaginatedResponse<BookSummary>>> {
    let (items, total) = state
        .services
        .catalog
        .books_by_category(id, query.page, query.per_page)
        .await?;
    Ok(Json(PaginatedResponse::new(items, total, query.page, query.per_page)))
}

/// Create a new category (staff only)
#[utoipa::path(
    post,
    path = "/categories",
    tag = "categories",
    security(("bearer_auth" = [])),
    request_body = CreateCategory,
    responses(
        (status = 201, description = "Category created", body = Category),
        (status = 403, description = "Staff privileges required")
    )
)]
pub async fn create_category(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(category): Json<CreateCategory>,
) -> AppResult<(StatusCode, Json<Category>)> {
    claims.require_staff()?;

    let created = state.services.catalog.create_category(category).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a category (staff only)
#[utoipa::path(
    put,
    path = "/categories/{id}",
    tag = "categories",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Category ID")
    ),
    request_body = UpdateCategory,
    responses(
        (status = 200, description = "Category updated", body = Category),
        (status = 403, description = "Staff privileges required"),
        (status = 404, description = "Category not found")
    )
)]
pub async fn update_category(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(update): Json<UpdateCategory>,
) -> AppResult<Json<Category>> {
    claims.require_staff()?;

    let updated = state.services.catalog.update_category(id, update).await?;
    Ok(Json(updated))
}

/// Delete a category (staff only)
#[utoipa::path(
    delete,
    path = "/categories/{id}",
    tag = "categories",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Category ID")
    ),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 403, description = "Staff privileges required"),
        (status = 404, description = "Category not found")
    )
)]
pub async fn delete_category(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_staff()?;

    state.services.catalog.delete_category(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
