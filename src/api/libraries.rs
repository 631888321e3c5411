//! Library branch endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        book::BookSummary,
        library::{CreateLibrary, Library, LibraryQuery, UpdateLibrary},
    },
};

use super::{authors::PageQuery, AuthenticatedUser, PaginatedResponse};

/// List library branches. Public; supports title search.
#[utoipa::path(
    get,
    path = "/libraries",
    tag = "libraries",
    params(LibraryQuery),
    responses(
        (status = 200, description = "Page of libraries", body = PaginatedResponse<Library>)
    )
)]
pub async fn list_libraries(
    State(state): State<crate::AppState>,
    Query(query): Query<LibraryQuery>,
) -> AppResult<Json<PaginatedResponse<Library>>> {
    let (items, total) = state.services.catalog.list_libraries(&query).await?;
    Ok(Json(PaginatedResponse::new(items, total, query.page, query.per_page)))
}

/// Get library branch by ID. Public.
#[utoipa::path(
    get,
    path = "/libraries/{id}",
    tag = "libraries",
    params(
        ("id" = i32, Path, description = "Library ID")
    ),
    responses(
        (status = 200, description = "Library", body = Library),
        (status = 404, description = "Library not found")
    )
)]
pub async fn get_library(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Library>> {
    let library = state.services.catalog.get_library(id).await?;
    Ok(Json(library))
}

/// List books available at a library branch. Public.
#[utoipa::path(
    get,
    path = "/libraries/{id}/books",
    tag = "libraries",
    params(
        ("id" = i32, Path, description = "Library ID"),
        PageQuery
    ),
    responses(
        (status = 200, description = "Page of books", body = PaginatedResponse<BookSummary>),
        (status = 404, description = "Library not found")
    )
)]
pub async fn get_library_books(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<PaginatedResponse<BookSummary>>> {
    let (items, total) = state
        .services
        .catalog
        .books_by_library(id, query.page, query.per_page)
        .await?;
    Ok(Json(PaginatedResponse::new(items, total, query.page, query.per_page)))
}

/// Create a new library branch (staff only)
#[utoipa::path(
    post,
    path = "/libraries",
    tag = "libraries",
    security(("bearer_auth" = [])),
    request_body = CreateLibrary,
    responses(
        (status = 201, description = "Library created", body = Library),
        (status = 403, description = "Staff privileges required")
    )
)]
pub async fn create_library(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(library): Json<CreateLibrary>,
) -> AppResult<(StatusCode, Json<Library>)> {
    claims.require_staff()?;

    let created = state.services.catalog.create_library(library).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a library branch (staff only)
#[utoipa::path(
    put,
    path = "/libraries/{id}",
    tag = "libraries",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Library ID")
    ),
    request_body = UpdateLibrary,
    responses(
        (status = 200, description = "Library updated", body = Library),
        (status = 403, description = "Staff privileges required"),
        (status = 404, description = "Library not found")
    )
)]
pub async fn update_library(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(update): Json<UpdateLibrary>,
) -> AppResult<Json<Library>> {
    claims.require_staff()?;

    let updated = state.services.catalog.update_library(id, update).await?;
    Ok(Json(updated))
}

/// Delete a library branch (staff only)
#[utoipa::path(
    delete,
    path = "/libraries/{id}",
    tag = "libraries",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Library ID")
    ),
    responses(
        (status = 204, description = "Library deleted"),
        (status = 403, description = "Staff privileges required"),
        (status = 404, description = "Library not found")
    )
)]
pub async fn delete_library(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_staff()?;

    state.services.catalog.delete_library(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
