//! Stock availability endpoints (staff only)

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::availability::{
        Availability, AvailabilityDetail, AvailabilityQuery, CreateAvailability,
        UpdateAvailability,
    },
};

use super::{AuthenticatedUser, PaginatedResponse};

/// List availability records
#[utoipa::path(
    get,
    path = "/availability",
    tag = "availability",
    security(("bearer_auth" = [])),
    params(AvailabilityQuery),
    responses(
        (status = 200, description = "Page of availability records", body = PaginatedResponse<AvailabilityDetail>),
        (status = 403, description = "Staff privileges required")
    )
)]
pub async fn list_availability(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<AvailabilityQuery>,
) -> AppResult<Json<PaginatedResponse<AvailabilityDetail>>> {
    claims.require_staff()?;

    let (items, total) = state.services.catalog.list_availability(&query).await?;
    Ok(Json(PaginatedResponse::new(items, total, query.page, query.per_page)))
}

/// Get one availability record
#[utoipa::path(
    get,
    path = "/availability/{id}",
    tag = "availability",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Availability record ID")
    ),
    responses(
        (status = 200, description = "Availability record", body = AvailabilityDetail),
        (status = 403, description = "Staff privileges required"),
        (status = 404, description = "Record not found")
    )
)]
pub async fn get_availability(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<AvailabilityDetail>> {
    claims.require_staff()?;

    let record = state.services.catalog.get_availability(id).await?;
    Ok(Json(record))
}

/// Declare that a library stocks a book
#[utoipa::path(
    post,
    path = "/availability",
    tag = "availability",
    security(("bearer_auth" = [])),
    request_body = CreateAvailability,
    responses(
        (status = 201, description = "Record created", body = Availability),
        (status = 403, description = "Staff privileges required"),
        (status = 404, description = "Book or library not found"),
        (status = 409, description = "Record already exists for this book and library")
    )
)]
pub async fn create_availability(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(record): Json<CreateAvailability>,
) -> AppResult<(StatusCode, Json<Availability>)> {
    claims.require_staff()?;

    let created = state.services.catalog.create_availability(record).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Flip the available flag on a record
#[utoipa::path(
    put,
    path = "/availability/{id}",
    tag = "availability",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Availability record ID")
    ),
    request_body = UpdateAvailability,
    responses(
        (status = 200, description = "Record updated", body = Availability),
        (status = 403, description = "Staff privileges required"),
        (status = 404, description = "Record not found")
    )
)]
pub async fn update_availability(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(update): Json<UpdateAvailability>,
) -> AppResult<Json<Availability>> {
    claims.require_staff()?;

    let updated = state.services.catalog.update_availability(id, update).await?;
    Ok(Json(updated))
}

/// Remove an availability record
#[utoipa::path(
    delete,
    path = "/availability/{id}",
    tag = "availability",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Availability record ID")
    ),
    responses(
        (status = 204, description = "Record deleted"),
        (status = 403, description = "Staff privileges required"),
        (status = 404, description = "Record not found")
    )
)]
pub async fn delete_availability(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_staff()?;

    state.services.catalog.delete_availability(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
