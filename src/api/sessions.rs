//! Borrow session endpoints
//!
//! `/sessions` is the member-facing surface (own sessions only);
//! `/manage/sessions` is the staff review surface.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::session::{
        CreateSession, SessionAdminQuery, SessionDetails, SessionQuery, UpdateSession,
    },
};

use super::{AuthenticatedUser, PaginatedResponse};

/// List the caller's borrow sessions
#[utoipa::path(
    get,
    path = "/sessions",
    tag = "sessions",
    security(("bearer_auth" = [])),
    params(SessionQuery),
    responses(
        (status = 200, description = "Page of sessions", body = PaginatedResponse<SessionDetails>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_my_sessions(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<SessionQuery>,
) -> AppResult<Json<PaginatedResponse<SessionDetails>>> {
    let (items, total) = state
        .services
        .sessions
        .my_sessions(claims.user_id, &query)
        .await?;
    Ok(Json(PaginatedResponse::new(items, total, query.page, query.per_page)))
}

/// Get one of the caller's sessions
#[utoipa::path(
    get,
    path = "/sessions/{id}",
    tag = "sessions",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Session ID")
    ),
    responses(
        (status = 200, description = "Session details", body = SessionDetails),
        (status = 404, description = "Session not found")
    )
)]
pub async fn get_my_session(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<SessionDetails>> {
    let session = state.services.sessions.my_session(claims.user_id, id).await?;
    Ok(Json(session))
}

/// Request a borrow session
#[utoipa::path(
    post,
    path = "/sessions",
    tag = "sessions",
    security(("bearer_auth" = [])),
    request_body = CreateSession,
    responses(
        (status = 201, description = "Session created", body = SessionDetails),
        (status = 404, description = "Library not found"),
        (status = 422, description = "Request rejected by lending rules")
    )
)]
pub async fn create_session(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CreateSession>,
) -> AppResult<(StatusCode, Json<SessionDetails>)> {
    let created = state
        .services
        .sessions
        .create_session(claims.user_id, request)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Search all sessions (staff only)
#[utoipa::path(
    get,
    path = "/manage/sessions",
    tag = "sessions",
    security(("bearer_auth" = [])),
    params(SessionAdminQuery),
    responses(
        (status = 200, description = "Page of sessions", body = PaginatedResponse<SessionDetails>),
        (status = 403, description = "Staff privileges required")
    )
)]
pub async fn search_sessions(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<SessionAdminQuery>,
) -> AppResult<Json<PaginatedResponse<SessionDetails>>> {
    claims.require_staff()?;

    let (items, total) = state.services.sessions.search(&query).await?;
    Ok(Json(PaginatedResponse::new(items, total, query.page, query.per_page)))
}

/// Get any session (staff only)
#[utoipa::path(
    get,
    path = "/manage/sessions/{id}",
    tag = "sessions",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Session ID")
    ),
    responses(
        (status = 200, description = "Session details", body = SessionDetails),
        (status = 403, description = "Staff privileges required"),
        (status = 404, description = "Session not found")
    )
)]
pub async fn get_session(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<SessionDetails>> {
    claims.require_staff()?;

    let session = state.services.sessions.get_session(id).await?;
    Ok(Json(session))
}

/// Review a session (staff only)
///
/// Acceptance is one-way and closed sessions are frozen.
#[utoipa::path(
    put,
    path = "/manage/sessions/{id}",
    tag = "sessions",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Session ID")
    ),
    request_body = UpdateSession,
    responses(
        (status = 200, description = "Session updated", body = SessionDetails),
        (status = 403, description = "Staff privileges required"),
        (status = 404, description = "Session not found"),
        (status = 409, description = "Session is closed or acceptance would be revoked")
    )
)]
pub async fn update_session(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(update): Json<UpdateSession>,
) -> AppResult<Json<SessionDetails>> {
    claims.require_staff()?;

    let updated = state.services.sessions.update_session(id, update).await?;
    Ok(Json(updated))
}

/// Delete a session (staff only)
#[utoipa::path(
    delete,
    path = "/manage/sessions/{id}",
    tag = "sessions",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Session ID")
    ),
    responses(
        (status = 204, description = "Session deleted"),
        (status = 403, description = "Staff privileges required"),
        (status = 404, description = "Session not found")
    )
)]
pub async fn delete_session(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_staff()?;

    state.services.sessions.delete_session(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
