//! Donation offer endpoints
//!
//! Members create and track their own offers under `/offers`;
//! staff review them under `/manage/offers`.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::offer::{CreateOffer, OfferAdminQuery, OfferDetails, OfferQuery, UpdateOffer},
};

use super::{AuthenticatedUser, PaginatedResponse};

/// List the caller's donation offers
#[utoipa::path(
    get,
    path = "/offers",
    tag = "offers",
    security(("bearer_auth" = [])),
    params(OfferQuery),
    responses(
        (status = 200, description = "Page of offers", body = PaginatedResponse<OfferDetails>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_my_offers(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<OfferQuery>,
) -> AppResult<Json<PaginatedResponse<OfferDetails>>> {
    let (items, total) = state
        .services
        .offers
        .my_offers(claims.user_id, &query)
        .await?;
    Ok(Json(PaginatedResponse::new(items, total, query.page, query.per_page)))
}

/// Get one of the caller's offers
#[utoipa::path(
    get,
    path = "/offers/{id}",
    tag = "offers",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Offer ID")
    ),
    responses(
        (status = 200, description = "Offer details", body = OfferDetails),
        (status = 404, description = "Offer not found")
    )
)]
pub async fn get_my_offer(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<OfferDetails>> {
    let offer = state.services.offers.my_offer(claims.user_id, id).await?;
    Ok(Json(offer))
}

/// Offer books for donation
#[utoipa::path(
    post,
    path = "/offers",
    tag = "offers",
    security(("bearer_auth" = [])),
    request_body = CreateOffer,
    responses(
        (status = 201, description = "Offer created", body = OfferDetails),
        (status = 400, description = "Invalid offer payload"),
        (status = 404, description = "Library not found")
    )
)]
pub async fn create_offer(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CreateOffer>,
) -> AppResult<(StatusCode, Json<OfferDetails>)> {
    let created = state
        .services
        .offers
        .create_offer(claims.user_id, request)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Search all offers (staff only)
#[utoipa::path(
    get,
    path = "/manage/offers",
    tag = "offers",
    security(("bearer_auth" = [])),
    params(OfferAdminQuery),
    responses(
        (status = 200, description = "Page of offers", body = PaginatedResponse<OfferDetails>),
        (status = 403, description = "Staff privileges required")
    )
)]
pub async fn search_offers(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<OfferAdminQuery>,
) -> AppResult<Json<PaginatedResponse<OfferDetails>>> {
    claims.require_staff()?;

    let (items, total) = state.services.offers.search(&query).await?;
    Ok(Json(PaginatedResponse::new(items, total, query.page, query.per_page)))
}

/// Get any offer (staff only)
#[utoipa::path(
    get,
    path = "/manage/offers/{id}",
    tag = "offers",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Offer ID")
    ),
    responses(
        (status = 200, description = "Offer details", body = OfferDetails),
        (status = 403, description = "Staff privileges required"),
        (status = 404, description = "Offer not found")
    )
)]
pub async fn get_offer(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<OfferDetails>> {
    claims.require_staff()?;

    let offer = state.services.offers.get_offer(id).await?;
    Ok(Json(offer))
}

/// Review an offer (staff only)
///
/// Acceptance is one-way and closed offers are frozen.
#[utoipa::path(
    put,
    path = "/manage/offers/{id}",
    tag = "offers",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Offer ID")
    ),
    request_body = UpdateOffer,
    responses(
        (status = 200, description = "Offer updated", body = OfferDetails),
        (status = 403, description = "Staff privileges required"),
        (status = 404, description = "Offer not found"),
        (status = 409, description = "Offer is closed or acceptance would be revoked")
    )
)]
pub async fn update_offer(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(update): Json<UpdateOffer>,
) -> AppResult<Json<OfferDetails>> {
    claims.require_staff()?;

    let updated = state.services.offers.update_offer(id, update).await?;
    Ok(Json(updated))
}

/// Delete an offer (staff only)
#[utoipa::path(
    delete,
    path = "/manage/offers/{id}",
    tag = "offers",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Offer ID")
    ),
    responses(
        (status = 204, description = "Offer deleted"),
        (status = 403, description = "Staff privileges required"),
        (status = 404, description = "Offer not found")
    )
)]
pub async fn delete_offer(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_staff()?;

    state.services.offers.delete_offer(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
