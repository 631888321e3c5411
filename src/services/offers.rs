//! Donation offer management service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::offer::{CreateOffer, OfferAdminQuery, OfferDetails, OfferQuery, UpdateOffer},
    repository::Repository,
    services::review::{guard_update, ReviewState},
};

#[derive(Clone)]
pub struct OffersService {
    repository: Repository,
}

impl OffersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Create an offer for the authenticated user
    pub async fn create_offer(&self, user_id: i32, offer: CreateOffer) -> AppResult<OfferDetails> {
        offer
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        // Friendly 404 before hitting the foreign key
        self.repository.libraries.get_by_id(offer.library_id).await?;

        let created = self.repository.offers.create(user_id, &offer).await?;
        tracing::info!(
            "Offer {} created: user {} offers {} book(s) to library {}",
            created.id,
            user_id,
            created.quantity,
            created.library_id
        );
        self.repository.offers.get_details(created.id).await
    }

    /// List the caller's own offers
    pub async fn my_offers(
        &self,
        user_id: i32,
        query: &OfferQuery,
    ) -> AppResult<(Vec<OfferDetails>, i64)> {
        self.repository.offers.list_for_user(user_id, query).await
    }

    /// Get one of the caller's own offers
    pub async fn my_offer(&self, user_id: i32, id: i32) -> AppResult<OfferDetails> {
        let details = self.repository.offers.get_details(id).await?;
        if details.user.id != user_id {
            return Err(AppError::NotFound(format!("Offer with id {} not found", id)));
        }
        Ok(details)
    }

    /// Administrative search across all offers
    pub async fn search(&self, query: &OfferAdminQuery) -> AppResult<(Vec<OfferDetails>, i64)> {
        self.repository.offers.search(query).await
    }

    /// Get any offer by ID (staff)
    pub async fn get_offer(&self, id: i32) -> AppResult<OfferDetails> {
        self.repository.offers.get_details(id).await
    }

    /// Apply a staff update under the review mutation rules
    pub async fn update_offer(&self, id: i32, update: UpdateOffer) -> AppResult<OfferDetails> {
        update
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let existing = self.repository.offers.get_by_id(id).await?;
        guard_update(
            ReviewState {
                is_accepted: existing.is_accepted,
                is_closed: existing.is_closed,
            },
            update.is_accepted,
        )?;
        self.repository.offers.update(id, &update).await?;
        self.repository.offers.get_details(id).await
    }

    /// Delete an offer (staff)
    pub async fn delete_offer(&self, id: i32) -> AppResult<()> {
        self.repository.offers.delete(id).await
    }
}
