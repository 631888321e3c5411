//! Rating/likes/bookmarks aggregator: maintains the book's derived
//! counters whenever a user-book relation is created or changed.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::{
    error::{AppError, AppResult},
    models::relation::{UpdateRelation, UserBookRelation},
    repository::Repository,
};

#[derive(Clone)]
pub struct RelationsService {
    repository: Repository,
}

/// Round a raw rate average to the stored rating shape: two decimal
/// places, midpoint away from zero. 11/3 pins to 3.67.
pub fn round_rating(avg: Option<Decimal>) -> Option<Decimal> {
    avg.map(|value| {
        let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(2);
        rounded
    })
}

impl RelationsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Apply a user's like/bookmark/rate to a book and recompute the
    /// affected counters. On first contact (relation created) all three
    /// counters are recomputed; on update only those whose backing field
    /// is present in the payload.
    pub async fn rate_book(
        &self,
        user_id: i32,
        book_id: i32,
        update: UpdateRelation,
    ) -> AppResult<UserBookRelation> {
        if let Some(rate) = update.rate {
            if !(1..=5).contains(&rate) {
                return Err(AppError::Validation(format!(
                    "Rate must be between 1 and 5, got {}",
                    rate
                )));
            }
        }

        self.repository.books.get_by_id(book_id).await?;

        let (relation, created) = self.repository.relations.get_or_create(user_id, book_id).await?;
        let relation = self.repository.relations.apply(relation.id, &update).await?;

        if created {
            self.set_rating(book_id).await?;
            self.set_likes(book_id).await?;
            self.set_bookmarks(book_id).await?;
        } else {
            if update.rate.is_some() {
                self.set_rating(book_id).await?;
            }
            if update.like.is_some() {
                self.set_likes(book_id).await?;
            }
            if update.in_bookmarks.is_some() {
                self.set_bookmarks(book_id).await?;
            }
        }

        Ok(relation)
    }

    /// Recompute and store the book's rating
    pub async fn set_rating(&self, book_id: i32) -> AppResult<()> {
        let avg = self.repository.relations.avg_rate(book_id).await?;
        self.repository
            .relations
            .store_rating(book_id, round_rating(avg))
            .await
    }

    /// Recompute and store the book's like count
    pub async fn set_likes(&self, book_id: i32) -> AppResult<()> {
        let likes = self.repository.relations.count_likes(book_id).await?;
        self.repository.relations.store_likes(book_id, likes).await
    }

    /// Recompute and store the book's bookmark count
    pub async fn set_bookmarks(&self, book_id: i32) -> AppResult<()> {
        let bookmarks = self.repository.relations.count_bookmarks(book_id).await?;
        self.repository
            .relations
            .store_bookmarks(book_id, bookmarks)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn avg_of(rates: &[i64]) -> Decimal {
        let sum: i64 = rates.iter().sum();
        Decimal::from(sum) / Decimal::from(rates.len() as i64)
    }

    #[test]
    fn no_rates_means_no_rating() {
        assert_eq!(round_rating(None), None);
    }

    #[test]
    fn whole_average_renders_two_places() {
        // Rates {5, 3, 4}; the null rate is excluded from the mean
        let rating = round_rating(Some(avg_of(&[5, 3, 4]))).unwrap();
        assert_eq!(rating.to_string(), "4.00");
    }

    #[test]
    fn repeating_average_rounds_half_away_from_zero() {
        // One rate changed 5 -> 4: {4, 3, 4} averages 11/3
        let rating = round_rating(Some(avg_of(&[4, 3, 4]))).unwrap();
        assert_eq!(rating.to_string(), "3.67");
    }

    #[test]
    fn exact_midpoint_rounds_up() {
        let rating = round_rating(Some(Decimal::new(3665, 3))).unwrap();
        assert_eq!(rating.to_string(), "3.67");
    }

    #[test]
    fn rounding_is_idempotent() {
        let once = round_rating(Some(avg_of(&[4, 3, 4]))).unwrap();
        let twice = round_rating(Some(once)).unwrap();
        assert_eq!(once, twice);
    }
}
