//! Repository layer for database operations

pub mod authors;
pub mod availability;
pub mod books;
pub mod categories;
pub mod libraries;
pub mod offers;
pub mod relations;
pub mod sessions;
pub mod users;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub users: users::UsersRepository,
    pub authors: authors::AuthorsRepository,
    pub categories: categories::CategoriesRepository,
    pub libraries: libraries::LibrariesRepository,
    pub books: books::BooksRepository,
    pub availability: availability::AvailabilityRepository,
    pub sessions: sessions::SessionsRepository,
    pub offers: offers::OffersRepository,
    pub relations: relations::RelationsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            users: users::UsersRepository::new(pool.clone()),
            authors: authors::AuthorsRepository::new(pool.clone()),
            categories: categories::CategoriesRepository::new(pool.clone()),
            libraries: libraries::LibrariesRepository::new(pool.clone()),
            books: books::BooksRepository::new(pool.clone()),
            availability: availability::AvailabilityRepository::new(pool.clone()),
            sessions: sessions::SessionsRepository::new(pool.clone()),
            offers: offers::OffersRepository::new(pool.clone()),
            relations: relations::RelationsRepository::new(pool.clone()),
            pool,
        }
    }
}

/// Postgres unique-constraint violation (SQLSTATE 23505)
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some("23505"))
}

/// Normalize page/per_page query values into a (limit, offset) pair
pub(crate) fn page_bounds(page: Option<i64>, per_page: Option<i64>) -> (i64, i64) {
    let per_page = per_page.unwrap_or(20).clamp(1, 100);
    let page = page.unwrap_or(1).max(1);
    (per_page, (page - 1) * per_page)
}

#[cfg(test)]
mod tests {
    use super::page_bounds;

    #[test]
    fn page_bounds_defaults() {
        assert_eq!(page_bounds(None, None), (20, 0));
    }

    #[test]
    fn page_bounds_clamps_per_page() {
        assert_eq!(page_bounds(Some(2), Some(500)), (100, 100));
        assert_eq!(page_bounds(Some(1), Some(0)), (1, 0));
    }

    #[test]
    fn page_bounds_negative_page() {
        assert_eq!(page_bounds(Some(-3), Some(10)), (10, 0));
    }
}
