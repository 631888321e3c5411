//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{
    auth, authors, availability, books, categories, health, libraries, offers, relations,
    sessions,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Biblion API",
        version = "0.3.0",
        description = "Community library catalog and lending REST API",
        license(name = "GPL-2.0", url = "https://www.gnu.org/licenses/gpl-2.0.html"),
        contact(name = "Biblion Team", email = "contact@biblion.org")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::register,
        auth::login,
        auth::me,
        // Books
        books::list_books,
        books::get_book,
        books::create_book,
        books::update_book,
        books::delete_book,
        // Authors
        authors::list_authors,
        authors::get_author,
        authors::get_author_books,
        authors::create_author,
        authors::update_author,
        authors::delete_author,
        // Categories
        categories::list_categories,
        categories::get_category,
        categories::get_category_books,
        categories::create_category,
        categories::update_category,
        categories::delete_category,
        // Libraries
        libraries::list_libraries,
        libraries::get_library,
        libraries::get_library_books,
        libraries::create_library,
        libraries::update_library,
        libraries::delete_library,
        // Availability
        availability::list_availability,
        availability::get_availability,
        availability::create_availability,
        availability::update_availability,
        availability::delete_availability,
        // Sessions
        sessions::list_my_sessions,
        sessions::get_my_session,
        sessions::create_session,
        sessions::search_sessions,
        sessions::get_session,
        sessions::update_session,
        sessions::delete_session,
        // Offers
        offers::list_my_offers,
        offers::get_my_offer,
        offers::create_offer,
        offers::search_offers,
        offers::get_offer,
        offers::update_offer,
        offers::delete_offer,
        // Relations
        relations::update_relation,
        relations::list_bookmarks,
    ),
    components(
        schemas(
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            crate::models::user::User,
            crate::models::user::UserShort,
            crate::models::user::RegisterUser,
            // Books
            crate::models::book::Book,
            crate::models::book::BookSummary,
            crate::models::book::BookDetail,
            crate::models::book::BookStock,
            crate::models::book::BookOrdering,
            crate::models::book::CreateBook,
            crate::models::book::UpdateBook,
            // Authors
            crate::models::author::Author,
            crate::models::author::CreateAuthor,
            crate::models::author::UpdateAuthor,
            // Categories
            crate::models::category::Category,
            crate::models::category::CreateCategory,
            crate::models::category::UpdateCategory,
            // Libraries
            crate::models::library::Library,
            crate::models::library::CreateLibrary,
            crate::models::library::UpdateLibrary,
            // Availability
            crate::models::availability::Availability,
            crate::models::availability::AvailabilityDetail,
            crate::models::availability::CreateAvailability,
            crate::models::availability::UpdateAvailability,
            // Sessions
            crate::models::session::BorrowSession,
            crate::models::session::SessionBook,
            crate::models::session::SessionDetails,
            crate::models::session::CreateSession,
            crate::models::session::UpdateSession,
            // Offers
            crate::models::offer::DonationOffer,
            crate::models::offer::OfferDetails,
            crate::models::offer::CreateOffer,
            crate::models::offer::UpdateOffer,
            // Relations
            crate::models::relation::UserBookRelation,
            crate::models::relation::UpdateRelation,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "books", description = "Book catalog"),
        (name = "authors", description = "Author management"),
        (name = "categories", description = "Category management"),
        (name = "libraries", description = "Library branch management"),
        (name = "availability", description = "Stock availability"),
        (name = "sessions", description = "Borrow sessions"),
        (name = "offers", description = "Donation offers"),
        (name = "relations", description = "Ratings, likes and bookmarks")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
