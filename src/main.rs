//! Biblion Server - Community Library Platform
//!
//! A Rust REST API server for shared catalogs, borrow sessions and donations.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use biblion_server::{
    api,
    clock::SystemClock,
    config::AppConfig,
    repository::Repository,
    services::Services,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("biblion_server={},tower_http=debug", config.logging.level).into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Biblion Server v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations completed");

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create repository and services
    let repository = Repository::new(pool);
    let services = Services::new(repository, config.auth.clone(), Arc::new(SystemClock));

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(
        server_host.parse().expect("Invalid host address"),
        server_port,
    );

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Authentication
        .route("/auth/register", post(api::auth::register))
        .route("/auth/login", post(api::auth::login))
        .route("/auth/me", get(api::auth::me))
        // Books
        .route("/books", get(api::books::list_books))
        .route("/books", post(api::books::create_book))
        .route("/books/:id", get(api::books::get_book))
        .route("/books/:id", put(api::books::update_book))
        .route("/books/:id", delete(api::books::delete_book))
        .route("/books/:id/relation", put(api::relations::update_relation))
        // Authors
        .route("/authors", get(api::authors::list_authors))
        .route("/authors", post(api::authors::create_author))
        .route("/authors/:id", get(api::authors::get_author))
        .route("/authors/:id", put(api::authors::update_author))
        .route("/authors/:id", delete(api::authors::delete_author))
        .route("/authors/:id/books", get(api::authors::get_author_books))
        // Categories
        .route("/categories", get(api::categories::list_categories))
        .route("/categories", post(api::categories::create_category))
        .route("/categories/:id", get(api::categories::get_category))
        .route("/categories/:id", put(api::categories::update_category))
        .route("/categories/:id", delete(api::categories::delete_category))
        .route("/categories/:id/books", get(api::categories::get_category_books))
        // Libraries
        .route("/libraries", get(api::libraries::list_libraries))
        .route("/libraries", post(api::libraries::create_library))
        .route("/libraries/:id", get(api::libraries::get_library))
        .route("/libraries/:id", put(api::libraries::update_library))
        .route("/libraries/:id", delete(api::libraries::delete_library))
        .route("/libraries/:id/books", get(api::libraries::get_library_books))
        // Availability
        .route("/availability", get(api::availability::list_availability))
        .route("/availability", post(api::availability::create_availability))
        .route("/availability/:id", get(api::availability::get_availability))
        .route("/availability/:id", put(api::availability::update_availability))
        .route("/availability/:id", delete(api::availability::delete_availability))
        // Borrow sessions
        .route("/sessions", get(api::sessions::list_my_sessions))
        .route("/sessions", post(api::sessions::create_session))
        .route("/sessions/:id", get(api::sessions::get_my_session))
        .route("/manage/sessions", get(api::sessions::search_sessions))
        .route("/manage/sessions/:id", get(api::sessions::get_session))
        .route("/manage/sessions/:id", put(api::sessions::update_session))
        .route("/manage/sessions/:id", delete(api::sessions::delete_session))
        // Donation offers
        .route("/offers", get(api::offers::list_my_offers))
        .route("/offers", post(api::offers::create_offer))
        .route("/offers/:id", get(api::offers::get_my_offer))
        .route("/manage/offers", get(api::offers::search_offers))
        .route("/manage/offers/:id", get(api::offers::get_offer))
        .route("/manage/offers/:id", put(api::offers::update_offer))
        .route("/manage/offers/:id", delete(api::offers::delete_offer))
        // Bookmarks
        .route("/bookmarks", get(api::relations::list_bookmarks))
        .with_state(state.clone());

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
