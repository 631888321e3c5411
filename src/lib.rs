//! Biblion Community Library Server
//!
//! A Rust implementation of the Biblion community lending platform,
//! providing a REST JSON API for browsing a shared catalog, borrowing
//! books from partner libraries and offering donations.

use std::sync::Arc;

pub mod api;
pub mod clock;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
