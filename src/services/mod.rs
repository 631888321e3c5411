//! Business logic services

pub mod auth;
pub mod catalog;
pub mod offers;
pub mod relations;
pub mod review;
pub mod sessions;

use std::sync::Arc;

use crate::{clock::Clock, config::AuthConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub catalog: catalog::CatalogService,
    pub sessions: sessions::SessionsService,
    pub offers: offers::OffersService,
    pub relations: relations::RelationsService,
}

impl Services {
    /// Create all services with the given repository and clock
    pub fn new(repository: Repository, auth_config: AuthConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            auth: auth::AuthService::new(repository.clone(), auth_config),
            catalog: catalog::CatalogService::new(repository.clone()),
            sessions: sessions::SessionsService::new(repository.clone(), clock),
            offers: offers::OffersService::new(repository.clone()),
            relations: relations::RelationsService::new(repository),
        }
    }
}
