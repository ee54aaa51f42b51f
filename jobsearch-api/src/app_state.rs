use std::sync::Arc;

use axum::extract::FromRef;

use crate::{
    auth::AuthConfig,
    domain::ports::inbound::{JobSearchService, RegionService},
};

#[derive(Clone)]
pub struct AppState {
    search_service: Arc<dyn JobSearchService>,
    region_service: Arc<dyn RegionService>,
    auth: AuthConfig,
}

impl AppState {
    pub fn new(
        search_service: Arc<dyn JobSearchService>,
        region_service: Arc<dyn RegionService>,
        auth: AuthConfig,
    ) -> Self {
        Self {
            search_service,
            region_service,
            auth,
        }
    }

    pub fn search_service(&self) -> Arc<dyn JobSearchService> {
        Arc::clone(&self.search_service)
    }

    pub fn region_service(&self) -> Arc<dyn RegionService> {
        Arc::clone(&self.region_service)
    }
}

impl FromRef<AppState> for AuthConfig {
    fn from_ref(state: &AppState) -> Self {
        state.auth.clone()
    }
}
