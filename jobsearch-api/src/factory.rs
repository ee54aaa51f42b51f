//! Composition root: the only place that names concrete outbound adapters.

use std::sync::Arc;

use sqlx::PgPool;

use crate::{
    adapters::outbound::{
        cache::MokaCache,
        postgres::{PostgresBookmarkRepository, PostgresJobPostingRepository, PostgresRegionRepository},
    },
    app_state::AppState,
    auth::{AuthConfig, JwtVerifier},
    config::Settings,
    domain::services::{JobSearchServiceImpl, RegionServiceImpl},
};

/// Wires the Postgres repositories and the region tree cache into the
/// search and region services.
pub fn build_app_state(pool: PgPool, settings: &Settings) -> AppState {
    let regions = Arc::new(PostgresRegionRepository::new(pool.clone()));
    let postings = Arc::new(PostgresJobPostingRepository::new(pool.clone()));
    let bookmarks = Arc::new(PostgresBookmarkRepository::new(pool));

    let cache = Arc::new(MokaCache::new(
        settings.cache.max_capacity,
        settings.cache.region_tree_ttl(),
    ));

    let search_service = JobSearchServiceImpl::new(
        Arc::clone(&regions),
        postings,
        bookmarks,
        settings.search.radius_meters(),
    );
    let region_service = RegionServiceImpl::new(regions, cache);

    AppState::new(
        Arc::new(search_service),
        Arc::new(region_service),
        AuthConfig {
            verifier: Arc::new(JwtVerifier::new(&settings.auth.jwt_secret)),
            disabled: settings.application.disable_auth,
        },
    )
}
