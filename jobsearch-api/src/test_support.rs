//! Fixtures shared by unit and router tests.

use std::sync::Arc;

use axum::Router;
use jsonwebtoken::{encode, EncodingKey, Header};
use time::{macros::datetime, Duration, OffsetDateTime};
use uuid::Uuid;

use crate::{
    adapters::outbound::{
        cache::MokaCache,
        mock::{MockBookmarkRepository, MockJobPostingRepository, MockRegionRepository},
    },
    app_state::AppState,
    auth::{AccountType, AuthConfig, Claims, JwtVerifier},
    config::ApplicationSettings,
    domain::{
        geo::{GeoPoint, MultiPolygon, Polygon},
        models::{JobPosting, JobPostingId, NewRegion, RegionId},
        services::{JobSearchServiceImpl, RegionServiceImpl},
    },
    router,
};

pub const TEST_SECRET: &str = "test-secret";
pub const TEST_RADIUS_M: f64 = 3_000.0;

pub fn point(lon: f64, lat: f64) -> GeoPoint {
    GeoPoint::new(lon, lat).unwrap()
}

pub fn posting_at(title: &str, location: GeoPoint) -> JobPosting {
    JobPosting {
        id: JobPostingId::new(Uuid::new_v4()),
        title: title.to_string(),
        location,
        city: "서울특별시".to_string(),
        district: "강남구".to_string(),
        town: "역삼동".to_string(),
        work_days: vec!["월".to_string(), "화".to_string()],
        posting_type: "정규직".to_string(),
        employment_type: "상시".to_string(),
        education: "무관".to_string(),
        summary: String::new(),
        company_name: "한빛상사".to_string(),
        deadline: datetime!(2026-12-31 09:00 UTC),
    }
}

/// A region whose boundary is a small square centred on `center`.
pub fn region_around(town_no: &str, (city, district, town): (&str, &str, &str), center: GeoPoint) -> NewRegion {
    let d = 0.005;
    let ring = [
        [center.lon - d, center.lat - d],
        [center.lon + d, center.lat - d],
        [center.lon + d, center.lat + d],
        [center.lon - d, center.lat + d],
        [center.lon - d, center.lat - d],
    ];
    let boundary = MultiPolygon::new(vec![Polygon::from_positions(&ring).unwrap()]).unwrap();

    NewRegion {
        city_no: town_no.chars().take(2).collect(),
        city_name: city.to_string(),
        district_no: town_no.chars().take(5).collect(),
        district_name: district.to_string(),
        town_no: RegionId::new(town_no),
        town_name: town.to_string(),
        boundary,
    }
}

pub fn token_for(user: Uuid, account_type: AccountType, secret: &str) -> String {
    let claims = Claims {
        sub: user,
        join_type: account_type,
        exp: (OffsetDateTime::now_utc() + Duration::hours(1)).unix_timestamp() as usize,
    };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes())).unwrap()
}

pub fn bearer(user: Uuid, account_type: AccountType) -> String {
    format!("Bearer {}", token_for(user, account_type, TEST_SECRET))
}

/// The full HTTP stack over in-memory repositories.
pub struct TestApp {
    pub regions: MockRegionRepository,
    pub postings: MockJobPostingRepository,
    pub bookmarks: MockBookmarkRepository,
    pub disable_auth: bool,
}

impl TestApp {
    pub fn new() -> Self {
        Self {
            regions: MockRegionRepository::new(),
            postings: MockJobPostingRepository::new(),
            bookmarks: MockBookmarkRepository::new(),
            disable_auth: false,
        }
    }

    pub fn router(&self) -> Router {
        let regions = Arc::new(self.regions.clone());
        let search_service = JobSearchServiceImpl::new(
            Arc::clone(&regions),
            Arc::new(self.postings.clone()),
            Arc::new(self.bookmarks.clone()),
            TEST_RADIUS_M,
        );
        let region_service = RegionServiceImpl::new(regions, Arc::new(MokaCache::default()));

        let state = AppState::new(
            Arc::new(search_service),
            Arc::new(region_service),
            AuthConfig {
                verifier: Arc::new(JwtVerifier::new(TEST_SECRET)),
                disabled: self.disable_auth,
            },
        );

        router::create(state, &self.settings())
    }

    fn settings(&self) -> ApplicationSettings {
        ApplicationSettings {
            port: 0,
            host: "127.0.0.1".to_string(),
            app_url: "http://localhost:5173".to_string(),
            disable_auth: self.disable_auth,
            request_timeout_secs: 5,
            rebuild_region_tree_on_startup: false,
        }
    }
}
