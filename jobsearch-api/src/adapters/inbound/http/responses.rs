//! HTTP response types for search endpoints.
//!
//! Keys are snake_case, matching what the job board frontend already reads.

use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::models::{RegionTreeStats, SearchResult};

/// Body of `GET /search`. `error` is only present on a 404.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub results: Vec<SearchResultResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SearchResponse {
    pub fn found(results: Vec<SearchResult>) -> Self {
        Self {
            results: results.into_iter().map(SearchResultResponse::from).collect(),
            error: None,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            results: Vec::new(),
            error: Some(message.into()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SearchResultResponse {
    pub job_posting_id: Uuid,
    pub job_posting_title: String,
    pub city: String,
    pub district: String,
    pub is_bookmarked: bool,
    /// Application deadline (RFC 3339).
    #[serde(with = "time::serde::rfc3339")]
    pub deadline: OffsetDateTime,
}

impl From<SearchResult> for SearchResultResponse {
    fn from(result: SearchResult) -> Self {
        Self {
            job_posting_id: result.job_posting_id.as_uuid(),
            job_posting_title: result.title,
            city: result.city,
            district: result.district,
            is_bookmarked: result.is_bookmarked,
            deadline: result.deadline,
        }
    }
}

/// Returned by the admin endpoints after the hierarchy was rebuilt.
#[derive(Debug, Serialize)]
pub struct RegionTreeRebuildResponse {
    pub cities: usize,
    pub districts: usize,
    pub towns: usize,
}

impl From<RegionTreeStats> for RegionTreeRebuildResponse {
    fn from(stats: RegionTreeStats) -> Self {
        Self {
            cities: stats.cities,
            districts: stats.districts,
            towns: stats.towns,
        }
    }
}
