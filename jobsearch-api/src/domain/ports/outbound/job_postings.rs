use std::collections::HashSet;

use async_trait::async_trait;

use crate::domain::{
    filter::PostingFilter,
    geo::GeoPoint,
    models::{JobPosting, JobPostingId, UserId},
    SearchError,
};

/// Read access to the job posting catalog.
#[async_trait]
pub trait JobPostingRepository: Send + Sync + 'static {
    /// Ids of postings passing `filter` whose location lies within
    /// `radius_m` metres of at least one of `centers`, each id once.
    ///
    /// Runs as a single lookup however many centers are given.
    async fn ids_within(
        &self,
        filter: &PostingFilter,
        centers: &[GeoPoint],
        radius_m: f64,
    ) -> Result<Vec<JobPostingId>, SearchError>;

    /// Ids of postings passing `filter`, regardless of location.
    async fn ids_matching(&self, filter: &PostingFilter) -> Result<Vec<JobPostingId>, SearchError>;

    /// Loads the postings with the given ids. Unknown ids are skipped.
    async fn find_by_ids(&self, ids: &[JobPostingId]) -> Result<Vec<JobPosting>, SearchError>;
}

/// Read access to the user ↔ posting bookmark relation.
#[async_trait]
pub trait BookmarkRepository: Send + Sync + 'static {
    /// The subset of `ids` that `user` has bookmarked.
    async fn bookmarked_among(
        &self,
        user: &UserId,
        ids: &[JobPostingId],
    ) -> Result<HashSet<JobPostingId>, SearchError>;
}
