use std::{collections::BTreeSet, sync::Arc};

use tracing::debug;

use crate::domain::{
    filter::PostingFilter, geo::GeoPoint, models::JobPostingId,
    ports::outbound::JobPostingRepository, SearchError,
};

/// Unions "postings near this point" over a set of region centroids.
pub struct ProximityMatcher<P> {
    postings: Arc<P>,
    radius_m: f64,
}

impl<P: JobPostingRepository> ProximityMatcher<P> {
    pub fn new(postings: Arc<P>, radius_m: f64) -> Self {
        Self { postings, radius_m }
    }

    /// Ids of filtered postings within the radius of at least one centroid.
    ///
    /// A posting close to several centroids is reported once; no centroids
    /// means no matches. All centroids go to the repository in one lookup.
    pub async fn match_nearby(
        &self,
        filter: &PostingFilter,
        centroids: &[GeoPoint],
    ) -> Result<BTreeSet<JobPostingId>, SearchError> {
        if centroids.is_empty() {
            return Ok(BTreeSet::new());
        }

        let ids = self
            .postings
            .ids_within(filter, centroids, self.radius_m)
            .await?
            .into_iter()
            .collect::<BTreeSet<_>>();
        debug!(
            centroids = centroids.len(),
            matches = ids.len(),
            radius_m = self.radius_m,
            "Proximity match completed"
        );
        Ok(ids)
    }
}
