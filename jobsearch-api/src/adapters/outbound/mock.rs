//! In-memory adapters for tests.

use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::domain::{
    filter::PostingFilter,
    geo::GeoPoint,
    models::{
        JobPosting, JobPostingId, NewRegion, RegionFilter, RegionName, ResolvedRegion, UserId,
    },
    ports::outbound::{BookmarkRepository, JobPostingRepository, RegionRepository},
    SearchError,
};

/// Region table backed by a `BTreeMap` keyed by town number, computing
/// centroids with the crate's own geometry.
#[derive(Clone, Default)]
pub struct MockRegionRepository {
    regions: Arc<RwLock<BTreeMap<String, NewRegion>>>,
    fail: Arc<RwLock<bool>>,
}

#[allow(dead_code)]
impl MockRegionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_regions(self, regions: Vec<NewRegion>) -> Self {
        {
            let mut stored = self.regions.write().unwrap();
            for region in regions {
                stored.insert(region.town_no.to_string(), region);
            }
        }
        self
    }

    /// Makes every call fail as if the database were unreachable.
    pub fn failing(self) -> Self {
        *self.fail.write().unwrap() = true;
        self
    }

    pub fn len(&self) -> usize {
        self.regions.read().unwrap().len()
    }

    fn check_available(&self) -> Result<(), SearchError> {
        if *self.fail.read().unwrap() {
            return Err(SearchError::Storage("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl RegionRepository for MockRegionRepository {
    async fn resolve(&self, filter: &RegionFilter) -> Result<Vec<ResolvedRegion>, SearchError> {
        self.check_available()?;
        let regions = self.regions.read().unwrap();
        Ok(regions
            .values()
            .filter(|region| filter.matches(&region.name()))
            .map(|region| ResolvedRegion {
                id: region.town_no.clone(),
                centroid: region.boundary.centroid(),
            })
            .collect())
    }

    async fn region_names(&self) -> Result<Vec<RegionName>, SearchError> {
        self.check_available()?;
        let regions = self.regions.read().unwrap();
        Ok(regions.values().map(NewRegion::name).collect())
    }

    async fn replace_all(&self, regions: &[NewRegion]) -> Result<usize, SearchError> {
        self.check_available()?;
        let mut stored = self.regions.write().unwrap();
        stored.clear();
        for region in regions {
            stored.insert(region.town_no.to_string(), region.clone());
        }
        Ok(stored.len())
    }
}

/// Posting catalog held in a `Vec`, filtered with [`PostingFilter::matches`]
/// and great-circle distance.
#[derive(Clone, Default)]
pub struct MockJobPostingRepository {
    postings: Arc<RwLock<Vec<JobPosting>>>,
    proximity_calls: Arc<RwLock<usize>>,
}

#[allow(dead_code)]
impl MockJobPostingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_postings(self, postings: Vec<JobPosting>) -> Self {
        self.postings.write().unwrap().extend(postings);
        self
    }

    /// Number of `ids_within` calls made so far.
    pub fn proximity_calls(&self) -> usize {
        *self.proximity_calls.read().unwrap()
    }
}

#[async_trait]
impl JobPostingRepository for MockJobPostingRepository {
    async fn ids_within(
        &self,
        filter: &PostingFilter,
        centers: &[GeoPoint],
        radius_m: f64,
    ) -> Result<Vec<JobPostingId>, SearchError> {
        *self.proximity_calls.write().unwrap() += 1;
        let postings = self.postings.read().unwrap();
        Ok(postings
            .iter()
            .filter(|posting| filter.matches(posting))
            .filter(|posting| {
                centers
                    .iter()
                    .any(|center| posting.location.within_distance(center, radius_m))
            })
            .map(|posting| posting.id)
            .collect())
    }

    async fn ids_matching(&self, filter: &PostingFilter) -> Result<Vec<JobPostingId>, SearchError> {
        let postings = self.postings.read().unwrap();
        Ok(postings
            .iter()
            .filter(|posting| filter.matches(posting))
            .map(|posting| posting.id)
            .collect())
    }

    async fn find_by_ids(&self, ids: &[JobPostingId]) -> Result<Vec<JobPosting>, SearchError> {
        let postings = self.postings.read().unwrap();
        Ok(postings
            .iter()
            .filter(|posting| ids.contains(&posting.id))
            .cloned()
            .collect())
    }
}

#[derive(Clone, Default)]
pub struct MockBookmarkRepository {
    bookmarks: Arc<RwLock<HashSet<(UserId, JobPostingId)>>>,
}

#[allow(dead_code)]
impl MockBookmarkRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bookmark(self, user: UserId, posting: JobPostingId) -> Self {
        self.bookmarks.write().unwrap().insert((user, posting));
        self
    }

    pub fn remove(&self, user: UserId, posting: JobPostingId) {
        self.bookmarks.write().unwrap().remove(&(user, posting));
    }
}

#[async_trait]
impl BookmarkRepository for MockBookmarkRepository {
    async fn bookmarked_among(
        &self,
        user: &UserId,
        ids: &[JobPostingId],
    ) -> Result<HashSet<JobPostingId>, SearchError> {
        let bookmarks = self.bookmarks.read().unwrap();
        Ok(ids
            .iter()
            .filter(|id| bookmarks.contains(&(*user, **id)))
            .copied()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{point, region_around};

    #[tokio::test]
    async fn unconstrained_resolve_returns_every_region() {
        let regions = MockRegionRepository::new().with_regions(vec![
            region_around("1", ("서울특별시", "강남구", "역삼동"), point(127.03, 37.50)),
            region_around("2", ("인천광역시", "부평구", "부평동"), point(126.72, 37.49)),
        ]);

        let resolved = regions.resolve(&RegionFilter::default()).await.unwrap();
        assert_eq!(resolved.len(), 2);
    }
}
