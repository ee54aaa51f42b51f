use async_trait::async_trait;

use crate::domain::{
    models::{NewRegion, RegionFilter, RegionName, ResolvedRegion},
    SearchError,
};

/// Read and bulk-replace access to the administrative region table.
///
/// Implementations own the geometry operators: `resolve` returns each
/// region's centroid in WGS84.
#[async_trait]
pub trait RegionRepository: Send + Sync + 'static {
    /// Regions whose city, district and town are each allowed by `filter`.
    async fn resolve(&self, filter: &RegionFilter) -> Result<Vec<ResolvedRegion>, SearchError>;

    /// All distinct (city, district, town) triples.
    async fn region_names(&self) -> Result<Vec<RegionName>, SearchError>;

    /// Purges every region and stores `regions` in their place, atomically.
    ///
    /// Returns the number of rows written.
    async fn replace_all(&self, regions: &[NewRegion]) -> Result<usize, SearchError>;
}
