use async_trait::async_trait;

use crate::domain::{
    models::{NewRegion, RegionTree, RegionTreeStats},
    SearchError,
};

/// Inbound port for the region hierarchy and region dataset maintenance.
#[async_trait]
pub trait RegionService: Send + Sync + 'static {
    /// The cached hierarchy; empty when nothing has been built yet.
    async fn get_tree(&self) -> Result<RegionTree, SearchError>;

    /// Recomputes the hierarchy from the region table and overwrites the cache.
    async fn rebuild_tree(&self) -> Result<RegionTreeStats, SearchError>;

    /// Replaces the region dataset wholesale, then rebuilds the hierarchy.
    async fn import_regions(&self, regions: Vec<NewRegion>) -> Result<RegionTreeStats, SearchError>;
}
