use async_trait::async_trait;

use crate::domain::{
    models::{SearchQuery, SearchResult, UserId},
    SearchError,
};

/// Inbound port for the job search use case.
///
/// HTTP handlers hold it as a trait object so tests can swap the backing
/// repositories.
#[async_trait]
pub trait JobSearchService: Send + Sync + 'static {
    /// Runs facet filtering, region resolution and proximity matching, then
    /// annotates bookmarks for `user` (none when anonymous).
    ///
    /// Fails with [`SearchError::RegionNotFound`] when region names were given
    /// but none of them resolve.
    async fn search(
        &self,
        query: &SearchQuery,
        user: Option<&UserId>,
    ) -> Result<Vec<SearchResult>, SearchError>;
}
