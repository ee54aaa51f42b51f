use async_trait::async_trait;

use crate::domain::SearchError;

/// A string key-value store for precomputed, rebuildable data.
#[async_trait]
pub trait KeyValueCache: Send + Sync + 'static {
    async fn get(&self, key: &str) -> Result<Option<String>, SearchError>;

    /// Stores `value`, replacing anything previously held under `key`.
    async fn set(&self, key: &str, value: String) -> Result<(), SearchError>;
}
