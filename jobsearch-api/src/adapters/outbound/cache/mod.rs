use std::time::Duration;

use async_trait::async_trait;
use moka::sync::Cache;

use crate::domain::{ports::outbound::KeyValueCache, SearchError};

/// In-process key-value cache backed by moka.
///
/// Without a TTL entries live until overwritten or evicted by capacity.
#[derive(Clone)]
pub struct MokaCache {
    entries: Cache<String, String>,
}

impl MokaCache {
    pub fn new(max_capacity: u64, time_to_live: Option<Duration>) -> Self {
        let builder = Cache::builder().max_capacity(max_capacity);
        let entries = match time_to_live {
            Some(ttl) => builder.time_to_live(ttl).build(),
            None => builder.build(),
        };
        Self { entries }
    }
}

impl Default for MokaCache {
    fn default() -> Self {
        Self::new(64, None)
    }
}

#[async_trait]
impl KeyValueCache for MokaCache {
    async fn get(&self, key: &str) -> Result<Option<String>, SearchError> {
        Ok(self.entries.get(key))
    }

    async fn set(&self, key: &str, value: String) -> Result<(), SearchError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_key_is_none() {
        let cache = MokaCache::default();
        assert_eq!(cache.get("region_tree").await.unwrap(), None);
    }

    #[tokio::test]
    async fn set_overwrites_previous_value() {
        let cache = MokaCache::default();
        cache.set("k", "first".to_string()).await.unwrap();
        cache.set("k", "second".to_string()).await.unwrap();
        assert_eq!(cache.get("k").await.unwrap().as_deref(), Some("second"));
    }
}
