use thiserror::Error;

/// Errors that can occur while searching postings or maintaining regions.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("no region matches the requested city, district and town")]
    RegionNotFound,
    #[error("invalid region dataset: {0}")]
    InvalidRegion(String),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("cache error: {0}")]
    Cache(String),
}

impl SearchError {
    pub fn invalid_region(msg: impl Into<String>) -> Self {
        Self::InvalidRegion(msg.into())
    }
}

impl From<sqlx::Error> for SearchError {
    fn from(e: sqlx::Error) -> Self {
        SearchError::Storage(e.to_string())
    }
}
