pub(crate) mod admin;
pub(crate) mod error;
pub(crate) mod search;

pub(crate) use error::ApiError;
