//! Geospatial job search.
//!
//! A search narrows the posting catalog by facets, resolves the requested
//! city/district/town names to region centroids, keeps postings within a
//! fixed radius of any centroid and annotates the caller's bookmarks.
//!
//! # Architecture
//!
//! - [`ports::inbound`] - use cases called by HTTP handlers
//! - [`ports::outbound`] - region table, posting catalog, bookmarks, cache
//! - [`services`] - the use-case implementations
//!
//! Concrete adapters are wired together in [`crate::factory`].

mod error;

pub mod filter;
pub mod geo;
pub mod models;
pub mod ports;
pub mod services;

pub use error::SearchError;
