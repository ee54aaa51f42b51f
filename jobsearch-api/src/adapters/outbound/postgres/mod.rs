mod job_postings;
mod regions;

pub use job_postings::{PostgresBookmarkRepository, PostgresJobPostingRepository};
pub use regions::PostgresRegionRepository;

/// Binds an empty list as SQL `NULL` so `$n::text[] IS NULL` disables the filter.
fn non_empty(values: &[String]) -> Option<&[String]> {
    (!values.is_empty()).then_some(values)
}
