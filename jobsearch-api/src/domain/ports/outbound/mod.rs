mod cache;
mod job_postings;
mod regions;

pub use cache::*;
pub use job_postings::*;
pub use regions::*;
