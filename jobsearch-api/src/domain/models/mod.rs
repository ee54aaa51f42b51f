mod ids;
mod job_posting;
mod query;
mod region;
mod region_tree;

pub use ids::*;
pub use job_posting::*;
pub use query::*;
pub use region::*;
pub use region_tree::*;
