mod assembler;
mod proximity;
mod refresh_worker;
mod regions;
mod search;

pub use assembler::ResultAssembler;
pub use proximity::ProximityMatcher;
pub use refresh_worker::run_region_tree_refresh_worker;
pub use regions::{RegionServiceImpl, REGION_TREE_KEY};
pub use search::JobSearchServiceImpl;
