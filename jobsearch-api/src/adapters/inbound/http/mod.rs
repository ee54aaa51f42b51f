mod query;
mod regions;
mod responses;

pub use query::{FieldError, SearchParams};
pub use regions::{RegionImportRequest, RegionRecord};
pub use responses::*;
