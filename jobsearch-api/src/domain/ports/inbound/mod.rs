mod regions;
mod search;

pub use regions::*;
pub use search::*;
