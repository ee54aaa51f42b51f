use super::RegionFilter;

/// A validated job search request.
///
/// Every list is a facet: empty means unconstrained, several values are
/// alternatives. Facets combine with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub region: RegionFilter,
    pub work_days: Vec<String>,
    pub posting_types: Vec<String>,
    pub employment_types: Vec<String>,
    pub education: Option<String>,
    pub text: Option<String>,
}

impl SearchQuery {
    /// Whether the caller asked for any geographic constraint at all.
    pub fn has_region_filter(&self) -> bool {
        !self.region.is_empty()
    }
}
