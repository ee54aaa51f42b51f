//! Facet narrowing of the job posting catalog.

use super::models::{JobPosting, SearchQuery};

/// Facet predicate over job postings.
///
/// Building a filter performs no I/O; repositories translate it into their
/// own query language when they run it. `None` means "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostingFilter {
    pub cities: Option<Vec<String>>,
    pub districts: Option<Vec<String>>,
    pub towns: Option<Vec<String>>,
    pub work_days: Option<Vec<String>>,
    pub posting_types: Option<Vec<String>>,
    pub employment_types: Option<Vec<String>>,
    pub education: Option<String>,
    pub text: Option<String>,
}

impl PostingFilter {
    pub fn from_query(query: &SearchQuery) -> Self {
        Self {
            cities: non_empty(&query.region.cities),
            districts: non_empty(&query.region.districts),
            towns: non_empty(&query.region.towns),
            work_days: non_empty(&query.work_days),
            posting_types: non_empty(&query.posting_types),
            employment_types: non_empty(&query.employment_types),
            education: query.education.clone().filter(|value| !value.is_empty()),
            text: query.text.clone().filter(|value| !value.is_empty()),
        }
    }

    /// Evaluates the filter against a loaded posting.
    pub fn matches(&self, posting: &JobPosting) -> bool {
        is_member(&self.cities, &posting.city)
            && is_member(&self.districts, &posting.district)
            && is_member(&self.towns, &posting.town)
            && self.work_days.as_ref().map_or(true, |days| {
                posting.work_days.iter().any(|day| days.contains(day))
            })
            && is_member(&self.posting_types, &posting.posting_type)
            && is_member(&self.employment_types, &posting.employment_type)
            && self
                .education
                .as_ref()
                .map_or(true, |education| *education == posting.education)
            && self.text.as_ref().map_or(true, |text| {
                let needle = text.to_lowercase();
                [&posting.title, &posting.summary, &posting.company_name]
                    .iter()
                    .any(|haystack| haystack.to_lowercase().contains(&needle))
            })
    }
}

fn non_empty(values: &[String]) -> Option<Vec<String>> {
    (!values.is_empty()).then(|| values.to_vec())
}

fn is_member(allowed: &Option<Vec<String>>, value: &str) -> bool {
    allowed
        .as_ref()
        .map_or(true, |allowed| allowed.iter().any(|candidate| candidate == value))
}
