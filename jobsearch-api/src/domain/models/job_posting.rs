use time::OffsetDateTime;

use crate::domain::geo::GeoPoint;

use super::JobPostingId;

/// The searchable projection of a job posting. Postings are owned by the
/// posting management service; this crate only reads them.
#[derive(Debug, Clone, PartialEq)]
pub struct JobPosting {
    pub id: JobPostingId,
    pub title: String,
    pub location: GeoPoint,
    pub city: String,
    pub district: String,
    pub town: String,
    pub work_days: Vec<String>,
    pub posting_type: String,
    pub employment_type: String,
    pub education: String,
    pub summary: String,
    pub company_name: String,
    pub deadline: OffsetDateTime,
}

/// One row of a search response.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub job_posting_id: JobPostingId,
    pub title: String,
    pub city: String,
    pub district: String,
    pub is_bookmarked: bool,
    pub deadline: OffsetDateTime,
}

impl SearchResult {
    pub fn from_posting(posting: JobPosting, is_bookmarked: bool) -> Self {
        Self {
            job_posting_id: posting.id,
            title: posting.title,
            city: posting.city,
            district: posting.district,
            is_bookmarked,
            deadline: posting.deadline,
        }
    }
}
