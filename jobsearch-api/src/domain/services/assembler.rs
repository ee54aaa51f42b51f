use std::{collections::BTreeSet, sync::Arc};

use crate::domain::{
    models::{JobPostingId, SearchResult, UserId},
    ports::outbound::{BookmarkRepository, JobPostingRepository},
    SearchError,
};

/// Loads matched postings and annotates them with the caller's bookmarks.
///
/// Results are ordered by deadline, soonest first, then by posting id.
pub struct ResultAssembler<P, B> {
    postings: Arc<P>,
    bookmarks: Arc<B>,
}

impl<P, B> ResultAssembler<P, B>
where
    P: JobPostingRepository,
    B: BookmarkRepository,
{
    pub fn new(postings: Arc<P>, bookmarks: Arc<B>) -> Self {
        Self {
            postings,
            bookmarks,
        }
    }

    pub async fn assemble(
        &self,
        ids: &BTreeSet<JobPostingId>,
        user: Option<&UserId>,
    ) -> Result<Vec<SearchResult>, SearchError> {
        if ids.is_empty() {
            return Ok(vec![]);
        }

        let ids = ids.iter().copied().collect::<Vec<_>>();
        let postings = self.postings.find_by_ids(&ids).await?;

        let bookmarked = match user {
            Some(user) => self.bookmarks.bookmarked_among(user, &ids).await?,
            None => Default::default(),
        };

        let mut results = postings
            .into_iter()
            .map(|posting| {
                let is_bookmarked = bookmarked.contains(&posting.id);
                SearchResult::from_posting(posting, is_bookmarked)
            })
            .collect::<Vec<_>>();

        results.sort_by(|a, b| {
            a.deadline
                .cmp(&b.deadline)
                .then_with(|| a.job_posting_id.cmp(&b.job_posting_id))
        });

        Ok(results)
    }
}
