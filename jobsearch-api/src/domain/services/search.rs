use std::{collections::BTreeSet, sync::Arc};

use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::domain::{
    filter::PostingFilter,
    models::{SearchQuery, SearchResult, UserId},
    ports::{
        inbound::JobSearchService,
        outbound::{BookmarkRepository, JobPostingRepository, RegionRepository},
    },
    SearchError,
};

use super::{ProximityMatcher, ResultAssembler};

/// Implementation of the [`JobSearchService`] inbound port.
///
/// Pipeline: facet filter → region resolution → proximity union → bookmark
/// annotation. When the query names no region at all the geographic step is
/// skipped and every facet match is returned.
pub struct JobSearchServiceImpl<R, P, B> {
    regions: Arc<R>,
    postings: Arc<P>,
    matcher: ProximityMatcher<P>,
    assembler: ResultAssembler<P, B>,
}

impl<R, P, B> JobSearchServiceImpl<R, P, B>
where
    R: RegionRepository,
    P: JobPostingRepository,
    B: BookmarkRepository,
{
    pub fn new(regions: Arc<R>, postings: Arc<P>, bookmarks: Arc<B>, radius_m: f64) -> Self {
        Self {
            regions,
            matcher: ProximityMatcher::new(Arc::clone(&postings), radius_m),
            assembler: ResultAssembler::new(Arc::clone(&postings), bookmarks),
            postings,
        }
    }
}

#[async_trait]
impl<R, P, B> JobSearchService for JobSearchServiceImpl<R, P, B>
where
    R: RegionRepository,
    P: JobPostingRepository,
    B: BookmarkRepository,
{
    #[instrument(name = "JobSearchService::search", skip(self))]
    async fn search(
        &self,
        query: &SearchQuery,
        user: Option<&UserId>,
    ) -> Result<Vec<SearchResult>, SearchError> {
        let filter = PostingFilter::from_query(query);

        let ids = if query.has_region_filter() {
            let regions = self.regions.resolve(&query.region).await?;
            if regions.is_empty() {
                debug!("No region matched the requested names");
                return Err(SearchError::RegionNotFound);
            }

            debug!(
                regions = ?regions.iter().map(|region| region.id.as_str()).collect::<Vec<_>>(),
                "Resolved regions"
            );

            let centroids = regions
                .iter()
                .map(|region| region.centroid)
                .collect::<Vec<_>>();
            self.matcher.match_nearby(&filter, &centroids).await?
        } else {
            self.postings
                .ids_matching(&filter)
                .await?
                .into_iter()
                .collect::<BTreeSet<_>>()
        };

        let results = self.assembler.assemble(&ids, user).await?;
        debug!(results = results.len(), "Search completed");
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;
    use crate::adapters::outbound::mock::{
        MockBookmarkRepository, MockJobPostingRepository, MockRegionRepository,
    };
    use crate::domain::models::RegionFilter;
    use crate::test_support::{point, posting_at, region_around};

    type Service =
        JobSearchServiceImpl<MockRegionRepository, MockJobPostingRepository, MockBookmarkRepository>;

    fn service(
        regions: MockRegionRepository,
        postings: MockJobPostingRepository,
        bookmarks: MockBookmarkRepository,
    ) -> Service {
        JobSearchServiceImpl::new(
            Arc::new(regions),
            Arc::new(postings),
            Arc::new(bookmarks),
            3_000.0,
        )
    }

    fn yeoksam_query(posting_type: &str) -> SearchQuery {
        SearchQuery {
            region: RegionFilter {
                cities: vec!["서울특별시".into()],
                districts: vec!["강남구".into()],
                towns: vec!["역삼동".into()],
            },
            posting_types: vec![posting_type.into()],
            ..Default::default()
        }
    }

    fn yeoksam_fixture() -> (MockRegionRepository, MockJobPostingRepository, Uuid) {
        let regions = MockRegionRepository::new().with_regions(vec![region_around(
            "1168064000",
            ("서울특별시", "강남구", "역삼동"),
            point(127.03, 37.50),
        )]);

        let mut posting = posting_at("바리스타 모집", point(127.036, 37.503));
        posting.city = "서울특별시".into();
        posting.district = "강남구".into();
        posting.town = "역삼동".into();
        posting.posting_type = "정규직".into();
        let id = posting.id.as_uuid();

        let postings = MockJobPostingRepository::new().with_postings(vec![posting]);
        (regions, postings, id)
    }

    #[tokio::test]
    async fn finds_posting_near_resolved_region() {
        let (regions, postings, id) = yeoksam_fixture();
        let service = service(regions, postings, MockBookmarkRepository::new());

        let results = service.search(&yeoksam_query("정규직"), None).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].job_posting_id.as_uuid(), id);
    }

    #[tokio::test]
    async fn non_matching_facet_yields_empty_success() {
        let (regions, postings, _) = yeoksam_fixture();
        let service = service(regions, postings, MockBookmarkRepository::new());

        let results = service.search(&yeoksam_query("계약직"), None).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn unresolvable_region_is_reported() {
        let (regions, postings, _) = yeoksam_fixture();
        let service = service(regions, postings, MockBookmarkRepository::new());

        let query = SearchQuery {
            region: RegionFilter {
                cities: vec!["부산광역시".into()],
                ..Default::default()
            },
            ..Default::default()
        };
        let err = service.search(&query, None).await.unwrap_err();
        assert!(matches!(err, SearchError::RegionNotFound));
    }

    #[tokio::test]
    async fn query_without_regions_ignores_geography() {
        let (regions, postings, _) = yeoksam_fixture();
        let mut far_away = posting_at("부산 물류센터", point(129.07, 35.17));
        far_away.posting_type = "정규직".into();
        let postings = postings.with_postings(vec![far_away]);
        let service = service(regions, postings.clone(), MockBookmarkRepository::new());

        let query = SearchQuery {
            posting_types: vec!["정규직".into()],
            ..Default::default()
        };
        let results = service.search(&query, None).await.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(postings.proximity_calls(), 0);
    }

    #[tokio::test]
    async fn marks_bookmarked_results() {
        let (regions, postings, id) = yeoksam_fixture();
        let user = UserId::new(Uuid::from_u128(42));
        let bookmarks = MockBookmarkRepository::new().with_bookmark(user, id.into());
        let service = service(regions, postings, bookmarks);

        let results = service
            .search(&yeoksam_query("정규직"), Some(&user))
            .await
            .unwrap();
        assert!(results[0].is_bookmarked);
    }

    #[tokio::test]
    async fn storage_failure_propagates() {
        let (regions, postings, _) = yeoksam_fixture();
        let service = service(regions.failing(), postings, MockBookmarkRepository::new());

        let err = service.search(&yeoksam_query("정규직"), None).await.unwrap_err();
        assert!(matches!(err, SearchError::Storage(_)));
    }
}
