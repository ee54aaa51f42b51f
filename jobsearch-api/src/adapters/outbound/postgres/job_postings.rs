use std::collections::HashSet;

use async_trait::async_trait;
use sqlx::{postgres::PgArguments, query::QueryAs, PgPool, Postgres};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::{
    filter::PostingFilter,
    geo::GeoPoint,
    models::{JobPosting, JobPostingId, UserId},
    ports::outbound::{BookmarkRepository, JobPostingRepository},
    SearchError,
};

/// Facet predicate shared by the id queries. Binds `$1`..`$8`, see
/// [`bind_filter`].
const FILTER_CLAUSE: &str = r#"
    ($1::text[] IS NULL OR jp.city = ANY($1))
    AND ($2::text[] IS NULL OR jp.district = ANY($2))
    AND ($3::text[] IS NULL OR jp.town = ANY($3))
    AND ($4::text[] IS NULL OR jp.work_day && $4)
    AND ($5::text[] IS NULL OR jp.posting_type = ANY($5))
    AND ($6::text[] IS NULL OR jp.employment_type = ANY($6))
    AND ($7::text IS NULL OR jp.education = $7)
    AND (
        $8::text IS NULL
        OR strpos(lower(jp.job_posting_title), lower($8)) > 0
        OR strpos(lower(jp.summary), lower($8)) > 0
        OR strpos(lower(ci.company_name), lower($8)) > 0
    )
"#;

fn bind_filter<'q, O>(
    query: QueryAs<'q, Postgres, O, PgArguments>,
    filter: &'q PostingFilter,
) -> QueryAs<'q, Postgres, O, PgArguments> {
    query
        .bind(filter.cities.as_deref())
        .bind(filter.districts.as_deref())
        .bind(filter.towns.as_deref())
        .bind(filter.work_days.as_deref())
        .bind(filter.posting_types.as_deref())
        .bind(filter.employment_types.as_deref())
        .bind(filter.education.as_deref())
        .bind(filter.text.as_deref())
}

/// Job posting catalog in PostGIS. Locations are `geometry(Point, 4326)`;
/// distances are measured on the geography type, in metres.
pub struct PostgresJobPostingRepository {
    pool: PgPool,
}

impl PostgresJobPostingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobPostingRepository for PostgresJobPostingRepository {
    async fn ids_within(
        &self,
        filter: &PostingFilter,
        centers: &[GeoPoint],
        radius_m: f64,
    ) -> Result<Vec<JobPostingId>, SearchError> {
        let sql = format!(
            r#"
            SELECT jp.job_posting_id
            FROM job_postings jp
            JOIN company_info ci ON ci.company_id = jp.company_id
            WHERE {FILTER_CLAUSE}
              AND EXISTS (
                  SELECT 1
                  FROM unnest($9::float8[], $10::float8[]) AS c(lon, lat)
                  WHERE ST_DWithin(
                      jp.location::geography,
                      ST_SetSRID(ST_MakePoint(c.lon, c.lat), 4326)::geography,
                      $11
                  )
              )
            "#
        );

        let lons = centers.iter().map(|center| center.lon).collect::<Vec<_>>();
        let lats = centers.iter().map(|center| center.lat).collect::<Vec<_>>();

        let ids = bind_filter(sqlx::query_as::<_, (Uuid,)>(&sql), filter)
            .bind(&lons)
            .bind(&lats)
            .bind(radius_m)
            .fetch_all(&self.pool)
            .await?;

        Ok(ids.into_iter().map(|(id,)| JobPostingId::new(id)).collect())
    }

    async fn ids_matching(&self, filter: &PostingFilter) -> Result<Vec<JobPostingId>, SearchError> {
        let sql = format!(
            r#"
            SELECT jp.job_posting_id
            FROM job_postings jp
            JOIN company_info ci ON ci.company_id = jp.company_id
            WHERE {FILTER_CLAUSE}
            "#
        );

        let ids = bind_filter(sqlx::query_as::<_, (Uuid,)>(&sql), filter)
            .fetch_all(&self.pool)
            .await?;

        Ok(ids.into_iter().map(|(id,)| JobPostingId::new(id)).collect())
    }

    async fn find_by_ids(&self, ids: &[JobPostingId]) -> Result<Vec<JobPosting>, SearchError> {
        let ids = ids.iter().map(JobPostingId::as_uuid).collect::<Vec<_>>();

        let rows = sqlx::query_as::<_, JobPostingRow>(
            r#"
            SELECT
                jp.job_posting_id,
                jp.job_posting_title,
                ST_X(jp.location) AS lon,
                ST_Y(jp.location) AS lat,
                jp.city,
                jp.district,
                jp.town,
                jp.work_day,
                jp.posting_type,
                jp.employment_type,
                jp.education,
                jp.summary,
                ci.company_name,
                jp.deadline
            FROM job_postings jp
            JOIN company_info ci ON ci.company_id = jp.company_id
            WHERE jp.job_posting_id = ANY($1)
            ORDER BY jp.deadline, jp.job_posting_id
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(JobPostingRow::into_domain).collect()
    }
}

/// Bookmark relation maintained by the posting service.
pub struct PostgresBookmarkRepository {
    pool: PgPool,
}

impl PostgresBookmarkRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookmarkRepository for PostgresBookmarkRepository {
    async fn bookmarked_among(
        &self,
        user: &UserId,
        ids: &[JobPostingId],
    ) -> Result<HashSet<JobPostingId>, SearchError> {
        let ids = ids.iter().map(JobPostingId::as_uuid).collect::<Vec<_>>();

        let bookmarked = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT job_posting_id
            FROM job_posting_bookmarks
            WHERE user_id = $1 AND job_posting_id = ANY($2)
            "#,
        )
        .bind(user.as_uuid())
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(bookmarked.into_iter().map(JobPostingId::new).collect())
    }
}

#[derive(sqlx::FromRow)]
struct JobPostingRow {
    job_posting_id: Uuid,
    job_posting_title: String,
    lon: f64,
    lat: f64,
    city: String,
    district: String,
    town: String,
    work_day: Vec<String>,
    posting_type: String,
    employment_type: String,
    education: String,
    summary: String,
    company_name: String,
    deadline: OffsetDateTime,
}

impl JobPostingRow {
    fn into_domain(self) -> Result<JobPosting, SearchError> {
        let location = GeoPoint::new(self.lon, self.lat).map_err(|err| {
            SearchError::Storage(format!(
                "job posting {} has an invalid location: {err}",
                self.job_posting_id
            ))
        })?;

        Ok(JobPosting {
            id: JobPostingId::new(self.job_posting_id),
            title: self.job_posting_title,
            location,
            city: self.city,
            district: self.district,
            town: self.town,
            work_days: self.work_day,
            posting_type: self.posting_type,
            employment_type: self.employment_type,
            education: self.education,
            summary: self.summary,
            company_name: self.company_name,
            deadline: self.deadline,
        })
    }
}
