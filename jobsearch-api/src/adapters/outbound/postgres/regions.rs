use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::{
    geo::GeoPoint,
    models::{NewRegion, RegionFilter, RegionId, RegionName, ResolvedRegion},
    ports::outbound::RegionRepository,
    SearchError,
};

use super::non_empty;

/// PostGIS-backed region table.
///
/// Boundaries are stored in EPSG:5179 so centroids are computed in a metric
/// projection, then transformed back to WGS84 for the posting lookup.
pub struct PostgresRegionRepository {
    pool: PgPool,
}

impl PostgresRegionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RegionRepository for PostgresRegionRepository {
    async fn resolve(&self, filter: &RegionFilter) -> Result<Vec<ResolvedRegion>, SearchError> {
        let rows = sqlx::query_as::<_, ResolvedRegionRow>(
            r#"
            SELECT
                r.town_no,
                ST_X(c.centroid) AS lon,
                ST_Y(c.centroid) AS lat
            FROM regions r
            CROSS JOIN LATERAL (
                SELECT ST_Transform(ST_Centroid(r.geometry), 4326) AS centroid
            ) c
            WHERE ($1::text[] IS NULL OR r.city_name = ANY($1))
              AND ($2::text[] IS NULL OR r.district_name = ANY($2))
              AND ($3::text[] IS NULL OR r.town_name = ANY($3))
            ORDER BY r.town_no
            "#,
        )
        .bind(non_empty(&filter.cities))
        .bind(non_empty(&filter.districts))
        .bind(non_empty(&filter.towns))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(ResolvedRegionRow::into_domain).collect()
    }

    async fn region_names(&self) -> Result<Vec<RegionName>, SearchError> {
        let rows = sqlx::query_as::<_, (String, String, String)>(
            r#"
            SELECT DISTINCT city_name, district_name, town_name
            FROM regions
            ORDER BY city_name, district_name, town_name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(city, district, town)| RegionName::new(city, district, town))
            .collect())
    }

    async fn replace_all(&self, regions: &[NewRegion]) -> Result<usize, SearchError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM regions").execute(&mut *tx).await?;

        let mut count = 0;
        for region in regions {
            sqlx::query(
                r#"
                INSERT INTO regions (
                    city_no, city_name, district_no, district_name, town_no, town_name, geometry
                ) VALUES (
                    $1, $2, $3, $4, $5, $6,
                    ST_Transform(ST_Multi(ST_GeomFromText($7, 4326)), 5179)
                )
                "#,
            )
            .bind(&region.city_no)
            .bind(&region.city_name)
            .bind(&region.district_no)
            .bind(&region.district_name)
            .bind(region.town_no.as_str())
            .bind(&region.town_name)
            .bind(region.boundary.to_wkt())
            .execute(&mut *tx)
            .await?;
            count += 1;
        }

        tx.commit().await?;
        Ok(count)
    }
}

#[derive(sqlx::FromRow)]
struct ResolvedRegionRow {
    town_no: String,
    lon: f64,
    lat: f64,
}

impl ResolvedRegionRow {
    fn into_domain(self) -> Result<ResolvedRegion, SearchError> {
        let centroid = GeoPoint::new(self.lon, self.lat).map_err(|err| {
            SearchError::Storage(format!("region {} has an invalid centroid: {err}", self.town_no))
        })?;

        Ok(ResolvedRegion {
            id: RegionId::from(self.town_no),
            centroid,
        })
    }
}
