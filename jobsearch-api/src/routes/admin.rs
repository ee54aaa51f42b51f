//! Region dataset maintenance.

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{post, put},
    Json, Router,
};
use tracing::{info, instrument};

use crate::{
    adapters::inbound::http::{RegionImportRequest, RegionTreeRebuildResponse},
    auth::AdminUser,
    AppState,
};

use super::ApiError;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/region-tree/rebuild", post(rebuild_region_tree))
        .route("/regions", put(import_regions))
}

#[instrument(name = "POST /admin/region-tree/rebuild", skip_all)]
async fn rebuild_region_tree(
    State(app_state): State<AppState>,
    _admin: AdminUser,
) -> Result<Json<RegionTreeRebuildResponse>, ApiError> {
    let stats = app_state.region_service().rebuild_tree().await?;
    Ok(Json(stats.into()))
}

#[instrument(name = "PUT /admin/regions", skip_all)]
async fn import_regions(
    State(app_state): State<AppState>,
    _admin: AdminUser,
    body: Result<Json<RegionImportRequest>, JsonRejection>,
) -> Result<Json<RegionTreeRebuildResponse>, ApiError> {
    let Json(request) = body?;
    let regions = request.into_domain().map_err(ApiError::invalid_fields)?;

    info!(regions = regions.len(), "Importing region dataset");
    let stats = app_state.region_service().import_regions(regions).await?;
    Ok(Json(stats.into()))
}
