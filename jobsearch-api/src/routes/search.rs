use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use axum_extra::extract::{Query, QueryRejection};
use tracing::{info, instrument};

use crate::{
    adapters::inbound::http::{SearchParams, SearchResponse},
    auth::NormalUser,
    domain::{models::RegionTree, SearchError},
    AppState,
};

use super::ApiError;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(search))
        .route("/region-tree", get(region_tree))
}

#[instrument(name = "GET /search", skip_all)]
async fn search(
    State(app_state): State<AppState>,
    NormalUser(user): NormalUser,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(params) = params?;
    let query = params.validate().map_err(ApiError::invalid_fields)?;
    let user_id = user.as_ref().map(|user| &user.id);

    match app_state.search_service().search(&query, user_id).await {
        Ok(results) => {
            info!(results = results.len(), "Search completed");
            Ok(Json(SearchResponse::found(results)).into_response())
        }
        Err(err @ SearchError::RegionNotFound) => Ok((
            StatusCode::NOT_FOUND,
            Json(SearchResponse::not_found(err.to_string())),
        )
            .into_response()),
        Err(err) => Err(err.into()),
    }
}

#[instrument(name = "GET /search/region-tree", skip(app_state))]
async fn region_tree(State(app_state): State<AppState>) -> Result<Json<RegionTree>, ApiError> {
    let tree = app_state.region_service().get_tree().await?;
    Ok(Json(tree))
}
