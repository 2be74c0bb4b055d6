use adcat_core::{Ad, AdStats};
use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};

use super::validation::{parse_filters, validate_ad_id, AdListQuery};
use super::{map_db_error, ApiError, ApiResponse, AppState};
use crate::middleware::RequestId;

pub(super) async fn list_ads(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<AdListQuery>,
) -> Result<Json<ApiResponse<Vec<Ad>>>, ApiError> {
    let filters = parse_filters(&req_id.0, query)?;

    let ads = state
        .store
        .list_ads(&filters)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse::new(req_id.0, ads)))
}

pub(super) async fn get_ad(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(ad_id): Path<String>,
) -> Result<Json<ApiResponse<Ad>>, ApiError> {
    validate_ad_id(&req_id.0, &ad_id)?;

    let ad = state
        .store
        .find_ad(&ad_id)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?
        .ok_or_else(|| ApiError::new(req_id.0.clone(), "not_found", "Ad not found"))?;

    Ok(Json(ApiResponse::new(req_id.0, ad)))
}

pub(super) async fn ad_stats(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<AdStats>>, ApiError> {
    let stats = state
        .store
        .compute_stats()
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse::new(req_id.0, stats)))
}
