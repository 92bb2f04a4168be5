// handlers/properties/list.rs - GET /properties and GET /properties/mine

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Extension,
};

use crate::database::models::Property;
use crate::filter::PropertyListQuery;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::{PropertyListing, PropertyService};
use crate::state::AppState;

pub async fn property_list(State(state): State<AppState>) -> ApiResult<Vec<Property>> {
    let properties = PropertyService::new(state.store.clone()).list_all().await?;
    Ok(ApiResponse::success("Properties retrieved successfully", properties))
}

/// GET /properties/mine - the landlord's properties, soonest contract expiry
/// first, with `page`, `limit` and `total` in `meta`.
pub async fn property_mine(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    query: Result<Query<PropertyListQuery>, QueryRejection>,
) -> ApiResult<Vec<PropertyListing>> {
    let Query(query) = query?;
    let (listings, meta) = PropertyService::new(state.store.clone())
        .mine(user.account_id, &query, &state.config.listing)
        .await?;
    Ok(ApiResponse::success("Properties retrieved successfully", listings).with_meta(meta))
}
