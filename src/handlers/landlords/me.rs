// handlers/landlords/me.rs - GET and PATCH /landlords/me handlers

use axum::{extract::State, Extension};

use crate::database::models::LandlordProfile;
use crate::middleware::{ApiResponse, ApiResult, AuthUser, ValidatedJson};
use crate::services::{LandlordService, UpdateLandlordRequest};
use crate::state::AppState;

pub async fn landlord_me(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<LandlordProfile> {
    let profile = LandlordService::new(state.store.clone())
        .me(user.account_id)
        .await?;
    Ok(ApiResponse::success("Landlord retrieved successfully", profile))
}

/// PATCH /landlords/me - absent fields are left unchanged
pub async fn landlord_update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ValidatedJson(request): ValidatedJson<UpdateLandlordRequest>,
) -> ApiResult<LandlordProfile> {
    let profile = LandlordService::new(state.store.clone())
        .update(user.account_id, request)
        .await?;
    Ok(ApiResponse::success("Landlord updated successfully", profile))
}
