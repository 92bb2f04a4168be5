// handlers/landlords/setup.rs - POST /landlords handler

use axum::{extract::State, Extension};

use crate::database::models::LandlordProfile;
use crate::middleware::{ApiResponse, ApiResult, AuthUser, ValidatedJson};
use crate::services::{CreateLandlordRequest, LandlordService};
use crate::state::AppState;

pub async fn landlord_setup(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ValidatedJson(request): ValidatedJson<CreateLandlordRequest>,
) -> ApiResult<LandlordProfile> {
    let profile = LandlordService::new(state.store.clone())
        .setup(user.account_id, request)
        .await?;
    Ok(ApiResponse::created("Landlord profile created successfully", profile))
}
