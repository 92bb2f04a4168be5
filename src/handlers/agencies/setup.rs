// handlers/agencies/setup.rs - POST /agencies handler

use axum::{extract::State, Extension};

use crate::database::models::AgencyProfile;
use crate::middleware::{ApiResponse, ApiResult, AuthUser, ValidatedJson};
use crate::services::{AgencyService, CreateAgencyRequest};
use crate::state::AppState;

pub async fn agency_setup(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ValidatedJson(request): ValidatedJson<CreateAgencyRequest>,
) -> ApiResult<AgencyProfile> {
    let profile = AgencyService::new(state.store.clone())
        .setup(user.account_id, request)
        .await?;
    Ok(ApiResponse::created("Agency profile created successfully", profile))
}
