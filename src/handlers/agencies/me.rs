use axum::{extract::State, Extension};

use crate::database::models::AgencyProfile;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::AgencyService;
use crate::state::AppState;

/// GET /agencies/me
pub async fn agency_me(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<AgencyProfile> {
    let profile = AgencyService::new(state.store.clone())
        .me(user.account_id)
        .await?;
    Ok(ApiResponse::success("Agency retrieved successfully", profile))
}
