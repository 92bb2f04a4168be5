use axum::{extract::State, Extension};

use crate::database::models::TenantProfile;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::TenantService;
use crate::state::AppState;

/// GET /tenants/me
pub async fn tenant_me(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<TenantProfile> {
    let profile = TenantService::new(state.store.clone())
        .me(user.account_id)
        .await?;
    Ok(ApiResponse::success("Tenant retrieved successfully", profile))
}
