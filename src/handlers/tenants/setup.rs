// handlers/tenants/setup.rs - POST /tenants handler

use axum::{extract::State, Extension};

use crate::database::models::TenantProfile;
use crate::middleware::{ApiResponse, ApiResult, AuthUser, ValidatedJson};
use crate::services::{CreateTenantRequest, TenantService};
use crate::state::AppState;

pub async fn tenant_setup(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ValidatedJson(request): ValidatedJson<CreateTenantRequest>,
) -> ApiResult<TenantProfile> {
    let profile = TenantService::new(state.store.clone())
        .setup(user.account_id, request)
        .await?;
    Ok(ApiResponse::created("Tenant profile created successfully", profile))
}
