use axum::{extract::State, Extension};

use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::{MeResponse, UserService};
use crate::state::AppState;

/// GET /users/me - the caller's account and role profile
pub async fn me(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<MeResponse> {
    let me = UserService::new(state.store.clone()).me(user.account_id).await?;
    Ok(ApiResponse::success("User retrieved successfully", me))
}
