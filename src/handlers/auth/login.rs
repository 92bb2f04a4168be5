// handlers/auth/login.rs - POST /auth/login handler

use axum::extract::State;

use crate::middleware::{ApiResponse, ApiResult, ValidatedJson};
use crate::services::{CredentialsRequest, LoginResponse, UserService};
use crate::state::AppState;

/// POST /auth/login - exchange email and password for a bearer token
///
/// Pending accounts are refused with 403 until claimed through registration.
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CredentialsRequest>,
) -> ApiResult<LoginResponse> {
    let response = UserService::new(state.store.clone())
        .login(request, &state.config.security)
        .await?;
    Ok(ApiResponse::success("Logged in successfully", response))
}
