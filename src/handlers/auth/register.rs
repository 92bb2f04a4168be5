// handlers/auth/register.rs - POST /auth/register handler

use axum::extract::State;

use crate::database::models::Account;
use crate::middleware::{ApiResponse, ApiResult, ValidatedJson};
use crate::services::{CredentialsRequest, UserService};
use crate::state::AppState;

/// POST /auth/register - create an account, or claim a pending tenant account
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CredentialsRequest>,
) -> ApiResult<Account> {
    let account = UserService::new(state.store.clone()).register(request).await?;
    Ok(ApiResponse::created("User registered successfully", account))
}
