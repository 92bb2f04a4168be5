use axum::{extract::State, Extension};

use crate::database::models::ContractDetails;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::ContractService;
use crate::state::AppState;

/// GET /contracts
pub async fn contract_list(State(state): State<AppState>) -> ApiResult<Vec<ContractDetails>> {
    let contracts = ContractService::new(state.store.clone()).list().await?;
    Ok(ApiResponse::success("Contracts retrieved successfully", contracts))
}

/// GET /contracts/mine
pub async fn contract_mine(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Vec<ContractDetails>> {
    let contracts = ContractService::new(state.store.clone())
        .mine(user.account_id)
        .await?;
    Ok(ApiResponse::success("Contracts retrieved successfully", contracts))
}
