// handlers/contracts/delete.rs - DELETE /contracts/:id handler

use axum::{
    extract::{rejection::PathRejection, Path, State},
    Extension,
};
use uuid::Uuid;

use crate::database::models::Contract;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::ContractService;
use crate::state::AppState;

/// DELETE /contracts/:id - soft delete by the owning landlord or assigned agency
pub async fn contract_delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    id: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Contract> {
    let Path(id) = id?;
    let contract = ContractService::new(state.store.clone())
        .delete(user.account_id, id)
        .await?;
    Ok(ApiResponse::success("Contract deleted successfully", contract))
}
