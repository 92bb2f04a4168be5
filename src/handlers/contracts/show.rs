use axum::extract::{rejection::PathRejection, Path, State};
use uuid::Uuid;

use crate::database::models::ContractDetails;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::ContractService;
use crate::state::AppState;

/// GET /contracts/:id
pub async fn contract_show(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<ContractDetails> {
    let Path(id) = id?;
    let contract = ContractService::new(state.store.clone()).get(id).await?;
    Ok(ApiResponse::success("Contract retrieved successfully", contract))
}
