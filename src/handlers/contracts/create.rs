// handlers/contracts/create.rs - POST /contracts handler

use axum::{extract::State, Extension};

use crate::database::models::ContractDetails;
use crate::middleware::{ApiResponse, ApiResult, AuthUser, ValidatedJson};
use crate::services::{ContractService, CreateContractRequest};
use crate::state::AppState;

/// POST /contracts - landlord creates a contract on one of their properties
///
/// The tenant is matched by email; an unknown email gets a pending tenant
/// account that is claimed later through `/auth/register`.
pub async fn contract_create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ValidatedJson(request): ValidatedJson<CreateContractRequest>,
) -> ApiResult<ContractDetails> {
    let contract = ContractService::new(state.store.clone())
        .create(user.account_id, request)
        .await?;
    Ok(ApiResponse::created("Contract created successfully", contract))
}
