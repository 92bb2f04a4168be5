// handlers/maintenance/complete.rs - PATCH /maintenance/:id/complete handler

use axum::{
    extract::{rejection::PathRejection, Path, State},
    Extension,
};
use uuid::Uuid;

use crate::database::models::MaintenanceRequest;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::MaintenanceService;
use crate::state::AppState;

pub async fn maintenance_complete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    id: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<MaintenanceRequest> {
    let Path(id) = id?;
    let request = MaintenanceService::new(state.store.clone())
        .complete(user.account_id, id)
        .await?;
    Ok(ApiResponse::success("Maintenance request completed", request))
}
