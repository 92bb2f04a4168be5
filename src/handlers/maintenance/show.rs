use axum::extract::{rejection::PathRejection, Path, State};
use uuid::Uuid;

use crate::database::models::MaintenanceRequest;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::MaintenanceService;
use crate::state::AppState;

/// GET /maintenance/:id
pub async fn maintenance_show(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<MaintenanceRequest> {
    let Path(id) = id?;
    let request = MaintenanceService::new(state.store.clone()).get(id).await?;
    Ok(ApiResponse::success("Maintenance request retrieved successfully", request))
}
