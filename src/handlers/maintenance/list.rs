use axum::extract::{
    rejection::{PathRejection, QueryRejection},
    Path, Query, State,
};
use uuid::Uuid;

use crate::database::models::MaintenanceRequest;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::{MaintenanceService, PropertyMaintenanceQuery};
use crate::state::AppState;

/// GET /maintenance
pub async fn maintenance_list(State(state): State<AppState>) -> ApiResult<Vec<MaintenanceRequest>> {
    let requests = MaintenanceService::new(state.store.clone()).list().await?;
    Ok(ApiResponse::success("Maintenance requests retrieved successfully", requests))
}

/// GET /maintenance/property/:id?is_completed=
pub async fn maintenance_by_property(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    query: Result<Query<PropertyMaintenanceQuery>, QueryRejection>,
) -> ApiResult<Vec<MaintenanceRequest>> {
    let Path(id) = id?;
    let Query(query) = query?;
    let requests = MaintenanceService::new(state.store.clone())
        .by_property(id, &query)
        .await?;
    Ok(ApiResponse::success("Maintenance requests retrieved successfully", requests))
}
