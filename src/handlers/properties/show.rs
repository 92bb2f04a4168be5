use axum::extract::{rejection::PathRejection, Path, State};
use uuid::Uuid;

use crate::database::models::Property;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::PropertyService;
use crate::state::AppState;

/// GET /properties/:id
pub async fn property_show(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Property> {
    let Path(id) = id?;
    let property = PropertyService::new(state.store.clone()).get(id).await?;
    Ok(ApiResponse::success("Property retrieved successfully", property))
}
