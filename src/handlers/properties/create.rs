// handlers/properties/create.rs - POST /properties handler

use axum::{extract::State, Extension};

use crate::database::models::Property;
use crate::middleware::{ApiResponse, ApiResult, AuthUser, ValidatedJson};
use crate::services::{CreatePropertyRequest, PropertyService};
use crate::state::AppState;

pub async fn property_create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ValidatedJson(request): ValidatedJson<CreatePropertyRequest>,
) -> ApiResult<Property> {
    let property = PropertyService::new(state.store.clone())
        .create(user.account_id, request)
        .await?;
    Ok(ApiResponse::created("Property created successfully", property))
}
