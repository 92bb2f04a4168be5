// handlers/maintenance/create.rs - POST /maintenance (multipart) handler

use std::collections::HashMap;

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Extension,
};
use uuid::Uuid;
use validator::Validate;

use crate::database::models::MaintenanceRequest;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::{Attachment, CreateMaintenanceRequest, MaintenanceService, UploadStore};
use crate::state::AppState;

/// POST /maintenance - multipart form with `property_id`, `title`,
/// `description` and an optional `file` part
pub async fn maintenance_create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<MaintenanceRequest> {
    let mut multipart = multipart?;
    let uploads = UploadStore::from_config(&state.config.uploads);

    let mut property_id = None;
    let mut title = String::new();
    let mut description = String::new();
    let mut attachment = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "property_id" => {
                let raw = field.text().await?;
                property_id = Some(Uuid::parse_str(raw.trim()).map_err(|_| {
                    field_error("property_id", "Property id must be a UUID")
                })?);
            }
            "title" => title = field.text().await?,
            "description" => description = field.text().await?,
            "file" => {
                let file_name = field.file_name().map(str::to_string);
                let bytes = field.bytes().await?;
                if !bytes.is_empty() {
                    attachment = Some(Attachment {
                        file_name,
                        bytes: bytes.to_vec(),
                    });
                }
            }
            other => tracing::debug!("Ignoring multipart field {:?}", other),
        }
    }

    let property_id =
        property_id.ok_or_else(|| field_error("property_id", "Property id is required"))?;
    let form = CreateMaintenanceRequest {
        property_id,
        title,
        description,
    };
    form.validate()?;

    let request = MaintenanceService::new(state.store.clone())
        .create(user.account_id, form, attachment, &uploads)
        .await?;
    Ok(ApiResponse::created("Maintenance request created successfully", request))
}

fn field_error(field: &str, message: &str) -> ApiError {
    let mut fields = HashMap::new();
    fields.insert(field.to_string(), message.to_string());
    ApiError::validation_error("Validation failed", Some(fields))
}
