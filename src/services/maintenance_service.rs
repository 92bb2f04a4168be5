use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::database::models::{MaintenanceRequest, NewMaintenanceRequest, Role};
use crate::database::Store;
use crate::error::ApiError;

use super::access::{
    ensure_property_manager, require_account, require_landlord_profile, require_property,
    require_tenant_profile,
};
use super::upload::UploadStore;

/// Text fields of the multipart create form
#[derive(Debug, Clone, Validate)]
pub struct CreateMaintenanceRequest {
    pub property_id: Uuid,
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
}

#[derive(Debug, Clone)]
pub struct Attachment {
    pub file_name: Option<String>,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PropertyMaintenanceQuery {
    #[serde(alias = "isCompleted")]
    pub is_completed: Option<bool>,
}

pub struct MaintenanceService {
    store: Arc<dyn Store>,
}

impl MaintenanceService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Tenants may raise requests on the property they rent, landlords on
    /// the properties they own. The attachment is stored only once the
    /// requester is authorized.
    pub async fn create(
        &self,
        account_id: Uuid,
        request: CreateMaintenanceRequest,
        attachment: Option<Attachment>,
        uploads: &UploadStore,
    ) -> Result<MaintenanceRequest, ApiError> {
        let store = self.store.as_ref();
        let account = require_account(store, account_id).await?;
        let property = require_property(store, request.property_id).await?;

        match account.role {
            Some(Role::Tenant) => {
                let tenant = require_tenant_profile(store, account.id).await?;
                let rents = store
                    .find_active_contract_for_property(property.id)
                    .await?
                    .is_some_and(|contract| contract.tenant_id == tenant.id);
                if !rents {
                    return Err(ApiError::forbidden("You do not rent this property"));
                }
            }
            Some(Role::Landlord) => {
                let landlord = require_landlord_profile(store, account.id).await?;
                if property.landlord_id != landlord.id {
                    return Err(ApiError::forbidden("You do not own this property"));
                }
            }
            Some(Role::Agency) | None => {
                return Err(ApiError::forbidden("Only tenants and landlords can raise maintenance requests"));
            }
        }

        let attachment = match attachment {
            Some(file) => Some(uploads.save(file.file_name.as_deref(), &file.bytes).await?),
            None => None,
        };

        let created = store
            .insert_maintenance(NewMaintenanceRequest {
                property_id: property.id,
                requested_by: account.id,
                title: request.title,
                description: request.description,
                attachment,
            })
            .await?;

        tracing::info!(
            "Account {} raised maintenance request {} on property {}",
            account.id,
            created.id,
            property.id
        );
        Ok(created)
    }

    pub async fn list(&self) -> Result<Vec<MaintenanceRequest>, ApiError> {
        Ok(self.store.list_maintenance().await?)
    }

    pub async fn get(&self, id: Uuid) -> Result<MaintenanceRequest, ApiError> {
        self.store
            .find_maintenance(id)
            .await?
            .ok_or_else(|| ApiError::not_found("Maintenance request not found"))
    }

    pub async fn by_property(
        &self,
        property_id: Uuid,
        query: &PropertyMaintenanceQuery,
    ) -> Result<Vec<MaintenanceRequest>, ApiError> {
        let store = self.store.as_ref();
        require_property(store, property_id).await?;
        Ok(store
            .list_property_maintenance(property_id, query.is_completed)
            .await?)
    }

    /// Marks the request done. Completing twice keeps the first timestamp.
    pub async fn complete(&self, account_id: Uuid, id: Uuid) -> Result<MaintenanceRequest, ApiError> {
        let store = self.store.as_ref();
        let account = require_account(store, account_id).await?;
        let request = self.get(id).await?;
        let property = require_property(store, request.property_id).await?;

        ensure_property_manager(store, &account, &property).await?;

        if request.is_completed {
            return Ok(request);
        }

        let completed = store.complete_maintenance(id, Utc::now()).await?;
        tracing::info!("Account {} completed maintenance request {}", account.id, id);
        Ok(completed)
    }
}
