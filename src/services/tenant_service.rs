use std::sync::Arc;

use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::database::models::{NewTenantProfile, Role, TenantProfile};
use crate::database::Store;
use crate::error::ApiError;

use super::access::require_account;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTenantRequest {
    #[validate(length(min = 1, message = "Full name is required"))]
    pub full_name: String,
    #[validate(length(min = 1, message = "Emirates ID is required"))]
    pub emirates_id: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 7, message = "Phone must be at least 7 characters"))]
    pub phone: String,
}

pub struct TenantService {
    store: Arc<dyn Store>,
}

impl TenantService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn setup(
        &self,
        account_id: Uuid,
        request: CreateTenantRequest,
    ) -> Result<TenantProfile, ApiError> {
        let store = self.store.as_ref();
        let account = require_account(store, account_id).await?;
        if let Some(role) = account.role {
            return Err(ApiError::bad_request(format!(
                "Profile already set up as {}",
                role
            )));
        }
        if store.find_tenant_by_email(&request.email).await?.is_some() {
            return Err(ApiError::conflict("A tenant with this email already exists"));
        }

        let mut tx = store.begin().await?;
        let profile = tx
            .insert_tenant(NewTenantProfile {
                account_id: account.id,
                full_name: request.full_name,
                emirates_id: request.emirates_id,
                email: request.email,
                phone: request.phone,
            })
            .await?;
        tx.assign_role(account.id, Role::Tenant).await?;
        tx.commit().await?;

        tracing::info!("Account {} set up tenant profile {}", account.id, profile.id);
        Ok(profile)
    }

    pub async fn me(&self, account_id: Uuid) -> Result<TenantProfile, ApiError> {
        self.store
            .find_tenant_by_account(account_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Tenant not found"))
    }
}
