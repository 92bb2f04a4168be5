use std::sync::Arc;

use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::database::models::{AgencyProfile, NewAgencyProfile, Role};
use crate::database::Store;
use crate::error::ApiError;

use super::access::require_account;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAgencyRequest {
    #[validate(length(min = 1, message = "Agency name is required"))]
    pub agency_name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Phone is required"))]
    pub phone: String,
}

pub struct AgencyService {
    store: Arc<dyn Store>,
}

impl AgencyService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn setup(
        &self,
        account_id: Uuid,
        request: CreateAgencyRequest,
    ) -> Result<AgencyProfile, ApiError> {
        let account = require_account(self.store.as_ref(), account_id).await?;
        if let Some(role) = account.role {
            return Err(ApiError::bad_request(format!(
                "Profile already set up as {}",
                role
            )));
        }

        let mut tx = self.store.begin().await?;
        let profile = tx
            .insert_agency(NewAgencyProfile {
                account_id: account.id,
                agency_name: request.agency_name,
                email: request.email,
                phone: request.phone,
            })
            .await?;
        tx.assign_role(account.id, Role::Agency).await?;
        tx.commit().await?;

        tracing::info!("Account {} set up agency profile {}", account.id, profile.id);
        Ok(profile)
    }

    pub async fn me(&self, account_id: Uuid) -> Result<AgencyProfile, ApiError> {
        self.store
            .find_agency_by_account(account_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Agency not found"))
    }
}
