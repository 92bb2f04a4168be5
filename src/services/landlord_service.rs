use std::sync::Arc;

use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::database::models::{LandlordProfile, LandlordUpdate, NewLandlordProfile, Role};
use crate::database::Store;
use crate::error::ApiError;

use super::access::require_account;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateLandlordRequest {
    #[validate(length(min = 1, message = "Company name is required"))]
    pub company_name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Phone is required"))]
    pub phone: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateLandlordRequest {
    #[validate(length(min = 1, message = "Company name cannot be empty"))]
    pub company_name: Option<String>,
    #[validate(length(min = 1, message = "Phone cannot be empty"))]
    pub phone: Option<String>,
}

pub struct LandlordService {
    store: Arc<dyn Store>,
}

impl LandlordService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Creates the landlord profile and assigns the role atomically.
    pub async fn setup(
        &self,
        account_id: Uuid,
        request: CreateLandlordRequest,
    ) -> Result<LandlordProfile, ApiError> {
        let account = require_account(self.store.as_ref(), account_id).await?;
        if let Some(role) = account.role {
            return Err(ApiError::bad_request(format!(
                "Profile already set up as {}",
                role
            )));
        }

        let mut tx = self.store.begin().await?;
        let profile = tx
            .insert_landlord(NewLandlordProfile {
                account_id: account.id,
                company_name: request.company_name,
                email: request.email,
                phone: request.phone,
            })
            .await?;
        tx.assign_role(account.id, Role::Landlord).await?;
        tx.commit().await?;

        tracing::info!("Account {} set up landlord profile {}", account.id, profile.id);
        Ok(profile)
    }

    pub async fn me(&self, account_id: Uuid) -> Result<LandlordProfile, ApiError> {
        self.store
            .find_landlord_by_account(account_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Landlord not found"))
    }

    pub async fn update(
        &self,
        account_id: Uuid,
        request: UpdateLandlordRequest,
    ) -> Result<LandlordProfile, ApiError> {
        let landlord = self.me(account_id).await?;
        let updated = self
            .store
            .update_landlord(
                landlord.id,
                LandlordUpdate {
                    company_name: request.company_name,
                    phone: request.phone,
                },
            )
            .await?;
        tracing::info!("Landlord {} updated", updated.id);
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures::{seed_account, seed_tenant};
    use crate::testing::MemoryStore;

    fn request() -> CreateLandlordRequest {
        CreateLandlordRequest {
            company_name: "Acme Holdings".into(),
            email: "owner@example.com".into(),
            phone: "0501234567".into(),
        }
    }

    #[tokio::test]
    async fn setup_assigns_role_and_profile() {
        let store = MemoryStore::new();
        let landlords = LandlordService::new(Arc::new(store.clone()));
        let account = seed_account(&store, "owner@example.com").await;

        let profile = landlords.setup(account.id, request()).await.unwrap();

        let state = store.snapshot().await;
        let stored = state.accounts.iter().find(|a| a.id == account.id).unwrap();
        assert_eq!(stored.role, Some(Role::Landlord));
        assert!(stored.is_profile_set_up);
        assert_eq!(landlords.me(account.id).await.unwrap().id, profile.id);

        assert!(matches!(
            landlords.setup(account.id, request()).await,
            Err(ApiError::BadRequest(_))
        ));
    }

    #[tokio::test]
    async fn setup_refuses_accounts_with_another_role() {
        let store = MemoryStore::new();
        let landlords = LandlordService::new(Arc::new(store.clone()));
        let (tenant, _) = seed_tenant(&store, "tenant@example.com").await;

        assert!(matches!(
            landlords.setup(tenant.id, request()).await,
            Err(ApiError::BadRequest(_))
        ));
        assert!(store.snapshot().await.landlords.is_empty());
    }

    #[tokio::test]
    async fn update_changes_only_given_fields() {
        let store = MemoryStore::new();
        let landlords = LandlordService::new(Arc::new(store.clone()));
        let account = seed_account(&store, "owner@example.com").await;
        landlords.setup(account.id, request()).await.unwrap();

        let updated = landlords
            .update(
                account.id,
                UpdateLandlordRequest {
                    phone: Some("0509999999".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.phone, "0509999999");
        assert_eq!(updated.company_name, "Acme Holdings");

        let invalid = UpdateLandlordRequest {
            company_name: Some(String::new()),
            ..Default::default()
        };
        assert!(invalid.validate().is_err());
    }
}
