use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::database::models::{
    Contract, ContractDetails, NewAccount, NewContract, NewTenantProfile, Role, TenantProfile,
};
use crate::database::{Store, StoreError, StoreTx};
use crate::error::ApiError;

use super::access::{
    ensure_property_manager, require_account, require_landlord_profile, require_property,
    require_tenant_profile,
};

/// Length of a contract from the day it is created
pub const CONTRACT_TERM_DAYS: i64 = 100;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateContractRequest {
    pub property_id: Uuid,
    #[validate(length(min = 1, message = "Tenant name is required"))]
    pub tenant_name: String,
    #[validate(length(min = 1, message = "Emirates ID is required"))]
    pub emirates_id: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 7, message = "Mobile number must be at least 7 characters"))]
    pub mobile: String,
}

pub struct ContractService {
    store: Arc<dyn Store>,
}

impl ContractService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn create(
        &self,
        account_id: Uuid,
        request: CreateContractRequest,
    ) -> Result<ContractDetails, ApiError> {
        self.create_at(account_id, request, Utc::now()).await
    }

    /// Creates the contract, finding or creating the tenant by email, and
    /// flags the property. Every write happens in one transaction.
    pub async fn create_at(
        &self,
        account_id: Uuid,
        request: CreateContractRequest,
        now: DateTime<Utc>,
    ) -> Result<ContractDetails, ApiError> {
        let store = self.store.as_ref();
        require_account(store, account_id).await?;
        let landlord = require_landlord_profile(store, account_id).await?;
        let property = require_property(store, request.property_id).await?;

        if property.landlord_id != landlord.id {
            tracing::warn!(
                "Landlord {} attempted a contract on property {} owned by {}",
                landlord.id,
                property.id,
                property.landlord_id
            );
            return Err(ApiError::forbidden("You do not own this property"));
        }

        if store
            .find_active_contract_for_property(property.id)
            .await?
            .is_some()
        {
            return Err(ApiError::conflict("Property contract already exists"));
        }

        let mut tx = store.begin().await?;

        let tenant = find_or_create_tenant(tx.as_mut(), &request).await?;

        let contract = tx
            .insert_contract(NewContract {
                property_id: property.id,
                tenant_id: tenant.id,
                tenant_name: request.tenant_name,
                emirates_id: request.emirates_id,
                email: request.email,
                mobile: request.mobile,
            })
            .await
            .map_err(|e| match e {
                StoreError::Conflict(_) => ApiError::conflict("Property contract already exists"),
                other => other.into(),
            })?;

        let expires_at = now + Duration::days(CONTRACT_TERM_DAYS);
        let property = tx.set_property_contract(property.id, Some(expires_at)).await?;

        tx.commit().await?;

        tracing::info!(
            "Created contract {} on property {} for tenant {}",
            contract.id,
            property.id,
            tenant.id
        );

        Ok(ContractDetails { contract, property })
    }

    pub async fn list(&self) -> Result<Vec<ContractDetails>, ApiError> {
        Ok(self.store.list_contracts().await?)
    }

    /// Contracts held by the requesting tenant
    pub async fn mine(&self, account_id: Uuid) -> Result<Vec<ContractDetails>, ApiError> {
        let store = self.store.as_ref();
        require_account(store, account_id).await?;
        let tenant = require_tenant_profile(store, account_id).await?;
        Ok(store.list_tenant_contracts(tenant.id).await?)
    }

    pub async fn get(&self, contract_id: Uuid) -> Result<ContractDetails, ApiError> {
        self.store
            .find_contract(contract_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Contract not found"))
    }

    /// Soft-deletes the contract and releases the property
    pub async fn delete(&self, account_id: Uuid, contract_id: Uuid) -> Result<Contract, ApiError> {
        let store = self.store.as_ref();
        let details = self.get(contract_id).await?;
        let account = require_account(store, account_id).await?;
        let property = require_property(store, details.contract.property_id).await?;

        ensure_property_manager(store, &account, &property).await?;

        let mut tx = store.begin().await?;
        let contract = tx.soft_delete_contract(contract_id).await?;
        tx.set_property_contract(property.id, None).await?;
        tx.commit().await?;

        tracing::info!(
            "Account {} deleted contract {} on property {}",
            account.id,
            contract.id,
            property.id
        );

        Ok(contract)
    }
}

/// Reuses the tenant profile registered under the contract email, or the
/// profile of the tenant account logging in with it. Otherwise attaches a new
/// profile to the account holding that email, creating a pending tenant
/// account when there is none.
async fn find_or_create_tenant(
    tx: &mut dyn StoreTx,
    request: &CreateContractRequest,
) -> Result<TenantProfile, ApiError> {
    if let Some(tenant) = tx.find_tenant_by_email(&request.email).await? {
        return Ok(tenant);
    }

    let account = match tx.find_account_by_email(&request.email).await? {
        Some(existing) => match existing.role {
            None => tx.assign_role(existing.id, Role::Tenant).await?,
            Some(Role::Tenant) => match tx.find_tenant_by_account(existing.id).await? {
                Some(tenant) => return Ok(tenant),
                None => existing,
            },
            Some(role) => {
                return Err(ApiError::conflict(format!(
                    "Email is already registered to a {} account",
                    role
                )))
            }
        },
        None => {
            let account = tx
                .insert_account(NewAccount::pending_tenant(request.email.clone()))
                .await?;
            tracing::info!("Created pending tenant account {}", account.id);
            account
        }
    };

    Ok(tx
        .insert_tenant(NewTenantProfile {
            account_id: account.id,
            full_name: request.tenant_name.clone(),
            emirates_id: request.emirates_id.clone(),
            email: request.email.clone(),
            phone: request.mobile.clone(),
        })
        .await?)
}
