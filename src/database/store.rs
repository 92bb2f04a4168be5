use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::database::models::{
    Account, AgencyProfile, Contract, ContractDetails, LandlordProfile, LandlordUpdate,
    MaintenanceRequest, NewAccount, NewAgencyProfile, NewContract, NewLandlordProfile,
    NewMaintenanceRequest, NewProperty, NewTenantProfile, Property, Role, TenantProfile,
};
use crate::filter::PropertyFilter;

/// Errors raised by a [`Store`] implementation
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    /// Unique constraint violation
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error(transparent)]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error(transparent)]
    Sqlx(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                StoreError::Conflict(db.constraint().unwrap_or("unique constraint").to_string())
            }
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                StoreError::Unavailable(err.to_string())
            }
            _ => StoreError::Sqlx(err),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence boundary for every domain service.
///
/// Single-statement operations live here; anything that must be all-or-nothing
/// goes through [`Store::begin`].
#[async_trait]
pub trait Store: Send + Sync {
    async fn begin(&self) -> StoreResult<Box<dyn StoreTx>>;

    async fn ping(&self) -> StoreResult<()>;

    // accounts
    async fn find_account(&self, id: Uuid) -> StoreResult<Option<Account>>;
    async fn find_account_by_email(&self, email: &str) -> StoreResult<Option<Account>>;
    async fn insert_account(&self, account: NewAccount) -> StoreResult<Account>;
    /// Sets a credential on a pending account and marks it active
    async fn activate_account(&self, id: Uuid, password_hash: String) -> StoreResult<Account>;

    // profiles
    async fn find_landlord_by_account(&self, account_id: Uuid) -> StoreResult<Option<LandlordProfile>>;
    async fn update_landlord(&self, id: Uuid, update: LandlordUpdate) -> StoreResult<LandlordProfile>;
    async fn find_agency(&self, id: Uuid) -> StoreResult<Option<AgencyProfile>>;
    async fn find_agency_by_account(&self, account_id: Uuid) -> StoreResult<Option<AgencyProfile>>;
    async fn find_tenant_by_account(&self, account_id: Uuid) -> StoreResult<Option<TenantProfile>>;
    async fn find_tenant_by_email(&self, email: &str) -> StoreResult<Option<TenantProfile>>;

    // properties
    async fn insert_property(&self, property: NewProperty) -> StoreResult<Property>;
    async fn find_property(&self, id: Uuid) -> StoreResult<Option<Property>>;
    /// All properties, newest first
    async fn list_properties(&self) -> StoreResult<Vec<Property>>;
    /// A landlord's properties matching `filter`, in the filter's sort order
    async fn list_landlord_properties(
        &self,
        landlord_id: Uuid,
        filter: &PropertyFilter,
    ) -> StoreResult<Vec<Property>>;

    // contracts
    async fn find_active_contract_for_property(&self, property_id: Uuid) -> StoreResult<Option<Contract>>;
    /// Non-deleted contract with its property
    async fn find_contract(&self, id: Uuid) -> StoreResult<Option<ContractDetails>>;
    async fn list_contracts(&self) -> StoreResult<Vec<ContractDetails>>;
    async fn list_tenant_contracts(&self, tenant_id: Uuid) -> StoreResult<Vec<ContractDetails>>;

    // maintenance
    async fn insert_maintenance(&self, request: NewMaintenanceRequest) -> StoreResult<MaintenanceRequest>;
    async fn find_maintenance(&self, id: Uuid) -> StoreResult<Option<MaintenanceRequest>>;
    async fn list_maintenance(&self) -> StoreResult<Vec<MaintenanceRequest>>;
    async fn list_property_maintenance(
        &self,
        property_id: Uuid,
        is_completed: Option<bool>,
    ) -> StoreResult<Vec<MaintenanceRequest>>;
    async fn complete_maintenance(&self, id: Uuid, at: DateTime<Utc>) -> StoreResult<MaintenanceRequest>;
}

/// Unit of work opened by [`Store::begin`].
///
/// Dropping a transaction without calling [`StoreTx::commit`] discards every
/// write made through it.
#[async_trait]
pub trait StoreTx: Send {
    async fn find_account_by_email(&mut self, email: &str) -> StoreResult<Option<Account>>;
    async fn find_tenant_by_email(&mut self, email: &str) -> StoreResult<Option<TenantProfile>>;
    async fn find_tenant_by_account(&mut self, account_id: Uuid) -> StoreResult<Option<TenantProfile>>;
    async fn insert_account(&mut self, account: NewAccount) -> StoreResult<Account>;
    /// Assigns the role and marks the profile as set up
    async fn assign_role(&mut self, account_id: Uuid, role: Role) -> StoreResult<Account>;

    async fn insert_landlord(&mut self, profile: NewLandlordProfile) -> StoreResult<LandlordProfile>;
    async fn insert_agency(&mut self, profile: NewAgencyProfile) -> StoreResult<AgencyProfile>;
    async fn insert_tenant(&mut self, profile: NewTenantProfile) -> StoreResult<TenantProfile>;

    async fn insert_contract(&mut self, contract: NewContract) -> StoreResult<Contract>;
    async fn soft_delete_contract(&mut self, id: Uuid) -> StoreResult<Contract>;
    /// `Some(expiry)` flags an active contract, `None` clears the flag
    async fn set_property_contract(
        &mut self,
        property_id: Uuid,
        expires_at: Option<DateTime<Utc>>,
    ) -> StoreResult<Property>;

    async fn commit(self: Box<Self>) -> StoreResult<()>;
}
