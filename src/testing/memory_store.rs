use std::sync::{Arc, Mutex as StdMutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

use crate::database::models::{
    Account, AccountStatus, AgencyProfile, Contract, ContractDetails, LandlordProfile,
    LandlordUpdate, MaintenanceRequest, NewAccount, NewAgencyProfile, NewContract,
    NewLandlordProfile, NewMaintenanceRequest, NewProperty, NewTenantProfile, Property, Role,
    TenantProfile,
};
use crate::database::store::{Store, StoreError, StoreResult, StoreTx};
use crate::filter::PropertyFilter;

/// Every table, held in insertion order
#[derive(Debug, Clone, Default)]
pub struct MemoryState {
    pub accounts: Vec<Account>,
    pub landlords: Vec<LandlordProfile>,
    pub agencies: Vec<AgencyProfile>,
    pub tenants: Vec<TenantProfile>,
    pub properties: Vec<Property>,
    pub contracts: Vec<Contract>,
    pub maintenance: Vec<MaintenanceRequest>,
}

/// Transaction step that should fail, to exercise rollback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailPoint {
    InsertAccount,
    InsertTenant,
    InsertContract,
    SetPropertyContract,
}

/// In-process [`Store`]. Transactions take the state lock for their whole
/// lifetime and write to a copy that replaces the state on commit.
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
    fail_point: Arc<StdMutex<Option<FailPoint>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_on(&self, point: FailPoint) {
        *self.fail_point.lock().unwrap() = Some(point);
    }

    pub async fn snapshot(&self) -> MemoryState {
        self.state.lock().await.clone()
    }

    /// Direct state access for seeding fixtures
    pub async fn with_state<R>(&self, f: impl FnOnce(&mut MemoryState) -> R) -> R {
        let mut state = self.state.lock().await;
        f(&mut state)
    }
}

impl MemoryState {
    fn account_mut(&mut self, id: Uuid) -> StoreResult<&mut Account> {
        self.accounts
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| StoreError::NotFound(format!("account {}", id)))
    }

    fn property_mut(&mut self, id: Uuid) -> StoreResult<&mut Property> {
        self.properties
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::NotFound(format!("property {}", id)))
    }

    pub fn push_account(&mut self, account: NewAccount) -> StoreResult<Account> {
        if self.accounts.iter().any(|a| a.email == account.email) {
            return Err(StoreError::Conflict("accounts_email_key".into()));
        }
        let now = Utc::now();
        let account = Account {
            id: Uuid::new_v4(),
            email: account.email,
            password_hash: account.password_hash,
            role: account.role,
            status: account.status,
            is_profile_set_up: account.is_profile_set_up,
            created_at: now,
            updated_at: now,
        };
        self.accounts.push(account.clone());
        Ok(account)
    }

    fn assign_role(&mut self, account_id: Uuid, role: Role) -> StoreResult<Account> {
        let account = self.account_mut(account_id)?;
        account.role = Some(role);
        account.is_profile_set_up = true;
        account.updated_at = Utc::now();
        Ok(account.clone())
    }

    pub fn push_landlord(&mut self, profile: NewLandlordProfile) -> StoreResult<LandlordProfile> {
        if self.landlords.iter().any(|l| l.account_id == profile.account_id) {
            return Err(StoreError::Conflict("landlords_account_id_key".into()));
        }
        let now = Utc::now();
        let landlord = LandlordProfile {
            id: Uuid::new_v4(),
            account_id: profile.account_id,
            company_name: profile.company_name,
            email: profile.email,
            phone: profile.phone,
            created_at: now,
            updated_at: now,
        };
        self.landlords.push(landlord.clone());
        Ok(landlord)
    }

    pub fn push_agency(&mut self, profile: NewAgencyProfile) -> StoreResult<AgencyProfile> {
        if self.agencies.iter().any(|a| a.account_id == profile.account_id) {
            return Err(StoreError::Conflict("agencies_account_id_key".into()));
        }
        let now = Utc::now();
        let agency = AgencyProfile {
            id: Uuid::new_v4(),
            account_id: profile.account_id,
            agency_name: profile.agency_name,
            email: profile.email,
            phone: profile.phone,
            created_at: now,
            updated_at: now,
        };
        self.agencies.push(agency.clone());
        Ok(agency)
    }

    pub fn push_tenant(&mut self, profile: NewTenantProfile) -> StoreResult<TenantProfile> {
        if self
            .tenants
            .iter()
            .any(|t| t.account_id == profile.account_id || t.email == profile.email)
        {
            return Err(StoreError::Conflict("tenants_email_key".into()));
        }
        let now = Utc::now();
        let tenant = TenantProfile {
            id: Uuid::new_v4(),
            account_id: profile.account_id,
            full_name: profile.full_name,
            emirates_id: profile.emirates_id,
            email: profile.email,
            phone: profile.phone,
            created_at: now,
            updated_at: now,
        };
        self.tenants.push(tenant.clone());
        Ok(tenant)
    }

    pub fn push_property(&mut self, property: NewProperty) -> Property {
        let now = Utc::now();
        let property = Property {
            id: Uuid::new_v4(),
            landlord_id: property.landlord_id,
            agency_id: property.agency_id,
            title: property.title,
            address: property.address,
            city: property.city,
            area: property.area,
            property_type: property.property_type,
            bedrooms: property.bedrooms,
            rent_amount: property.rent_amount,
            is_contract_created: false,
            contract_expires_at: None,
            created_at: now,
            updated_at: now,
        };
        self.properties.push(property.clone());
        property
    }

    fn push_contract(&mut self, contract: NewContract) -> StoreResult<Contract> {
        if self
            .contracts
            .iter()
            .any(|c| c.property_id == contract.property_id && !c.is_deleted)
        {
            return Err(StoreError::Conflict("contracts_active_property_idx".into()));
        }
        let now = Utc::now();
        let contract = Contract {
            id: Uuid::new_v4(),
            property_id: contract.property_id,
            tenant_id: contract.tenant_id,
            tenant_name: contract.tenant_name,
            emirates_id: contract.emirates_id,
            email: contract.email,
            mobile: contract.mobile,
            is_deleted: false,
            created_at: now,
            updated_at: now,
        };
        self.contracts.push(contract.clone());
        Ok(contract)
    }

    fn details(&self, contract: &Contract) -> StoreResult<ContractDetails> {
        let property = self
            .properties
            .iter()
            .find(|p| p.id == contract.property_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("property {}", contract.property_id)))?;
        Ok(ContractDetails {
            contract: contract.clone(),
            property,
        })
    }

    fn live_contracts<'a>(
        &'a self,
        keep: impl Fn(&Contract) -> bool + 'a,
    ) -> StoreResult<Vec<ContractDetails>> {
        let mut out = self
            .contracts
            .iter()
            .filter(|c| !c.is_deleted && keep(c))
            .map(|c| self.details(c))
            .collect::<StoreResult<Vec<_>>>()?;
        out.reverse();
        Ok(out)
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn begin(&self) -> StoreResult<Box<dyn StoreTx>> {
        let guard = self.state.clone().lock_owned().await;
        let working = guard.clone();
        let fail_point = self.fail_point.lock().unwrap().take();
        Ok(Box::new(MemoryTx {
            guard,
            working,
            fail_point,
        }))
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn find_account(&self, id: Uuid) -> StoreResult<Option<Account>> {
        let state = self.state.lock().await;
        Ok(state.accounts.iter().find(|a| a.id == id).cloned())
    }

    async fn find_account_by_email(&self, email: &str) -> StoreResult<Option<Account>> {
        let state = self.state.lock().await;
        Ok(state.accounts.iter().find(|a| a.email == email).cloned())
    }

    async fn insert_account(&self, account: NewAccount) -> StoreResult<Account> {
        self.state.lock().await.push_account(account)
    }

    async fn activate_account(&self, id: Uuid, password_hash: String) -> StoreResult<Account> {
        let mut state = self.state.lock().await;
        let account = state.account_mut(id)?;
        account.password_hash = Some(password_hash);
        account.status = AccountStatus::Active;
        account.updated_at = Utc::now();
        Ok(account.clone())
    }

    async fn find_landlord_by_account(&self, account_id: Uuid) -> StoreResult<Option<LandlordProfile>> {
        let state = self.state.lock().await;
        Ok(state.landlords.iter().find(|l| l.account_id == account_id).cloned())
    }

    async fn update_landlord(&self, id: Uuid, update: LandlordUpdate) -> StoreResult<LandlordProfile> {
        let mut state = self.state.lock().await;
        let landlord = state
            .landlords
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| StoreError::NotFound(format!("landlord {}", id)))?;
        if let Some(company_name) = update.company_name {
            landlord.company_name = company_name;
        }
        if let Some(phone) = update.phone {
            landlord.phone = phone;
        }
        landlord.updated_at = Utc::now();
        Ok(landlord.clone())
    }

    async fn find_agency(&self, id: Uuid) -> StoreResult<Option<AgencyProfile>> {
        let state = self.state.lock().await;
        Ok(state.agencies.iter().find(|a| a.id == id).cloned())
    }

    async fn find_agency_by_account(&self, account_id: Uuid) -> StoreResult<Option<AgencyProfile>> {
        let state = self.state.lock().await;
        Ok(state.agencies.iter().find(|a| a.account_id == account_id).cloned())
    }

    async fn find_tenant_by_account(&self, account_id: Uuid) -> StoreResult<Option<TenantProfile>> {
        let state = self.state.lock().await;
        Ok(state.tenants.iter().find(|t| t.account_id == account_id).cloned())
    }

    async fn find_tenant_by_email(&self, email: &str) -> StoreResult<Option<TenantProfile>> {
        let state = self.state.lock().await;
        Ok(state.tenants.iter().find(|t| t.email == email).cloned())
    }

    async fn insert_property(&self, property: NewProperty) -> StoreResult<Property> {
        Ok(self.state.lock().await.push_property(property))
    }

    async fn find_property(&self, id: Uuid) -> StoreResult<Option<Property>> {
        let state = self.state.lock().await;
        Ok(state.properties.iter().find(|p| p.id == id).cloned())
    }

    async fn list_properties(&self) -> StoreResult<Vec<Property>> {
        let state = self.state.lock().await;
        let mut properties = state.properties.clone();
        properties.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(properties)
    }

    async fn list_landlord_properties(
        &self,
        landlord_id: Uuid,
        filter: &PropertyFilter,
    ) -> StoreResult<Vec<Property>> {
        let state = self.state.lock().await;
        let mut properties: Vec<Property> = state
            .properties
            .iter()
            .filter(|p| p.landlord_id == landlord_id && filter.matches(p))
            .cloned()
            .collect();
        properties.sort_by(|a, b| filter.compare(a, b));
        Ok(properties)
    }

    async fn find_active_contract_for_property(&self, property_id: Uuid) -> StoreResult<Option<Contract>> {
        let state = self.state.lock().await;
        Ok(state
            .contracts
            .iter()
            .find(|c| c.property_id == property_id && !c.is_deleted)
            .cloned())
    }

    async fn find_contract(&self, id: Uuid) -> StoreResult<Option<ContractDetails>> {
        let state = self.state.lock().await;
        state
            .contracts
            .iter()
            .find(|c| c.id == id && !c.is_deleted)
            .map(|c| state.details(c))
            .transpose()
    }

    async fn list_contracts(&self) -> StoreResult<Vec<ContractDetails>> {
        self.state.lock().await.live_contracts(|_| true)
    }

    async fn list_tenant_contracts(&self, tenant_id: Uuid) -> StoreResult<Vec<ContractDetails>> {
        self.state
            .lock()
            .await
            .live_contracts(move |c| c.tenant_id == tenant_id)
    }

    async fn insert_maintenance(&self, request: NewMaintenanceRequest) -> StoreResult<MaintenanceRequest> {
        let now = Utc::now();
        let request = MaintenanceRequest {
            id: Uuid::new_v4(),
            property_id: request.property_id,
            requested_by: request.requested_by,
            title: request.title,
            description: request.description,
            attachment: request.attachment,
            is_completed: false,
            completed_at: None,
            created_at: now,
            updated_at: now,
        };
        self.state.lock().await.maintenance.push(request.clone());
        Ok(request)
    }

    async fn find_maintenance(&self, id: Uuid) -> StoreResult<Option<MaintenanceRequest>> {
        let state = self.state.lock().await;
        Ok(state.maintenance.iter().find(|m| m.id == id).cloned())
    }

    async fn list_maintenance(&self) -> StoreResult<Vec<MaintenanceRequest>> {
        let state = self.state.lock().await;
        Ok(state.maintenance.iter().rev().cloned().collect())
    }

    async fn list_property_maintenance(
        &self,
        property_id: Uuid,
        is_completed: Option<bool>,
    ) -> StoreResult<Vec<MaintenanceRequest>> {
        let state = self.state.lock().await;
        Ok(state
            .maintenance
            .iter()
            .rev()
            .filter(|m| m.property_id == property_id)
            .filter(|m| is_completed.map_or(true, |flag| m.is_completed == flag))
            .cloned()
            .collect())
    }

    async fn complete_maintenance(&self, id: Uuid, at: DateTime<Utc>) -> StoreResult<MaintenanceRequest> {
        let mut state = self.state.lock().await;
        let request = state
            .maintenance
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| StoreError::NotFound(format!("maintenance request {}", id)))?;
        request.is_completed = true;
        request.completed_at.get_or_insert(at);
        request.updated_at = Utc::now();
        Ok(request.clone())
    }
}

pub struct MemoryTx {
    guard: OwnedMutexGuard<MemoryState>,
    working: MemoryState,
    fail_point: Option<FailPoint>,
}

impl MemoryTx {
    fn check(&self, point: FailPoint) -> StoreResult<()> {
        if self.fail_point == Some(point) {
            return Err(StoreError::Unavailable(format!("injected failure at {:?}", point)));
        }
        Ok(())
    }
}

#[async_trait]
impl StoreTx for MemoryTx {
    async fn find_account_by_email(&mut self, email: &str) -> StoreResult<Option<Account>> {
        Ok(self.working.accounts.iter().find(|a| a.email == email).cloned())
    }

    async fn find_tenant_by_email(&mut self, email: &str) -> StoreResult<Option<TenantProfile>> {
        Ok(self.working.tenants.iter().find(|t| t.email == email).cloned())
    }

    async fn find_tenant_by_account(&mut self, account_id: Uuid) -> StoreResult<Option<TenantProfile>> {
        Ok(self.working.tenants.iter().find(|t| t.account_id == account_id).cloned())
    }

    async fn insert_account(&mut self, account: NewAccount) -> StoreResult<Account> {
        self.check(FailPoint::InsertAccount)?;
        self.working.push_account(account)
    }

    async fn assign_role(&mut self, account_id: Uuid, role: Role) -> StoreResult<Account> {
        self.working.assign_role(account_id, role)
    }

    async fn insert_landlord(&mut self, profile: NewLandlordProfile) -> StoreResult<LandlordProfile> {
        self.working.push_landlord(profile)
    }

    async fn insert_agency(&mut self, profile: NewAgencyProfile) -> StoreResult<AgencyProfile> {
        self.working.push_agency(profile)
    }

    async fn insert_tenant(&mut self, profile: NewTenantProfile) -> StoreResult<TenantProfile> {
        self.check(FailPoint::InsertTenant)?;
        self.working.push_tenant(profile)
    }

    async fn insert_contract(&mut self, contract: NewContract) -> StoreResult<Contract> {
        self.check(FailPoint::InsertContract)?;
        self.working.push_contract(contract)
    }

    async fn soft_delete_contract(&mut self, id: Uuid) -> StoreResult<Contract> {
        let contract = self
            .working
            .contracts
            .iter_mut()
            .find(|c| c.id == id && !c.is_deleted)
            .ok_or_else(|| StoreError::NotFound(format!("contract {}", id)))?;
        contract.is_deleted = true;
        contract.updated_at = Utc::now();
        Ok(contract.clone())
    }

    async fn set_property_contract(
        &mut self,
        property_id: Uuid,
        expires_at: Option<DateTime<Utc>>,
    ) -> StoreResult<Property> {
        self.check(FailPoint::SetPropertyContract)?;
        let property = self.working.property_mut(property_id)?;
        property.is_contract_created = expires_at.is_some();
        property.contract_expires_at = expires_at;
        property.updated_at = Utc::now();
        Ok(property.clone())
    }

    async fn commit(self: Box<Self>) -> StoreResult<()> {
        let MemoryTx {
            mut guard, working, ..
        } = *self;
        *guard = working;
        Ok(())
    }
}
