use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder, Transaction};
use uuid::Uuid;

use crate::database::models::{
    Account, AccountStatus, AgencyProfile, Contract, ContractDetails, LandlordProfile,
    LandlordUpdate, MaintenanceRequest, NewAccount, NewAgencyProfile, NewContract,
    NewLandlordProfile, NewMaintenanceRequest, NewProperty, NewTenantProfile, Property, Role,
    TenantProfile,
};
use crate::database::store::{Store, StoreError, StoreResult, StoreTx};
use crate::filter::PropertyFilter;

/// [`Store`] backed by a Postgres pool
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn with_properties(&self, contracts: Vec<Contract>) -> StoreResult<Vec<ContractDetails>> {
        if contracts.is_empty() {
            return Ok(vec![]);
        }

        let ids: Vec<Uuid> = contracts.iter().map(|c| c.property_id).collect();
        let properties: HashMap<Uuid, Property> =
            sqlx::query_as::<_, Property>("SELECT * FROM properties WHERE id = ANY($1)")
                .bind(&ids)
                .fetch_all(&self.pool)
                .await?
                .into_iter()
                .map(|p| (p.id, p))
                .collect();

        contracts
            .into_iter()
            .map(|contract| {
                let property = properties.get(&contract.property_id).cloned().ok_or_else(|| {
                    StoreError::NotFound(format!("property {} for contract {}", contract.property_id, contract.id))
                })?;
                Ok(ContractDetails { contract, property })
            })
            .collect()
    }
}

#[async_trait]
impl Store for PgStore {
    async fn begin(&self) -> StoreResult<Box<dyn StoreTx>> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(PgTx { tx }))
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn find_account(&self, id: Uuid) -> StoreResult<Option<Account>> {
        let account = sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(account)
    }

    async fn find_account_by_email(&self, email: &str) -> StoreResult<Option<Account>> {
        let account = sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(account)
    }

    async fn insert_account(&self, account: NewAccount) -> StoreResult<Account> {
        let mut conn = self.pool.acquire().await?;
        insert_account_row(&mut conn, account).await
    }

    async fn activate_account(&self, id: Uuid, password_hash: String) -> StoreResult<Account> {
        sqlx::query_as::<_, Account>(
            "UPDATE accounts SET password_hash = $2, status = $3, updated_at = now()
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(password_hash)
        .bind(AccountStatus::Active)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| StoreError::NotFound(format!("account {}", id)))
    }

    async fn find_landlord_by_account(&self, account_id: Uuid) -> StoreResult<Option<LandlordProfile>> {
        let landlord = sqlx::query_as::<_, LandlordProfile>("SELECT * FROM landlords WHERE account_id = $1")
            .bind(account_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(landlord)
    }

    async fn update_landlord(&self, id: Uuid, update: LandlordUpdate) -> StoreResult<LandlordProfile> {
        sqlx::query_as::<_, LandlordProfile>(
            "UPDATE landlords
             SET company_name = COALESCE($2, company_name),
                 phone = COALESCE($3, phone),
                 updated_at = now()
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(update.company_name)
        .bind(update.phone)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| StoreError::NotFound(format!("landlord {}", id)))
    }

    async fn find_agency(&self, id: Uuid) -> StoreResult<Option<AgencyProfile>> {
        let agency = sqlx::query_as::<_, AgencyProfile>("SELECT * FROM agencies WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(agency)
    }

    async fn find_agency_by_account(&self, account_id: Uuid) -> StoreResult<Option<AgencyProfile>> {
        let agency = sqlx::query_as::<_, AgencyProfile>("SELECT * FROM agencies WHERE account_id = $1")
            .bind(account_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(agency)
    }

    async fn find_tenant_by_account(&self, account_id: Uuid) -> StoreResult<Option<TenantProfile>> {
        let tenant = sqlx::query_as::<_, TenantProfile>("SELECT * FROM tenants WHERE account_id = $1")
            .bind(account_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(tenant)
    }

    async fn find_tenant_by_email(&self, email: &str) -> StoreResult<Option<TenantProfile>> {
        let tenant = sqlx::query_as::<_, TenantProfile>("SELECT * FROM tenants WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(tenant)
    }

    async fn insert_property(&self, property: NewProperty) -> StoreResult<Property> {
        let property = sqlx::query_as::<_, Property>(
            "INSERT INTO properties
                (id, landlord_id, agency_id, title, address, city, area, property_type, bedrooms, rent_amount)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(property.landlord_id)
        .bind(property.agency_id)
        .bind(property.title)
        .bind(property.address)
        .bind(property.city)
        .bind(property.area)
        .bind(property.property_type)
        .bind(property.bedrooms)
        .bind(property.rent_amount)
        .fetch_one(&self.pool)
        .await?;
        Ok(property)
    }

    async fn find_property(&self, id: Uuid) -> StoreResult<Option<Property>> {
        let property = sqlx::query_as::<_, Property>("SELECT * FROM properties WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(property)
    }

    async fn list_properties(&self) -> StoreResult<Vec<Property>> {
        let properties = sqlx::query_as::<_, Property>("SELECT * FROM properties ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(properties)
    }

    async fn list_landlord_properties(
        &self,
        landlord_id: Uuid,
        filter: &PropertyFilter,
    ) -> StoreResult<Vec<Property>> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM properties WHERE landlord_id = ");
        qb.push_bind(landlord_id);
        filter.push_where(&mut qb);
        filter.push_order(&mut qb);

        let properties = qb.build_query_as::<Property>().fetch_all(&self.pool).await?;
        Ok(properties)
    }

    async fn find_active_contract_for_property(&self, property_id: Uuid) -> StoreResult<Option<Contract>> {
        let contract = sqlx::query_as::<_, Contract>(
            "SELECT * FROM contracts WHERE property_id = $1 AND NOT is_deleted",
        )
        .bind(property_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(contract)
    }

    async fn find_contract(&self, id: Uuid) -> StoreResult<Option<ContractDetails>> {
        let contract = sqlx::query_as::<_, Contract>("SELECT * FROM contracts WHERE id = $1 AND NOT is_deleted")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match contract {
            Some(contract) => Ok(self.with_properties(vec![contract]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn list_contracts(&self) -> StoreResult<Vec<ContractDetails>> {
        let contracts = sqlx::query_as::<_, Contract>(
            "SELECT * FROM contracts WHERE NOT is_deleted ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        self.with_properties(contracts).await
    }

    async fn list_tenant_contracts(&self, tenant_id: Uuid) -> StoreResult<Vec<ContractDetails>> {
        let contracts = sqlx::query_as::<_, Contract>(
            "SELECT * FROM contracts WHERE tenant_id = $1 AND NOT is_deleted ORDER BY created_at DESC",
        )
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await?;
        self.with_properties(contracts).await
    }

    async fn insert_maintenance(&self, request: NewMaintenanceRequest) -> StoreResult<MaintenanceRequest> {
        let request = sqlx::query_as::<_, MaintenanceRequest>(
            "INSERT INTO maintenance_requests (id, property_id, requested_by, title, description, attachment)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(request.property_id)
        .bind(request.requested_by)
        .bind(request.title)
        .bind(request.description)
        .bind(request.attachment)
        .fetch_one(&self.pool)
        .await?;
        Ok(request)
    }

    async fn find_maintenance(&self, id: Uuid) -> StoreResult<Option<MaintenanceRequest>> {
        let request = sqlx::query_as::<_, MaintenanceRequest>("SELECT * FROM maintenance_requests WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(request)
    }

    async fn list_maintenance(&self) -> StoreResult<Vec<MaintenanceRequest>> {
        let requests = sqlx::query_as::<_, MaintenanceRequest>(
            "SELECT * FROM maintenance_requests ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(requests)
    }

    async fn list_property_maintenance(
        &self,
        property_id: Uuid,
        is_completed: Option<bool>,
    ) -> StoreResult<Vec<MaintenanceRequest>> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM maintenance_requests WHERE property_id = ");
        qb.push_bind(property_id);
        if let Some(flag) = is_completed {
            qb.push(" AND is_completed = ").push_bind(flag);
        }
        qb.push(" ORDER BY created_at DESC");

        let requests = qb.build_query_as::<MaintenanceRequest>().fetch_all(&self.pool).await?;
        Ok(requests)
    }

    async fn complete_maintenance(&self, id: Uuid, at: DateTime<Utc>) -> StoreResult<MaintenanceRequest> {
        sqlx::query_as::<_, MaintenanceRequest>(
            "UPDATE maintenance_requests
             SET is_completed = true, completed_at = COALESCE(completed_at, $2), updated_at = now()
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(at)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| StoreError::NotFound(format!("maintenance request {}", id)))
    }
}

async fn insert_account_row(conn: &mut sqlx::PgConnection, account: NewAccount) -> StoreResult<Account> {
    let account = sqlx::query_as::<_, Account>(
        "INSERT INTO accounts (id, email, password_hash, role, status, is_profile_set_up)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(account.email)
    .bind(account.password_hash)
    .bind(account.role)
    .bind(account.status)
    .bind(account.is_profile_set_up)
    .fetch_one(conn)
    .await?;
    Ok(account)
}

/// Open Postgres transaction; rolled back on drop unless committed
pub struct PgTx {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl StoreTx for PgTx {
    async fn find_account_by_email(&mut self, email: &str) -> StoreResult<Option<Account>> {
        let account = sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE email = $1 FOR UPDATE")
            .bind(email)
            .fetch_optional(&mut *self.tx)
            .await?;
        Ok(account)
    }

    async fn find_tenant_by_email(&mut self, email: &str) -> StoreResult<Option<TenantProfile>> {
        let tenant = sqlx::query_as::<_, TenantProfile>("SELECT * FROM tenants WHERE email = $1")
            .bind(email)
            .fetch_optional(&mut *self.tx)
            .await?;
        Ok(tenant)
    }

    async fn find_tenant_by_account(&mut self, account_id: Uuid) -> StoreResult<Option<TenantProfile>> {
        let tenant = sqlx::query_as::<_, TenantProfile>("SELECT * FROM tenants WHERE account_id = $1")
            .bind(account_id)
            .fetch_optional(&mut *self.tx)
            .await?;
        Ok(tenant)
    }

    async fn insert_account(&mut self, account: NewAccount) -> StoreResult<Account> {
        insert_account_row(&mut self.tx, account).await
    }

    async fn assign_role(&mut self, account_id: Uuid, role: Role) -> StoreResult<Account> {
        sqlx::query_as::<_, Account>(
            "UPDATE accounts SET role = $2, is_profile_set_up = true, updated_at = now()
             WHERE id = $1
             RETURNING *",
        )
        .bind(account_id)
        .bind(role)
        .fetch_optional(&mut *self.tx)
        .await?
        .ok_or_else(|| StoreError::NotFound(format!("account {}", account_id)))
    }

    async fn insert_landlord(&mut self, profile: NewLandlordProfile) -> StoreResult<LandlordProfile> {
        let landlord = sqlx::query_as::<_, LandlordProfile>(
            "INSERT INTO landlords (id, account_id, company_name, email, phone)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(profile.account_id)
        .bind(profile.company_name)
        .bind(profile.email)
        .bind(profile.phone)
        .fetch_one(&mut *self.tx)
        .await?;
        Ok(landlord)
    }

    async fn insert_agency(&mut self, profile: NewAgencyProfile) -> StoreResult<AgencyProfile> {
        let agency = sqlx::query_as::<_, AgencyProfile>(
            "INSERT INTO agencies (id, account_id, agency_name, email, phone)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(profile.account_id)
        .bind(profile.agency_name)
        .bind(profile.email)
        .bind(profile.phone)
        .fetch_one(&mut *self.tx)
        .await?;
        Ok(agency)
    }

    async fn insert_tenant(&mut self, profile: NewTenantProfile) -> StoreResult<TenantProfile> {
        let tenant = sqlx::query_as::<_, TenantProfile>(
            "INSERT INTO tenants (id, account_id, full_name, emirates_id, email, phone)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(profile.account_id)
        .bind(profile.full_name)
        .bind(profile.emirates_id)
        .bind(profile.email)
        .bind(profile.phone)
        .fetch_one(&mut *self.tx)
        .await?;
        Ok(tenant)
    }

    async fn insert_contract(&mut self, contract: NewContract) -> StoreResult<Contract> {
        let contract = sqlx::query_as::<_, Contract>(
            "INSERT INTO contracts (id, property_id, tenant_id, tenant_name, emirates_id, email, mobile)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(contract.property_id)
        .bind(contract.tenant_id)
        .bind(contract.tenant_name)
        .bind(contract.emirates_id)
        .bind(contract.email)
        .bind(contract.mobile)
        .fetch_one(&mut *self.tx)
        .await?;
        Ok(contract)
    }

    async fn soft_delete_contract(&mut self, id: Uuid) -> StoreResult<Contract> {
        sqlx::query_as::<_, Contract>(
            "UPDATE contracts SET is_deleted = true, updated_at = now()
             WHERE id = $1 AND NOT is_deleted
             RETURNING *",
        )
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await?
        .ok_or_else(|| StoreError::NotFound(format!("contract {}", id)))
    }

    async fn set_property_contract(
        &mut self,
        property_id: Uuid,
        expires_at: Option<DateTime<Utc>>,
    ) -> StoreResult<Property> {
        sqlx::query_as::<_, Property>(
            "UPDATE properties
             SET is_contract_created = $2, contract_expires_at = $3, updated_at = now()
             WHERE id = $1
             RETURNING *",
        )
        .bind(property_id)
        .bind(expires_at.is_some())
        .bind(expires_at)
        .fetch_optional(&mut *self.tx)
        .await?
        .ok_or_else(|| StoreError::NotFound(format!("property {}", property_id)))
    }

    async fn commit(self: Box<Self>) -> StoreResult<()> {
        self.tx.commit().await?;
        Ok(())
    }
}
