use uuid::Uuid;

use crate::database::models::{Account, LandlordProfile, Property, Role, TenantProfile};
use crate::database::Store;
use crate::error::ApiError;

pub async fn require_account(store: &dyn Store, account_id: Uuid) -> Result<Account, ApiError> {
    store
        .find_account(account_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))
}

pub async fn require_landlord_profile(
    store: &dyn Store,
    account_id: Uuid,
) -> Result<LandlordProfile, ApiError> {
    store
        .find_landlord_by_account(account_id)
        .await?
        .ok_or_else(|| ApiError::bad_request("Setup your profile as landlord"))
}

pub async fn require_tenant_profile(
    store: &dyn Store,
    account_id: Uuid,
) -> Result<TenantProfile, ApiError> {
    store
        .find_tenant_by_account(account_id)
        .await?
        .ok_or_else(|| ApiError::bad_request("Setup your profile as tenant"))
}

pub async fn require_property(store: &dyn Store, property_id: Uuid) -> Result<Property, ApiError> {
    store
        .find_property(property_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Property not found"))
}

/// Landlords manage the properties they own, agencies the ones assigned to
/// them. Every other role is refused.
pub async fn ensure_property_manager(
    store: &dyn Store,
    account: &Account,
    property: &Property,
) -> Result<(), ApiError> {
    let allowed = match account.role {
        Some(Role::Landlord) => {
            let landlord = store
                .find_landlord_by_account(account.id)
                .await?
                .ok_or_else(|| ApiError::not_found("Landlord not found"))?;
            property.landlord_id == landlord.id
        }
        Some(Role::Agency) => {
            let agency = store
                .find_agency_by_account(account.id)
                .await?
                .ok_or_else(|| ApiError::not_found("Agency not found"))?;
            property.agency_id == Some(agency.id)
        }
        Some(Role::Tenant) | None => false,
    };

    if !allowed {
        tracing::warn!(
            "Account {} ({:?}) does not manage property {}",
            account.id,
            account.role,
            property.id
        );
        return Err(ApiError::forbidden("You are not allowed to manage this property"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures::{seed_account, seed_agency, seed_landlord, seed_property, seed_tenant};
    use crate::testing::MemoryStore;

    #[tokio::test]
    async fn landlord_must_own_the_property() {
        let store = MemoryStore::new();
        let (owner, owner_profile) = seed_landlord(&store, "owner@example.com").await;
        let (other, _) = seed_landlord(&store, "other@example.com").await;
        let property = seed_property(&store, owner_profile.id, "Loft").await;

        assert!(ensure_property_manager(&store, &owner, &property).await.is_ok());
        assert!(matches!(
            ensure_property_manager(&store, &other, &property).await,
            Err(ApiError::Forbidden(_))
        ));
    }

    #[tokio::test]
    async fn agency_must_be_assigned() {
        let store = MemoryStore::new();
        let (_, landlord) = seed_landlord(&store, "owner@example.com").await;
        let (agency_account, agency) = seed_agency(&store, "agency@example.com").await;
        let mut property = seed_property(&store, landlord.id, "Loft").await;

        assert!(ensure_property_manager(&store, &agency_account, &property).await.is_err());

        property.agency_id = Some(agency.id);
        assert!(ensure_property_manager(&store, &agency_account, &property).await.is_ok());
    }

    #[tokio::test]
    async fn tenants_and_roleless_accounts_are_refused() {
        let store = MemoryStore::new();
        let (_, landlord) = seed_landlord(&store, "owner@example.com").await;
        let (tenant, _) = seed_tenant(&store, "tenant@example.com").await;
        let fresh = seed_account(&store, "fresh@example.com").await;
        let property = seed_property(&store, landlord.id, "Loft").await;

        for account in [tenant, fresh] {
            assert!(matches!(
                ensure_property_manager(&store, &account, &property).await,
                Err(ApiError::Forbidden(_))
            ));
        }
    }
}
