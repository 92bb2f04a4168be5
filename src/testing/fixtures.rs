use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::auth::{generate_jwt, Claims};
use crate::config::AppConfig;
use crate::database::models::{
    Account, AccountStatus, AgencyProfile, LandlordProfile, NewAccount, NewAgencyProfile,
    NewLandlordProfile, NewProperty, NewTenantProfile, Property, Role, TenantProfile,
};
use crate::state::AppState;

use super::memory_store::MemoryStore;

pub fn account_fixture(email: &str, role: Option<Role>) -> Account {
    let now = Utc::now();
    Account {
        id: Uuid::new_v4(),
        email: email.to_string(),
        password_hash: None,
        role,
        status: AccountStatus::Active,
        is_profile_set_up: role.is_some(),
        created_at: now,
        updated_at: now,
    }
}

pub fn property_fixture(title: &str) -> Property {
    let now = Utc::now();
    Property {
        id: Uuid::new_v4(),
        landlord_id: Uuid::new_v4(),
        agency_id: None,
        title: title.to_string(),
        address: "12 Marina Walk".to_string(),
        city: "Dubai".to_string(),
        area: None,
        property_type: "apartment".to_string(),
        bedrooms: 2,
        rent_amount: 9_000_000,
        is_contract_created: false,
        contract_expires_at: None,
        created_at: now,
        updated_at: now,
    }
}

pub fn new_property(landlord_id: Uuid, title: &str) -> NewProperty {
    NewProperty {
        landlord_id,
        agency_id: None,
        title: title.to_string(),
        address: "12 Marina Walk".to_string(),
        city: "Dubai".to_string(),
        area: None,
        property_type: "apartment".to_string(),
        bedrooms: 2,
        rent_amount: 9_000_000,
    }
}

pub fn test_state(store: &MemoryStore) -> AppState {
    AppState::new(Arc::new(store.clone()), AppConfig::for_tests())
}

pub fn bearer(state: &AppState, account: &Account) -> String {
    let claims = Claims::for_account(account, 1);
    let token = generate_jwt(&claims, &state.config.security.jwt_secret).unwrap();
    format!("Bearer {}", token)
}

/// Active account with no role yet
pub async fn seed_account(store: &MemoryStore, email: &str) -> Account {
    store
        .with_state(|s| s.push_account(NewAccount::registered(email, "unused".into())))
        .await
        .unwrap()
}

async fn seed_with_role(store: &MemoryStore, email: &str, role: Role) -> Account {
    let mut account = seed_account(store, email).await;
    store
        .with_state(|s| {
            let stored = s.accounts.iter_mut().find(|a| a.id == account.id).unwrap();
            stored.role = Some(role);
            stored.is_profile_set_up = true;
        })
        .await;
    account.role = Some(role);
    account.is_profile_set_up = true;
    account
}

pub async fn seed_landlord(store: &MemoryStore, email: &str) -> (Account, LandlordProfile) {
    let account = seed_with_role(store, email, Role::Landlord).await;
    let profile = store
        .with_state(|s| {
            s.push_landlord(NewLandlordProfile {
                account_id: account.id,
                company_name: "Acme Holdings".into(),
                email: email.to_string(),
                phone: "0501234567".into(),
            })
        })
        .await
        .unwrap();
    (account, profile)
}

pub async fn seed_agency(store: &MemoryStore, email: &str) -> (Account, AgencyProfile) {
    let account = seed_with_role(store, email, Role::Agency).await;
    let profile = store
        .with_state(|s| {
            s.push_agency(NewAgencyProfile {
                account_id: account.id,
                agency_name: "Keys Realty".into(),
                email: email.to_string(),
                phone: "0507654321".into(),
            })
        })
        .await
        .unwrap();
    (account, profile)
}

pub async fn seed_tenant(store: &MemoryStore, email: &str) -> (Account, TenantProfile) {
    let account = seed_with_role(store, email, Role::Tenant).await;
    let profile = store
        .with_state(|s| {
            s.push_tenant(NewTenantProfile {
                account_id: account.id,
                full_name: "Sam Renter".into(),
                emirates_id: "784-1990-1234567-1".into(),
                email: email.to_string(),
                phone: "0551112222".into(),
            })
        })
        .await
        .unwrap();
    (account, profile)
}

pub async fn seed_property(store: &MemoryStore, landlord_id: Uuid, title: &str) -> Property {
    store
        .with_state(|s| s.push_property(new_property(landlord_id, title)))
        .await
}
