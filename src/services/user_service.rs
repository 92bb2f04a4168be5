use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::auth::{generate_jwt, hash_password, verify_password, Claims};
use crate::config::SecurityConfig;
use crate::database::models::{Account, AccountStatus, NewAccount, Profile, Role};
use crate::database::Store;
use crate::error::ApiError;

use super::access::require_account;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CredentialsRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    /// Proves ownership of a pending tenant account on registration
    #[serde(default)]
    pub emirates_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub account: Account,
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub account: Account,
    pub profile: Option<Profile>,
}

pub struct UserService {
    store: Arc<dyn Store>,
}

impl UserService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Registers a new account, or claims a pending one created for a tenant.
    /// Claiming requires the Emirates ID recorded on the tenant's profile.
    pub async fn register(&self, request: CredentialsRequest) -> Result<Account, ApiError> {
        let password_hash = hash_password(&request.password).map_err(|e| {
            tracing::error!("{}", e);
            ApiError::internal_server_error("Failed to process password")
        })?;

        match self.store.find_account_by_email(&request.email).await? {
            Some(existing) if existing.status == AccountStatus::Active => {
                Err(ApiError::conflict("User already exists"))
            }
            Some(pending) => {
                let tenant = self.store.find_tenant_by_account(pending.id).await?;
                let proven = match (tenant, request.emirates_id.as_deref()) {
                    (Some(tenant), Some(given)) => tenant.emirates_id.trim() == given.trim(),
                    _ => false,
                };
                if !proven {
                    tracing::warn!("Rejected claim of pending account {}", pending.id);
                    return Err(ApiError::forbidden(
                        "Provide the Emirates ID from your contract to claim this account",
                    ));
                }

                let account = self
                    .store
                    .activate_account(pending.id, password_hash)
                    .await?;
                tracing::info!("Pending account {} claimed by registration", account.id);
                Ok(account)
            }
            None => {
                let account = self
                    .store
                    .insert_account(NewAccount::registered(request.email, password_hash))
                    .await?;
                tracing::info!("Registered account {}", account.id);
                Ok(account)
            }
        }
    }

    pub async fn login(
        &self,
        request: CredentialsRequest,
        security: &SecurityConfig,
    ) -> Result<LoginResponse, ApiError> {
        let invalid = || ApiError::unauthorized("Invalid email or password");

        let account = self
            .store
            .find_account_by_email(&request.email)
            .await?
            .ok_or_else(invalid)?;

        if account.status == AccountStatus::Pending {
            return Err(ApiError::forbidden(
                "Account has not been activated; register with this email to claim it",
            ));
        }

        let verified = account
            .password_hash
            .as_deref()
            .is_some_and(|hash| verify_password(&request.password, hash));
        if !verified {
            tracing::warn!("Failed login for account {}", account.id);
            return Err(invalid());
        }

        let claims = Claims::for_account(&account, security.jwt_expiry_hours);
        let token = generate_jwt(&claims, &security.jwt_secret).map_err(|e| {
            tracing::error!("{}", e);
            ApiError::internal_server_error("Failed to issue token")
        })?;

        Ok(LoginResponse { token, account })
    }

    pub async fn me(&self, account_id: Uuid) -> Result<MeResponse, ApiError> {
        let store = self.store.as_ref();
        let account = require_account(store, account_id).await?;

        let profile = match account.role {
            Some(Role::Landlord) => store
                .find_landlord_by_account(account.id)
                .await?
                .map(Profile::Landlord),
            Some(Role::Agency) => store
                .find_agency_by_account(account.id)
                .await?
                .map(Profile::Agency),
            Some(Role::Tenant) => store
                .find_tenant_by_account(account.id)
                .await?
                .map(Profile::Tenant),
            None => None,
        };

        Ok(MeResponse { account, profile })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::database::models::NewTenantProfile;
    use crate::testing::fixtures::seed_landlord;
    use crate::testing::MemoryStore;

    fn credentials(email: &str, password: &str) -> CredentialsRequest {
        CredentialsRequest {
            email: email.into(),
            password: password.into(),
            emirates_id: None,
        }
    }

    #[test]
    fn short_passwords_fail_validation() {
        assert!(credentials("a@example.com", "short").validate().is_err());
        assert!(credentials("not-an-email", "long enough").validate().is_err());
        assert!(credentials("a@example.com", "long enough").validate().is_ok());
    }

    #[tokio::test]
    async fn register_then_login() {
        let store = MemoryStore::new();
        let users = UserService::new(Arc::new(store.clone()));
        let config = AppConfig::for_tests();

        let account = users
            .register(credentials("new@example.com", "password123"))
            .await
            .unwrap();
        assert_eq!(account.role, None);
        assert!(!account.is_profile_set_up);

        assert!(matches!(
            users.register(credentials("new@example.com", "password123")).await,
            Err(ApiError::Conflict(_))
        ));

        let login = users
            .login(credentials("new@example.com", "password123"), &config.security)
            .await
            .unwrap();
        let claims = crate::auth::validate_jwt(&login.token, &config.security.jwt_secret).unwrap();
        assert_eq!(claims.sub, account.id);

        assert!(matches!(
            users
                .login(credentials("new@example.com", "wrong-password"), &config.security)
                .await,
            Err(ApiError::Unauthorized(_))
        ));
        assert!(matches!(
            users
                .login(credentials("nobody@example.com", "password123"), &config.security)
                .await,
            Err(ApiError::Unauthorized(_))
        ));
    }

    #[tokio::test]
    async fn pending_accounts_cannot_login_until_claimed() {
        let store = MemoryStore::new();
        let users = UserService::new(Arc::new(store.clone()));
        let config = AppConfig::for_tests();
        let pending = store
            .with_state(|s| {
                let account = s.push_account(NewAccount::pending_tenant("tenant@example.com"))?;
                s.push_tenant(NewTenantProfile {
                    account_id: account.id,
                    full_name: "Sam Renter".into(),
                    emirates_id: "784-1990-1234567-1".into(),
                    email: "tenant@example.com".into(),
                    phone: "0551112222".into(),
                })?;
                Ok::<_, crate::database::StoreError>(account)
            })
            .await
            .unwrap();

        assert!(matches!(
            users
                .login(credentials("tenant@example.com", "password123"), &config.security)
                .await,
            Err(ApiError::Forbidden(_))
        ));

        assert!(matches!(
            users.register(credentials("tenant@example.com", "password123")).await,
            Err(ApiError::Forbidden(_))
        ));
        let mut wrong_id = credentials("tenant@example.com", "password123");
        wrong_id.emirates_id = Some("784-0000-0000000-0".into());
        assert!(matches!(users.register(wrong_id).await, Err(ApiError::Forbidden(_))));
        assert_eq!(
            store.snapshot().await.accounts[0].status,
            AccountStatus::Pending
        );

        let mut claim = credentials("tenant@example.com", "password123");
        claim.emirates_id = Some("784-1990-1234567-1".into());
        let claimed = users.register(claim).await.unwrap();
        assert_eq!(claimed.id, pending.id);
        assert_eq!(claimed.status, AccountStatus::Active);
        assert_eq!(claimed.role, Some(Role::Tenant));

        users
            .login(credentials("tenant@example.com", "password123"), &config.security)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn me_includes_the_profile() {
        let store = MemoryStore::new();
        let users = UserService::new(Arc::new(store.clone()));
        let (account, landlord) = seed_landlord(&store, "owner@example.com").await;

        let me = users.me(account.id).await.unwrap();
        assert!(matches!(me.profile, Some(Profile::Landlord(ref p)) if p.id == landlord.id));

        let json = serde_json::to_value(&me).unwrap();
        assert_eq!(json["profile"]["type"], "Landlord");
        assert!(json["account"].get("password_hash").is_none());

        assert!(matches!(users.me(Uuid::new_v4()).await, Err(ApiError::NotFound(_))));
    }
}
