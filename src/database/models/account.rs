use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Role tag carried by an account once a profile has been set up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "account_role")]
pub enum Role {
    Landlord,
    Agency,
    Tenant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Landlord => "Landlord",
            Role::Agency => "Agency",
            Role::Tenant => "Tenant",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `Pending` accounts were created by the system (e.g. a tenant added to a
/// contract) and have no credential until their owner registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "account_status")]
pub enum AccountStatus {
    Active,
    Pending,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Account {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    pub role: Option<Role>,
    pub status: AccountStatus,
    pub is_profile_set_up: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    pub fn has_role(&self, role: Role) -> bool {
        self.role == Some(role)
    }
}

#[derive(Debug, Clone)]
pub struct NewAccount {
    pub email: String,
    pub password_hash: Option<String>,
    pub role: Option<Role>,
    pub status: AccountStatus,
    pub is_profile_set_up: bool,
}

impl NewAccount {
    /// Self-registered account with a credential and no role yet.
    pub fn registered(email: impl Into<String>, password_hash: String) -> Self {
        Self {
            email: email.into(),
            password_hash: Some(password_hash),
            role: None,
            status: AccountStatus::Active,
            is_profile_set_up: false,
        }
    }

    /// Tenant account created on someone else's behalf, not yet claimed.
    pub fn pending_tenant(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password_hash: None,
            role: Some(Role::Tenant),
            status: AccountStatus::Pending,
            is_profile_set_up: true,
        }
    }
}
