use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LandlordProfile {
    pub id: Uuid,
    pub account_id: Uuid,
    pub company_name: String,
    pub email: String,
    pub phone: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AgencyProfile {
    pub id: Uuid,
    pub account_id: Uuid,
    pub agency_name: String,
    pub email: String,
    pub phone: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TenantProfile {
    pub id: Uuid,
    pub account_id: Uuid,
    pub full_name: String,
    pub emirates_id: String,
    pub email: String,
    pub phone: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Role-specific profile attached to an account, tagged by role on the wire.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "profile")]
pub enum Profile {
    Landlord(LandlordProfile),
    Agency(AgencyProfile),
    Tenant(TenantProfile),
}

#[derive(Debug, Clone)]
pub struct NewLandlordProfile {
    pub account_id: Uuid,
    pub company_name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, Default)]
pub struct LandlordUpdate {
    pub company_name: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewAgencyProfile {
    pub account_id: Uuid,
    pub agency_name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone)]
pub struct NewTenantProfile {
    pub account_id: Uuid,
    pub full_name: String,
    pub emirates_id: String,
    pub email: String,
    pub phone: String,
}
