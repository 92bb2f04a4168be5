use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Property {
    pub id: Uuid,
    pub landlord_id: Uuid,
    pub agency_id: Option<Uuid>,
    pub title: String,
    pub address: String,
    pub city: String,
    pub area: Option<String>,
    pub property_type: String,
    pub bedrooms: i32,
    /// Rent in minor currency units
    pub rent_amount: i64,
    pub is_contract_created: bool,
    pub contract_expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewProperty {
    pub landlord_id: Uuid,
    pub agency_id: Option<Uuid>,
    pub title: String,
    pub address: String,
    pub city: String,
    pub area: Option<String>,
    pub property_type: String,
    pub bedrooms: i32,
    pub rent_amount: i64,
}
