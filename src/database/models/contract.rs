use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::property::Property;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Contract {
    pub id: Uuid,
    pub property_id: Uuid,
    pub tenant_id: Uuid,
    pub tenant_name: String,
    pub emirates_id: String,
    pub email: String,
    pub mobile: String,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Contract with its property relation loaded
#[derive(Debug, Clone, Serialize)]
pub struct ContractDetails {
    #[serde(flatten)]
    pub contract: Contract,
    pub property: Property,
}

#[derive(Debug, Clone)]
pub struct NewContract {
    pub property_id: Uuid,
    pub tenant_id: Uuid,
    pub tenant_name: String,
    pub emirates_id: String,
    pub email: String,
    pub mobile: String,
}
