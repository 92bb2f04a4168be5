use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MaintenanceRequest {
    pub id: Uuid,
    pub property_id: Uuid,
    pub requested_by: Uuid,
    pub title: String,
    pub description: String,
    /// Stored file name under the upload directory
    pub attachment: Option<String>,
    pub is_completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewMaintenanceRequest {
    pub property_id: Uuid,
    pub requested_by: Uuid,
    pub title: String,
    pub description: String,
    pub attachment: Option<String>,
}
