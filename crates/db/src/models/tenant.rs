use serde::Serialize;
use sqlx::FromRow;
use qrlanding_core::types::{DbId, Timestamp};

/// A row from the `tenants` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Tenant {
    pub id: DbId,
    pub owner_user_id: String,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
