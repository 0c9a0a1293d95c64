use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use qrlanding_core::types::{DbId, Timestamp};

/// A row from the `links` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Link {
    pub id: DbId,
    pub qr_code_id: DbId,
    pub title: String,
    pub url: String,
    pub position: i32,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// One entry of a link-list replacement; position is the index in the
/// submitted list.
#[derive(Debug, Clone, Deserialize)]
pub struct LinkInput {
    pub title: String,
    pub url: String,
    pub is_active: Option<bool>,
}
