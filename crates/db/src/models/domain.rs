//! Domain models and DTOs.
//!
//! A domain maps an inbound hostname to its tenant. Hostnames are stored
//! normalized and are globally unique.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use qrlanding_core::types::{DbId, Timestamp};

/// `domain_type` value for the hostname the service itself runs on.
pub const DOMAIN_TYPE_PLATFORM: &str = "platform";

/// `domain_type` value for a tenant-registered hostname.
pub const DOMAIN_TYPE_CUSTOM: &str = "custom";

/// A row from the `domains` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Domain {
    pub id: DbId,
    pub tenant_id: DbId,
    pub hostname: String,
    pub domain_type: String,
    pub verified: bool,
    pub is_primary: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for registering a domain. The hostname is normalized
/// before it reaches the repository.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDomain {
    pub hostname: String,
    #[serde(alias = "type")]
    pub domain_type: Option<String>,
}
