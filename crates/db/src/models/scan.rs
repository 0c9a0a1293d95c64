use serde::Serialize;
use sqlx::FromRow;
use qrlanding_core::types::{DbId, Timestamp};

/// A row from the `scans` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Scan {
    pub id: DbId,
    pub qr_code_id: DbId,
    pub ip_hash: Option<String>,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
    pub created_at: Timestamp,
}

/// Data captured for one scan.
#[derive(Debug, Clone, Default)]
pub struct NewScan {
    pub ip_hash: Option<String>,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
}

/// Aggregate scan counts for one QR code.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ScanSummary {
    pub total_scans: i64,
    pub scans_last_7_days: i64,
    pub last_scanned_at: Option<Timestamp>,
}
