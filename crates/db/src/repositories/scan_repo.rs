//! Repository for the `scans` table.

use sqlx::PgPool;
use qrlanding_core::types::DbId;

use crate::models::scan::{NewScan, Scan, ScanSummary};

/// Column list for `scans` queries.
const COLUMNS: &str = "id, qr_code_id, ip_hash, user_agent, referer, created_at";

/// Provides data access for scan events.
pub struct ScanRepo;

impl ScanRepo {
    pub async fn record(
        pool: &PgPool,
        qr_code_id: DbId,
        scan: &NewScan,
    ) -> Result<Scan, sqlx::Error> {
        let query = format!(
            "INSERT INTO scans (qr_code_id, ip_hash, user_agent, referer) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Scan>(&query)
            .bind(qr_code_id)
            .bind(&scan.ip_hash)
            .bind(&scan.user_agent)
            .bind(&scan.referer)
            .fetch_one(pool)
            .await
    }

    /// Total scans, scans in the last seven days, and the latest scan time.
    pub async fn summary(pool: &PgPool, qr_code_id: DbId) -> Result<ScanSummary, sqlx::Error> {
        sqlx::query_as::<_, ScanSummary>(
            "SELECT \
                 COUNT(*) AS total_scans, \
                 COUNT(*) FILTER (WHERE created_at > NOW() - INTERVAL '7 days') \
                     AS scans_last_7_days, \
                 MAX(created_at) AS last_scanned_at \
             FROM scans WHERE qr_code_id = $1",
        )
        .bind(qr_code_id)
        .fetch_one(pool)
        .await
    }
}
