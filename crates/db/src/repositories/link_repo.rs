//! Repository for the `links` table.

use sqlx::PgPool;
use qrlanding_core::types::DbId;

use crate::models::link::{Link, LinkInput};

/// Column list for `links` queries.
const COLUMNS: &str = "\
    id, qr_code_id, title, url, position, is_active, created_at, updated_at";

/// Provides data access for link-list entries.
pub struct LinkRepo;

impl LinkRepo {
    /// All links of a QR code in display order.
    pub async fn list_for_qr_code(
        pool: &PgPool,
        qr_code_id: DbId,
    ) -> Result<Vec<Link>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM links WHERE qr_code_id = $1 ORDER BY position ASC"
        );
        sqlx::query_as::<_, Link>(&query)
            .bind(qr_code_id)
            .fetch_all(pool)
            .await
    }

    /// Active links only, as shown on the public page.
    pub async fn list_active(pool: &PgPool, qr_code_id: DbId) -> Result<Vec<Link>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM links \
             WHERE qr_code_id = $1 AND is_active = true \
             ORDER BY position ASC"
        );
        sqlx::query_as::<_, Link>(&query)
            .bind(qr_code_id)
            .fetch_all(pool)
            .await
    }

    /// Replace the whole link list in one transaction. Positions follow
    /// the order of `links`.
    pub async fn replace_all(
        pool: &PgPool,
        qr_code_id: DbId,
        links: &[LinkInput],
    ) -> Result<Vec<Link>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM links WHERE qr_code_id = $1")
            .bind(qr_code_id)
            .execute(&mut *tx)
            .await?;

        let query = format!(
            "INSERT INTO links (qr_code_id, title, url, position, is_active) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        let mut inserted = Vec::with_capacity(links.len());
        for (position, link) in links.iter().enumerate() {
            let row = sqlx::query_as::<_, Link>(&query)
                .bind(qr_code_id)
                .bind(&link.title)
                .bind(&link.url)
                .bind(position as i32)
                .bind(link.is_active.unwrap_or(true))
                .fetch_one(&mut *tx)
                .await?;
            inserted.push(row);
        }

        tx.commit().await?;
        Ok(inserted)
    }
}
