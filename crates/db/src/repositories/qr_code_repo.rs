//! Repository for the `qr_codes` table.

use sqlx::PgPool;
use qrlanding_core::qr_style::VisualConfig;
use qrlanding_core::types::DbId;

use crate::models::qr_code::QrCode;

/// Column list for `qr_codes` queries.
const COLUMNS: &str = "\
    id, tenant_id, short_code, title, redirect_type, redirect_url, \
    logo_url, logo_shape, logo_size_percent, corner_radius_level, \
    module_color, background_color, error_correction, is_active, \
    created_at, updated_at";

/// Provides data access for QR codes.
pub struct QrCodeRepo;

impl QrCodeRepo {
    /// Insert a QR code with default styling.
    ///
    /// A short-code collision surfaces as a unique violation on
    /// `uq_qr_codes_short_code`; callers retry with a fresh code.
    pub async fn create(
        pool: &PgPool,
        tenant_id: DbId,
        short_code: &str,
        title: &str,
    ) -> Result<QrCode, sqlx::Error> {
        let query = format!(
            "INSERT INTO qr_codes (tenant_id, short_code, title) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, QrCode>(&query)
            .bind(tenant_id)
            .bind(short_code)
            .bind(title)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<QrCode>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM qr_codes WHERE id = $1");
        sqlx::query_as::<_, QrCode>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Look up an active QR code, optionally restricted to one tenant.
    pub async fn find_active_by_short_code(
        pool: &PgPool,
        short_code: &str,
        tenant_id: Option<DbId>,
    ) -> Result<Option<QrCode>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM qr_codes \
             WHERE short_code = $1 AND is_active = true \
               AND ($2::BIGINT IS NULL OR tenant_id = $2)"
        );
        sqlx::query_as::<_, QrCode>(&query)
            .bind(short_code)
            .bind(tenant_id)
            .fetch_optional(pool)
            .await
    }

    /// List a tenant's QR codes, newest first.
    pub async fn list_for_tenant(
        pool: &PgPool,
        tenant_id: DbId,
    ) -> Result<Vec<QrCode>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM qr_codes \
             WHERE tenant_id = $1 \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, QrCode>(&query)
            .bind(tenant_id)
            .fetch_all(pool)
            .await
    }

    /// Persist a complete, already validated visual configuration.
    pub async fn update_style(
        pool: &PgPool,
        id: DbId,
        config: &VisualConfig,
    ) -> Result<Option<QrCode>, sqlx::Error> {
        let query = format!(
            "UPDATE qr_codes SET \
                 logo_size_percent = $2, \
                 corner_radius_level = $3, \
                 module_color = $4, \
                 background_color = $5, \
                 error_correction = $6 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, QrCode>(&query)
            .bind(id)
            .bind(config.logo_size_percent)
            .bind(config.corner_radius_level)
            .bind(config.module_color.as_str())
            .bind(config.background_color.as_str())
            .bind(config.error_correction.name())
            .fetch_optional(pool)
            .await
    }

    pub async fn update_destination(
        pool: &PgPool,
        id: DbId,
        redirect_type: &str,
        redirect_url: Option<&str>,
    ) -> Result<Option<QrCode>, sqlx::Error> {
        let query = format!(
            "UPDATE qr_codes SET redirect_type = $2, redirect_url = $3 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, QrCode>(&query)
            .bind(id)
            .bind(redirect_type)
            .bind(redirect_url)
            .fetch_optional(pool)
            .await
    }

    /// Set or clear the logo URL.
    pub async fn update_logo(
        pool: &PgPool,
        id: DbId,
        logo_url: Option<&str>,
    ) -> Result<Option<QrCode>, sqlx::Error> {
        let query = format!(
            "UPDATE qr_codes SET logo_url = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, QrCode>(&query)
            .bind(id)
            .bind(logo_url)
            .fetch_optional(pool)
            .await
    }

    pub async fn update_logo_shape(
        pool: &PgPool,
        id: DbId,
        logo_shape: &str,
    ) -> Result<Option<QrCode>, sqlx::Error> {
        let query = format!(
            "UPDATE qr_codes SET logo_shape = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, QrCode>(&query)
            .bind(id)
            .bind(logo_shape)
            .fetch_optional(pool)
            .await
    }
}
