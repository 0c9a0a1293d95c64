//! Repository for the `domains` table.
//!
//! Primary-domain state is only changed through [`DomainRepo::create`]
//! (first domain of a tenant), [`DomainRepo::ensure_platform_primary`] and
//! [`DomainRepo::set_primary`]. The partial unique index
//! `uq_domains_tenant_primary` backs all three.

use sqlx::PgPool;
use qrlanding_core::types::DbId;

use crate::models::domain::Domain;

/// Column list for `domains` queries.
const COLUMNS: &str = "\
    id, tenant_id, hostname, domain_type, verified, is_primary, \
    created_at, updated_at";

/// Provides data access for tenant domains.
pub struct DomainRepo;

impl DomainRepo {
    /// Exact-match lookup of an already normalized hostname.
    pub async fn find_by_hostname(
        pool: &PgPool,
        hostname: &str,
    ) -> Result<Option<Domain>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM domains WHERE hostname = $1");
        sqlx::query_as::<_, Domain>(&query)
            .bind(hostname)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Domain>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM domains WHERE id = $1");
        sqlx::query_as::<_, Domain>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a tenant's domains, primary first, then oldest first.
    pub async fn list_for_tenant(
        pool: &PgPool,
        tenant_id: DbId,
    ) -> Result<Vec<Domain>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM domains \
             WHERE tenant_id = $1 \
             ORDER BY is_primary DESC, created_at ASC, id ASC"
        );
        sqlx::query_as::<_, Domain>(&query)
            .bind(tenant_id)
            .fetch_all(pool)
            .await
    }

    /// The tenant's primary domain, if it has any domains.
    pub async fn find_primary(
        pool: &PgPool,
        tenant_id: DbId,
    ) -> Result<Option<Domain>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM domains WHERE tenant_id = $1 AND is_primary = true"
        );
        sqlx::query_as::<_, Domain>(&query)
            .bind(tenant_id)
            .fetch_optional(pool)
            .await
    }

    /// Register a normalized hostname for a tenant.
    ///
    /// The first domain a tenant registers becomes its primary. A taken
    /// hostname fails with a unique violation on `uq_domains_hostname`.
    pub async fn create(
        pool: &PgPool,
        tenant_id: DbId,
        hostname: &str,
        domain_type: &str,
    ) -> Result<Domain, sqlx::Error> {
        match Self::insert(pool, tenant_id, hostname, domain_type, true).await {
            // A concurrent first insert claimed primary after our check.
            Err(e) if violates(&e, "uq_domains_tenant_primary") => {
                Self::insert(pool, tenant_id, hostname, domain_type, false).await
            }
            result => result,
        }
    }

    async fn insert(
        pool: &PgPool,
        tenant_id: DbId,
        hostname: &str,
        domain_type: &str,
        may_be_primary: bool,
    ) -> Result<Domain, sqlx::Error> {
        let query = format!(
            "INSERT INTO domains (tenant_id, hostname, domain_type, is_primary) \
             VALUES ($1, $2, $3, \
                 $4 AND NOT EXISTS (SELECT 1 FROM domains WHERE tenant_id = $1)) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Domain>(&query)
            .bind(tenant_id)
            .bind(hostname)
            .bind(domain_type)
            .bind(may_be_primary)
            .fetch_one(pool)
            .await
    }

    /// Give a tenant without a primary domain a verified primary `platform`
    /// domain on `platform_host`.
    ///
    /// Tenants that already have a primary are left alone and their primary
    /// is returned. Returns `None` when the platform host is registered to
    /// another tenant. Safe to run repeatedly.
    pub async fn ensure_platform_primary(
        pool: &PgPool,
        tenant_id: DbId,
        platform_host: &str,
    ) -> Result<Option<Domain>, sqlx::Error> {
        if let Some(primary) = Self::find_primary(pool, tenant_id).await? {
            return Ok(Some(primary));
        }

        let query = format!(
            "INSERT INTO domains (tenant_id, hostname, domain_type, verified, is_primary) \
             VALUES ($1, $2, 'platform', true, true) \
             ON CONFLICT ON CONSTRAINT uq_domains_hostname DO UPDATE \
                 SET domain_type = 'platform', verified = true, is_primary = true \
                 WHERE domains.tenant_id = EXCLUDED.tenant_id \
             RETURNING {COLUMNS}"
        );
        let result = sqlx::query_as::<_, Domain>(&query)
            .bind(tenant_id)
            .bind(platform_host)
            .fetch_optional(pool)
            .await;

        match result {
            Err(e) if violates(&e, "uq_domains_tenant_primary") => {
                Self::find_primary(pool, tenant_id).await
            }
            result => result,
        }
    }

    /// Make `domain_id` the tenant's only primary domain.
    ///
    /// Clearing and setting run in one transaction. Returns `None` (and
    /// changes nothing) when the domain does not belong to the tenant.
    pub async fn set_primary(
        pool: &PgPool,
        tenant_id: DbId,
        domain_id: DbId,
    ) -> Result<Option<Domain>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let owned: Option<(DbId,)> =
            sqlx::query_as("SELECT id FROM domains WHERE id = $1 AND tenant_id = $2 FOR UPDATE")
                .bind(domain_id)
                .bind(tenant_id)
                .fetch_optional(&mut *tx)
                .await?;
        if owned.is_none() {
            tx.rollback().await?;
            return Ok(None);
        }

        // Unmark current primary (if any)
        sqlx::query(
            "UPDATE domains SET is_primary = false \
             WHERE tenant_id = $1 AND is_primary = true",
        )
        .bind(tenant_id)
        .execute(&mut *tx)
        .await?;

        let query = format!(
            "UPDATE domains SET is_primary = true \
             WHERE id = $1 AND tenant_id = $2 \
             RETURNING {COLUMNS}"
        );
        let result = sqlx::query_as::<_, Domain>(&query)
            .bind(domain_id)
            .bind(tenant_id)
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result)
    }
}

fn violates(err: &sqlx::Error, constraint: &str) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.constraint() == Some(constraint))
}
