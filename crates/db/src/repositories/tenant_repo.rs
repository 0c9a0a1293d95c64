//! Repository for the `tenants` table.

use sqlx::PgPool;

use crate::models::tenant::Tenant;

/// Column list for `tenants` queries.
const COLUMNS: &str = "id, owner_user_id, name, created_at, updated_at";

/// Provides data access for tenants.
pub struct TenantRepo;

impl TenantRepo {
    /// Return the tenant owned by `owner_user_id`, creating it on first
    /// access.
    ///
    /// The no-op `DO UPDATE` makes `RETURNING` yield the existing row, so
    /// two concurrent first requests both end up with the same tenant.
    pub async fn find_or_create(
        pool: &PgPool,
        owner_user_id: &str,
        name: &str,
    ) -> Result<Tenant, sqlx::Error> {
        let query = format!(
            "INSERT INTO tenants (owner_user_id, name) \
             VALUES ($1, $2) \
             ON CONFLICT ON CONSTRAINT uq_tenants_owner_user_id \
             DO UPDATE SET owner_user_id = EXCLUDED.owner_user_id \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Tenant>(&query)
            .bind(owner_user_id)
            .bind(name)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_owner(
        pool: &PgPool,
        owner_user_id: &str,
    ) -> Result<Option<Tenant>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tenants WHERE owner_user_id = $1");
        sqlx::query_as::<_, Tenant>(&query)
            .bind(owner_user_id)
            .fetch_optional(pool)
            .await
    }
}
