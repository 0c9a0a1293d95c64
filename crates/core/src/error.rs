use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// Lookup by a natural key (short code, hostname) rather than a row id.
    #[error("Entity not found: {entity} '{key}'")]
    NotFoundByKey { entity: &'static str, key: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// A bounded retry loop ran out of attempts.
    #[error("Gave up allocating a unique {what} after {attempts} attempts")]
    RetryExhausted { what: &'static str, attempts: u32 },

    #[error("Internal error: {0}")]
    Internal(String),
}
