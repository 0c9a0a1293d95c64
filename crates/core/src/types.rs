//! Shared primitive aliases.

/// Row ids are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// UTC timestamp as stored in `TIMESTAMPTZ` columns.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

