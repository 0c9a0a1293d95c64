//! Row models and DTOs.
//!
//! Each submodule contains a `FromRow` + `Serialize` entity struct matching
//! the database row and, where the table is written from requests, the
//! `Deserialize` DTOs used for inserts and updates.

pub mod domain;
pub mod link;
pub mod qr_code;
pub mod scan;
pub mod tenant;
