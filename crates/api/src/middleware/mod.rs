//! Request extractors.
//!
//! - [`auth::AuthUser`] -- the caller identified by a Bearer token.
//! - [`auth::CurrentTenant`] -- the caller's tenant, created on first use.

pub mod auth;
