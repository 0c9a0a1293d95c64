//! Domain logic for the QR landing-page service.
//!
//! Everything in this crate is pure: no database, no HTTP, no object
//! storage. The `db` and `api` crates build on these types.

pub mod color;
pub mod error;
pub mod hashing;
pub mod hostname;
pub mod logo;
pub mod qr_style;
pub mod redirect;
pub mod render;
pub mod scannability;
pub mod short_code;
pub mod types;
