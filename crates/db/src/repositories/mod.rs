//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod domain_repo;
pub mod link_repo;
pub mod qr_code_repo;
pub mod scan_repo;
pub mod tenant_repo;

pub use domain_repo::DomainRepo;
pub use link_repo::LinkRepo;
pub use qr_code_repo::QrCodeRepo;
pub use scan_repo::ScanRepo;
pub use tenant_repo::TenantRepo;
