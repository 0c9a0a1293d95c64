//! Object storage for uploaded logos.
//!
//! [`LogoStorage`] is the seam handlers talk to; [`s3::S3LogoStorage`] is
//! the production backend and [`memory::MemoryLogoStorage`] backs local
//! development and tests.

pub mod memory;
pub mod s3;

use async_trait::async_trait;

pub use memory::MemoryLogoStorage;
pub use s3::S3LogoStorage;

/// Errors raised by a storage backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Failed to upload '{path}': {message}")]
    Upload { path: String, message: String },

    #[error("Failed to remove '{path}': {message}")]
    Remove { path: String, message: String },
}

#[async_trait]
pub trait LogoStorage: Send + Sync {
    /// Bucket the objects live in. Public URLs contain it as a path
    /// segment.
    fn bucket(&self) -> &str;

    /// Store `data` at `path` and return its public URL.
    async fn upload(
        &self,
        path: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError>;

    /// Delete the object at `path`. Missing objects are not an error.
    async fn remove(&self, path: &str) -> Result<(), StorageError>;
}

/// `{base}/{bucket}/{path}`, the layout every backend hands out.
pub fn public_url(base: &str, bucket: &str, path: &str) -> String {
    format!("{}/{bucket}/{path}", base.trim_end_matches('/'))
}
