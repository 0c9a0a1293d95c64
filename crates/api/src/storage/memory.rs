use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{public_url, LogoStorage, StorageError};

/// A stored object.
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub data: Vec<u8>,
    pub content_type: String,
}

/// Process-local logo storage.
#[derive(Debug, Default)]
pub struct MemoryLogoStorage {
    bucket: String,
    public_base_url: String,
    objects: RwLock<HashMap<String, StoredObject>>,
}

impl MemoryLogoStorage {
    pub fn new(bucket: impl Into<String>, public_base_url: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            public_base_url: public_base_url.into(),
            objects: RwLock::default(),
        }
    }

    pub async fn get(&self, path: &str) -> Option<StoredObject> {
        self.objects.read().await.get(path).cloned()
    }

    /// Paths of all stored objects, sorted.
    pub async fn paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.objects.read().await.keys().cloned().collect();
        paths.sort();
        paths
    }
}

#[async_trait]
impl LogoStorage for MemoryLogoStorage {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    async fn upload(
        &self,
        path: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError> {
        self.objects.write().await.insert(
            path.to_string(),
            StoredObject {
                data,
                content_type: content_type.to_string(),
            },
        );
        Ok(public_url(&self.public_base_url, &self.bucket, path))
    }

    async fn remove(&self, path: &str) -> Result<(), StorageError> {
        self.objects.write().await.remove(path);
        Ok(())
    }
}
