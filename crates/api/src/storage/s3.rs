use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;

use super::{public_url, LogoStorage, StorageError};

/// Logo storage in an S3-compatible bucket.
#[derive(Debug, Clone)]
pub struct S3LogoStorage {
    inner: aws_sdk_s3::Client,
    bucket: String,
    public_base_url: String,
}

impl S3LogoStorage {
    pub fn new(inner: aws_sdk_s3::Client, bucket: String, public_base_url: String) -> Self {
        Self {
            inner,
            bucket,
            public_base_url,
        }
    }

    /// Build a client from the standard AWS environment (`AWS_REGION`,
    /// `AWS_ENDPOINT_URL`, credentials chain).
    pub async fn from_env(bucket: String, public_base_url: String) -> Self {
        let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .load()
            .await;
        Self::new(aws_sdk_s3::Client::new(&sdk_config), bucket, public_base_url)
    }
}

#[async_trait]
impl LogoStorage for S3LogoStorage {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    #[tracing::instrument(skip(self, data), fields(bytes = data.len()))]
    async fn upload(
        &self,
        path: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError> {
        self.inner
            .put_object()
            .bucket(&self.bucket)
            .key(path)
            .content_type(content_type)
            .cache_control("public, max-age=3600")
            .body(ByteStream::from(data))
            .send()
            .await
            .map_err(|e| StorageError::Upload {
                path: path.to_string(),
                message: e.to_string(),
            })?;

        Ok(public_url(&self.public_base_url, &self.bucket, path))
    }

    #[tracing::instrument(skip(self))]
    async fn remove(&self, path: &str) -> Result<(), StorageError> {
        self.inner
            .delete_object()
            .bucket(&self.bucket)
            .key(path)
            .send()
            .await
            .map_err(|e| StorageError::Remove {
                path: path.to_string(),
                message: e.to_string(),
            })?;
        Ok(())
    }
}
