use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::io::AsyncRead;

use crate::error::OperationError;

/// Region the provider treats as its default. CreateBucket rejects an explicit
/// location constraint equal to it.
pub const PROVIDER_DEFAULT_REGION: &str = "us-east-1";

/// Object record as returned by the listing call / 对象信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectRecord {
    pub key: String,
    pub size: u64,
    pub last_modified: Option<String>,
    pub etag: Option<String>,
}

/// Object storage provider interface (one method per provider action) / 对象存储接口
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Provider name, for logs
    fn name(&self) -> &str;

    /// List bucket names in provider order / 列出存储桶
    async fn list_buckets(&self) -> Result<Vec<String>, OperationError>;

    /// List the objects of one bucket / 列出对象
    async fn list_objects(&self, bucket: &str) -> Result<Vec<ObjectRecord>, OperationError>;

    /// Create a bucket. `location_constraint` is `None` for the provider default region.
    async fn create_bucket(
        &self,
        bucket: &str,
        location_constraint: Option<&str>,
    ) -> Result<(), OperationError>;

    async fn delete_bucket(&self, bucket: &str) -> Result<(), OperationError>;

    async fn delete_object(&self, bucket: &str, key: &str) -> Result<(), OperationError>;

    /// Server-side copy within one bucket; overwrites `dest_key` if it exists.
    async fn copy_object(
        &self,
        bucket: &str,
        src_key: &str,
        dest_key: &str,
    ) -> Result<(), OperationError>;

    /// Stream content to `key`, overwriting silently / 流式上传
    async fn put_object_stream(
        &self,
        bucket: &str,
        key: &str,
        reader: &mut (dyn AsyncRead + Unpin + Send),
    ) -> Result<(), OperationError>;
}
