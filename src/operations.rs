//! Storage operations / 存储操作
//!
//! Each operation performs one provider action through the shared
//! [`ObjectStore`] handle. Listing operations recover to an empty result and
//! record the failure as a status message; mutating operations return a typed
//! result that the route turns into a message.

use std::sync::Arc;
use tokio::io::AsyncRead;

use crate::error::OperationError;
use crate::flash::Flashes;
use crate::storage::{ObjectRecord, ObjectStore, PROVIDER_DEFAULT_REGION};

/// Key a copy of `src_key` is written to. Repeated copies land on the same key.
pub fn copy_key(src_key: &str) -> String {
    format!("copy_of_{}", src_key)
}

/// Key `src_key` ends up at after moving it into `folder`.
pub fn move_key(src_key: &str, folder: &str) -> String {
    format!("{}/{}", folder, src_key)
}

/// Location constraint for CreateBucket in `region`.
pub fn location_constraint(region: &str) -> Option<&str> {
    if region == PROVIDER_DEFAULT_REGION {
        None
    } else {
        Some(region)
    }
}

#[derive(Clone)]
pub struct StorageOps {
    store: Arc<dyn ObjectStore>,
    region: String,
}

impl StorageOps {
    pub fn new(store: Arc<dyn ObjectStore>, region: impl Into<String>) -> Self {
        Self {
            store,
            region: region.into(),
        }
    }

    /// Bucket names, or an empty list plus one danger message on failure.
    pub async fn list_containers(&self, flashes: &mut Flashes) -> Vec<String> {
        match self.store.list_buckets().await {
            Ok(buckets) => buckets,
            Err(e) => {
                tracing::error!("List buckets failed ({}): {}", self.store.name(), e);
                flashes.push(e.severity(), format!("Error listing buckets: {}", e));
                Vec::new()
            }
        }
    }

    /// Objects of `bucket`, or an empty list plus one danger message on failure.
    pub async fn list_objects(&self, bucket: &str, flashes: &mut Flashes) -> Vec<ObjectRecord> {
        match self.store.list_objects(bucket).await {
            Ok(objects) => objects,
            Err(e) => {
                tracing::error!("List objects in {} failed: {}", bucket, e);
                flashes.push(e.severity(), format!("Error listing files in {}: {}", bucket, e));
                Vec::new()
            }
        }
    }

    pub async fn create_container(&self, name: &str) -> Result<(), OperationError> {
        let constraint = location_constraint(&self.region);
        tracing::debug!("CreateBucket {} (location constraint: {:?})", name, constraint);
        self.store.create_bucket(name, constraint).await?;
        tracing::info!("Bucket created: {}", name);
        Ok(())
    }

    pub async fn delete_container(&self, name: &str) -> Result<(), OperationError> {
        self.store.delete_bucket(name).await?;
        tracing::info!("Bucket deleted: {}", name);
        Ok(())
    }

    pub async fn delete_object(&self, bucket: &str, key: &str) -> Result<(), OperationError> {
        self.store.delete_object(bucket, key).await?;
        tracing::info!("Object deleted: {}/{}", bucket, key);
        Ok(())
    }

    /// Copy `src_key` to `copy_of_<src_key>` in the same bucket. Returns the new key.
    pub async fn copy_object(&self, bucket: &str, src_key: &str) -> Result<String, OperationError> {
        let new_key = copy_key(src_key);
        self.store.copy_object(bucket, src_key, &new_key).await?;
        tracing::info!("Object copied: {}/{} -> {}", bucket, src_key, new_key);
        Ok(new_key)
    }

    /// Move `src_key` under `folder` as copy-then-delete. Returns the new key.
    ///
    /// Not atomic: when the delete fails after a successful copy the object
    /// exists under both keys, the error is returned, and the copy stays.
    pub async fn move_object(
        &self,
        bucket: &str,
        src_key: &str,
        folder: &str,
    ) -> Result<String, OperationError> {
        let new_key = move_key(src_key, folder);
        self.store.copy_object(bucket, src_key, &new_key).await?;
        if let Err(e) = self.store.delete_object(bucket, src_key).await {
            tracing::warn!(
                "Move {}/{} copied to {} but source delete failed, both keys now exist: {}",
                bucket,
                src_key,
                new_key,
                e
            );
            return Err(e);
        }
        tracing::info!("Object moved: {}/{} -> {}", bucket, src_key, new_key);
        Ok(new_key)
    }

    /// Stream `reader` to `key` in `bucket`, overwriting any existing object.
    pub async fn upload_object(
        &self,
        bucket: &str,
        reader: &mut (dyn AsyncRead + Unpin + Send),
        key: &str,
    ) -> Result<(), OperationError> {
        self.store.put_object_stream(bucket, key, reader).await?;
        tracing::info!("Object uploaded: {}/{}", bucket, key);
        Ok(())
    }
}
