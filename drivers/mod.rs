// Driver package / 驱动包
pub mod s3;

use std::sync::Arc;

use crate::config::{Credentials, StorageConfig};
use crate::error::ConfigError;
use crate::storage::ObjectStore;

/// Build the process-wide storage client / 创建存储客户端
pub fn connect(
    credentials: &Credentials,
    storage: &StorageConfig,
) -> Result<Arc<dyn ObjectStore>, ConfigError> {
    let config = self::s3::S3Config::new(credentials, storage);
    let driver = self::s3::S3Driver::new(config)?;
    tracing::info!(
        "S3 client ready: region={}, endpoint={}",
        credentials.region,
        if storage.endpoint.is_empty() { "aws" } else { storage.endpoint.as_str() }
    );
    Ok(Arc::new(driver))
}
