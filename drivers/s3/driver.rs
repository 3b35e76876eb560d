//! S3驱动核心实现
//!
//! 每个方法对应一个S3 API调用；错误按原因归类为 OperationError。

use async_trait::async_trait;
use s3::bucket::Bucket;
use s3::creds::Credentials;
use s3::error::S3Error;
use s3::{BucketConfiguration, Region};
use tokio::io::AsyncRead;

use super::config::S3Config;
use crate::error::{ConfigError, OperationError};
use crate::storage::{ObjectRecord, ObjectStore, PROVIDER_DEFAULT_REGION};

/// Error codes S3 uses when the signing identity itself is rejected.
const AUTH_ERROR_CODES: &[&str] = &[
    "InvalidAccessKeyId",
    "SignatureDoesNotMatch",
    "ExpiredToken",
    "InvalidToken",
    "TokenRefreshRequired",
];

/// Longest slice of a non-XML error body kept in a message; messages end up
/// in the flash cookie.
const MAX_BODY_CHARS: usize = 200;

/// S3驱动
pub struct S3Driver {
    config: S3Config,
    credentials: Credentials,
}

impl S3Driver {
    /// 创建新的S3驱动实例
    pub fn new(config: S3Config) -> Result<Self, ConfigError> {
        let credentials = Credentials::new(
            Some(&config.access_key_id),
            Some(&config.secret_access_key),
            config.session_token.as_deref(),
            None,
            None,
        )
        .map_err(|e| ConfigError::Provider(format!("创建S3凭证失败: {}", e)))?;

        Ok(Self { config, credentials })
    }

    fn region(&self, region: &str) -> Region {
        Region::Custom {
            region: region.to_string(),
            endpoint: self.config.endpoint_for(region),
        }
    }

    /// Region used for CreateBucket. rust-s3 only omits the LocationConstraint
    /// body for `Region::UsEast1`, so AWS default-region creates must use it.
    fn create_region(&self, location_constraint: Option<&str>) -> Region {
        match location_constraint {
            None if self.config.endpoint.is_empty() => Region::UsEast1,
            None => self.region(PROVIDER_DEFAULT_REGION),
            Some(region) => self.region(region),
        }
    }

    /// 创建S3 Bucket客户端
    fn bucket(&self, name: &str) -> Result<Box<Bucket>, OperationError> {
        let bucket = Bucket::new(name, self.region(&self.config.region), self.credentials.clone())
            .map_err(classify)?;

        Ok(if self.config.force_path_style {
            bucket.with_path_style()
        } else {
            bucket
        })
    }
}

#[async_trait]
impl ObjectStore for S3Driver {
    fn name(&self) -> &str {
        "S3"
    }

    async fn list_buckets(&self) -> Result<Vec<String>, OperationError> {
        let response = Bucket::list_buckets(self.region(&self.config.region), self.credentials.clone())
            .await
            .map_err(classify)?;
        Ok(response.bucket_names().collect())
    }

    async fn list_objects(&self, bucket: &str) -> Result<Vec<ObjectRecord>, OperationError> {
        let results = self
            .bucket(bucket)?
            .list(String::new(), None)
            .await
            .map_err(classify)?;

        let objects = results
            .into_iter()
            .flat_map(|page| page.contents)
            .map(|obj| ObjectRecord {
                key: obj.key,
                size: obj.size as u64,
                last_modified: Some(obj.last_modified),
                etag: obj.e_tag,
            })
            .collect();
        Ok(objects)
    }

    async fn create_bucket(
        &self,
        bucket: &str,
        location_constraint: Option<&str>,
    ) -> Result<(), OperationError> {
        let region = self.create_region(location_constraint);
        let config = BucketConfiguration::default();

        let response = if self.config.force_path_style {
            Bucket::create_with_path_style(bucket, region, self.credentials.clone(), config).await
        } else {
            Bucket::create(bucket, region, self.credentials.clone(), config).await
        }
        .map_err(classify)?;

        if !response.success() {
            return Err(classify_http(response.response_code, &response.response_text));
        }
        Ok(())
    }

    async fn delete_bucket(&self, bucket: &str) -> Result<(), OperationError> {
        self.bucket(bucket)?.delete().await.map_err(classify)?;
        Ok(())
    }

    async fn delete_object(&self, bucket: &str, key: &str) -> Result<(), OperationError> {
        self.bucket(bucket)?
            .delete_object(key)
            .await
            .map_err(classify)?;
        Ok(())
    }

    async fn copy_object(
        &self,
        bucket: &str,
        src_key: &str,
        dest_key: &str,
    ) -> Result<(), OperationError> {
        // copy_object_internal的from参数需要URL编码（中文等非ASCII字符）
        let encoded_src = urlencoding::encode(src_key);
        tracing::debug!("S3 CopyObject: bucket={}, src_key={}, dst_key={}", bucket, src_key, dest_key);

        self.bucket(bucket)?
            .copy_object_internal(&encoded_src, dest_key)
            .await
            .map_err(classify)?;
        Ok(())
    }

    async fn put_object_stream(
        &self,
        bucket: &str,
        key: &str,
        mut reader: &mut (dyn AsyncRead + Unpin + Send),
    ) -> Result<(), OperationError> {
        tracing::debug!("S3 PutObject stream: bucket={}, key={}", bucket, key);
        self.bucket(bucket)?
            .put_object_stream(&mut reader, key)
            .await
            .map_err(classify)?;
        Ok(())
    }
}

/// Sort an S3 failure into the operation error taxonomy.
fn classify(err: S3Error) -> OperationError {
    match err {
        S3Error::Credentials(e) => OperationError::PartialCredentials(e.to_string()),
        S3Error::HttpFailWithBody(status, body) => classify_http(status, &body),
        other => OperationError::Client(other.to_string()),
    }
}

fn classify_http(status: u16, body: &str) -> OperationError {
    let code = xml_tag(body, "Code");
    let message = xml_tag(body, "Message");

    let text = match (&code, &message) {
        (Some(code), Some(message)) => format!("{} ({}): {}", code, status, message),
        (Some(code), None) => format!("{} ({})", code, status),
        _ if body.trim().is_empty() => format!("HTTP {}", status),
        _ => format!("HTTP {}: {}", status, truncate(body.trim(), MAX_BODY_CHARS)),
    };

    let is_auth = status == 401
        || code
            .as_deref()
            .map(|c| AUTH_ERROR_CODES.contains(&c))
            .unwrap_or(false);

    if is_auth {
        OperationError::Authentication(text)
    } else {
        OperationError::Client(text)
    }
}

/// First `max` characters of `text`, marked with an ellipsis when cut.
fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.to_string(),
    }
}

/// Text of the first `<tag>...</tag>` in an S3 error document.
fn xml_tag(body: &str, tag: &str) -> Option<String> {
    let open = format!("<{}>", tag);
    let close = format!("</{}>", tag);
    let start = body.find(&open)? + open.len();
    let end = body[start..].find(&close)? + start;
    let value = body[start..end].trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
