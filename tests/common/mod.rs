//! In-memory object store with failure injection, shared by the integration tests.
#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::Mutex;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncReadExt};

use bucket_console::config::AppConfig;
use bucket_console::error::OperationError;
use bucket_console::storage::{ObjectRecord, ObjectStore};
use bucket_console::{create_router, AppState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    ListBuckets,
    ListObjects,
    CreateBucket,
    DeleteBucket,
    DeleteObject,
    CopyObject,
    PutObject,
}

#[derive(Default)]
struct Inner {
    buckets: BTreeMap<String, BTreeMap<String, Bytes>>,
    failures: HashMap<Op, OperationError>,
    calls: HashMap<Op, usize>,
    created: Vec<(String, Option<String>)>,
}

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn add_bucket(&self, bucket: &str) {
        self.inner.lock().buckets.entry(bucket.to_string()).or_default();
    }

    pub fn put(&self, bucket: &str, key: &str, data: &str) {
        self.inner
            .lock()
            .buckets
            .entry(bucket.to_string())
            .or_default()
            .insert(key.to_string(), Bytes::from(data.to_string()));
    }

    /// Make every later call of `op` fail with `err`.
    pub fn fail(&self, op: Op, err: OperationError) {
        self.inner.lock().failures.insert(op, err);
    }

    pub fn keys(&self, bucket: &str) -> Vec<String> {
        self.inner
            .lock()
            .buckets
            .get(bucket)
            .map(|objects| objects.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn get(&self, bucket: &str, key: &str) -> Option<String> {
        self.inner
            .lock()
            .buckets
            .get(bucket)
            .and_then(|objects| objects.get(key))
            .map(|data| String::from_utf8_lossy(data).into_owned())
    }

    pub fn has_bucket(&self, bucket: &str) -> bool {
        self.inner.lock().buckets.contains_key(bucket)
    }

    pub fn calls(&self, op: Op) -> usize {
        self.inner.lock().calls.get(&op).copied().unwrap_or(0)
    }

    /// (bucket, location constraint) of every CreateBucket call.
    pub fn created(&self) -> Vec<(String, Option<String>)> {
        self.inner.lock().created.clone()
    }

    fn enter(&self, op: Op) -> Result<(), OperationError> {
        let mut inner = self.inner.lock();
        *inner.calls.entry(op).or_default() += 1;
        match inner.failures.get(&op) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

fn no_such_bucket(bucket: &str) -> OperationError {
    OperationError::Client(format!("NoSuchBucket (404): {}", bucket))
}

#[async_trait]
impl ObjectStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn list_buckets(&self) -> Result<Vec<String>, OperationError> {
        self.enter(Op::ListBuckets)?;
        Ok(self.inner.lock().buckets.keys().cloned().collect())
    }

    async fn list_objects(&self, bucket: &str) -> Result<Vec<ObjectRecord>, OperationError> {
        self.enter(Op::ListObjects)?;
        let inner = self.inner.lock();
        let objects = inner.buckets.get(bucket).ok_or_else(|| no_such_bucket(bucket))?;
        Ok(objects
            .iter()
            .map(|(key, data)| ObjectRecord {
                key: key.clone(),
                size: data.len() as u64,
                last_modified: Some("2024-01-01T00:00:00.000Z".to_string()),
                etag: None,
            })
            .collect())
    }

    async fn create_bucket(
        &self,
        bucket: &str,
        location_constraint: Option<&str>,
    ) -> Result<(), OperationError> {
        self.enter(Op::CreateBucket)?;
        let mut inner = self.inner.lock();
        inner
            .created
            .push((bucket.to_string(), location_constraint.map(str::to_string)));
        if inner.buckets.contains_key(bucket) {
            return Err(OperationError::Client(
                "BucketAlreadyOwnedByYou (409): Your previous request to create the named bucket succeeded".to_string(),
            ));
        }
        inner.buckets.insert(bucket.to_string(), BTreeMap::new());
        Ok(())
    }

    async fn delete_bucket(&self, bucket: &str) -> Result<(), OperationError> {
        self.enter(Op::DeleteBucket)?;
        let mut inner = self.inner.lock();
        let empty = inner.buckets.get(bucket).map(|objects| objects.is_empty());
        match empty {
            None => Err(no_such_bucket(bucket)),
            Some(false) => Err(OperationError::Client(
                "BucketNotEmpty (409): The bucket you tried to delete is not empty".to_string(),
            )),
            Some(true) => {
                inner.buckets.remove(bucket);
                Ok(())
            }
        }
    }

    async fn delete_object(&self, bucket: &str, key: &str) -> Result<(), OperationError> {
        self.enter(Op::DeleteObject)?;
        let mut inner = self.inner.lock();
        let objects = inner.buckets.get_mut(bucket).ok_or_else(|| no_such_bucket(bucket))?;
        objects.remove(key);
        Ok(())
    }

    async fn copy_object(
        &self,
        bucket: &str,
        src_key: &str,
        dest_key: &str,
    ) -> Result<(), OperationError> {
        self.enter(Op::CopyObject)?;
        let mut inner = self.inner.lock();
        let objects = inner.buckets.get_mut(bucket).ok_or_else(|| no_such_bucket(bucket))?;
        let data = objects
            .get(src_key)
            .cloned()
            .ok_or_else(|| OperationError::Client(format!("NoSuchKey (404): {}", src_key)))?;
        objects.insert(dest_key.to_string(), data);
        Ok(())
    }

    async fn put_object_stream(
        &self,
        bucket: &str,
        key: &str,
        reader: &mut (dyn AsyncRead + Unpin + Send),
    ) -> Result<(), OperationError> {
        self.enter(Op::PutObject)?;
        let mut data = Vec::new();
        reader
            .read_to_end(&mut data)
            .await
            .map_err(|e| OperationError::Client(e.to_string()))?;

        let mut inner = self.inner.lock();
        let objects = inner.buckets.get_mut(bucket).ok_or_else(|| no_such_bucket(bucket))?;
        objects.insert(key.to_string(), Bytes::from(data));
        Ok(())
    }
}

pub const FLASH_COOKIE: &str = "bucket_console_flash";

pub fn test_state(store: Arc<MemoryStore>, region: &str) -> Arc<AppState> {
    Arc::new(AppState::new(store, region, &AppConfig::default()))
}

pub fn test_app(store: Arc<MemoryStore>) -> axum::Router {
    create_router(test_state(store, "us-east-1"))
}
