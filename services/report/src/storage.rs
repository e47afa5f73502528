use anyhow::{anyhow, Result};
use bytes::Bytes;
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// ObjectStore is used to hand a finished report to an object storage service.
///
/// Only a single put is needed, implementations own networking, retries and
/// authentication. Errors are surfaced to the caller unchanged.
pub trait ObjectStore: Debug {
    /// Store `body` under `bucket` and `key`, replacing any existing object.
    fn put_object(&self, bucket: &str, key: &str, body: Bytes) -> Result<()>;
}

impl<T: ObjectStore + ?Sized> ObjectStore for &T {
    fn put_object(&self, bucket: &str, key: &str, body: Bytes) -> Result<()> {
        (**self).put_object(bucket, key, body)
    }
}

/// In-memory object store, keyed by `(bucket, key)`.
///
/// Useful in tests and for callers that post-process reports locally.
#[derive(Debug, Default)]
pub struct MemoryObjectStore {
    objects: Mutex<HashMap<(String, String), Bytes>>,
}

impl MemoryObjectStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a stored object.
    pub fn get(&self, bucket: &str, key: &str) -> Option<Bytes> {
        self.read()
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
    }

    /// Number of stored objects.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Returns true if nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reads still see every stored object after a writer panicked.
    fn read(&self) -> MutexGuard<'_, HashMap<(String, String), Bytes>> {
        self.objects.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ObjectStore for MemoryObjectStore {
    fn put_object(&self, bucket: &str, key: &str, body: Bytes) -> Result<()> {
        let mut objects = self
            .objects
            .lock()
            .map_err(|_| anyhow!("memory object store is poisoned"))?;
        objects.insert((bucket.to_string(), key.to_string()), body);
        Ok(())
    }
}
