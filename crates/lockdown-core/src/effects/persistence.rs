//! Persistence effect interface
//!
//! Key/value storage for durable agent state. `put` must not return until the
//! value is committed, since the process may be killed right after a handler
//! returns.

use crate::errors::StoreError;
use async_trait::async_trait;
use std::sync::Arc;

/// Durable key/value storage
#[async_trait]
pub trait PersistenceEffects: Send + Sync {
    /// Read a value, `None` if never written
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Write a value durably
    async fn put(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError>;
}

#[async_trait]
impl<T: PersistenceEffects + ?Sized> PersistenceEffects for Arc<T> {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        (**self).get(key).await
    }

    async fn put(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        (**self).put(key, value).await
    }
}
