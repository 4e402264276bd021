//! In-memory persistence with failure injection

use async_trait::async_trait;
use lockdown_core::effects::PersistenceEffects;
use lockdown_core::StoreError;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// In-memory persistence handler for testing
#[derive(Debug, Default)]
pub struct MemoryPersistenceHandler {
    data: Mutex<HashMap<String, Vec<u8>>>,
    fail_puts: AtomicBool,
    fail_gets: AtomicBool,
    put_budget: Mutex<Option<usize>>,
    put_count: AtomicUsize,
}

impl MemoryPersistenceHandler {
    /// Create an empty handler
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `put` fail with `StoreError::Unavailable`
    pub fn set_fail_puts(&self, fail: bool) {
        self.fail_puts.store(fail, Ordering::SeqCst);
    }

    /// Let the next `n` puts succeed, then fail every later one until
    /// [`clear_put_budget`](Self::clear_put_budget) is called
    pub fn fail_after_puts(&self, n: usize) {
        *self.put_budget.lock() = Some(n);
    }

    /// Drop a budget set by [`fail_after_puts`](Self::fail_after_puts)
    pub fn clear_put_budget(&self) {
        *self.put_budget.lock() = None;
    }

    /// Make every subsequent `get` fail with `StoreError::Unavailable`
    pub fn set_fail_gets(&self, fail: bool) {
        self.fail_gets.store(fail, Ordering::SeqCst);
    }

    /// Overwrite a raw value, bypassing failure injection
    pub fn insert_raw(&self, key: &str, value: Vec<u8>) {
        self.data.lock().insert(key.to_string(), value);
    }

    /// Raw value, bypassing failure injection
    pub fn raw(&self, key: &str) -> Option<Vec<u8>> {
        self.data.lock().get(key).cloned()
    }

    /// Stored value decoded as JSON
    pub fn json(&self, key: &str) -> Option<serde_json::Value> {
        self.raw(key)
            .and_then(|bytes| serde_json::from_slice(&bytes).ok())
    }

    /// Number of successful writes
    pub fn put_count(&self) -> usize {
        self.put_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PersistenceEffects for MemoryPersistenceHandler {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        if self.fail_gets.load(Ordering::SeqCst) {
            return Err(StoreError::unavailable("injected read failure"));
        }
        Ok(self.data.lock().get(key).cloned())
    }

    async fn put(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        if self.fail_puts.load(Ordering::SeqCst) {
            return Err(StoreError::unavailable("injected write failure"));
        }
        if let Some(remaining) = self.put_budget.lock().as_mut() {
            if *remaining == 0 {
                return Err(StoreError::unavailable("injected write failure"));
            }
            *remaining -= 1;
        }
        self.data.lock().insert(key.to_string(), value);
        self.put_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
