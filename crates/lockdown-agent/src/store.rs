//! Enrollment Store
//!
//! Single record under a fixed namespace key, JSON encoded. Never cached:
//! every call goes to the persistence effect.

use lockdown_core::effects::PersistenceEffects;
use lockdown_core::{EnrollmentRecord, StoreError};
use std::sync::Arc;

/// Durable home of the [`EnrollmentRecord`]
pub struct EnrollmentStore<S: PersistenceEffects + ?Sized> {
    storage: Arc<S>,
    key: String,
}

impl<S: PersistenceEffects + ?Sized> EnrollmentStore<S> {
    /// Store the record under `namespace`
    pub fn new(storage: Arc<S>, namespace: impl Into<String>) -> Self {
        Self {
            storage,
            key: namespace.into(),
        }
    }

    /// Namespace key of the record
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Current record, or the unprovisioned default if none was ever written
    pub async fn load(&self) -> Result<EnrollmentRecord, StoreError> {
        match self.storage.get(&self.key).await? {
            None => Ok(EnrollmentRecord::default()),
            Some(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| StoreError::corrupt(format!("{}: {}", self.key, e))),
        }
    }

    /// Durably replace the record.
    ///
    /// Refuses to move the lifecycle backwards relative to what is stored.
    pub async fn save(&self, record: &EnrollmentRecord) -> Result<(), StoreError> {
        let stored = self.load().await?;
        if !stored.state.can_advance_to(record.state) {
            return Err(StoreError::Regression {
                message: format!("stored {} cannot move to {}", stored.state, record.state),
            });
        }

        let bytes = serde_json::to_vec(record)
            .map_err(|e| StoreError::corrupt(format!("failed to encode record: {e}")))?;
        self.storage.put(&self.key, bytes).await
    }
}
