//! User-visible notification effect interface

use crate::errors::NotificationError;
use async_trait::async_trait;
use std::sync::Arc;

/// Short-lived, non-blocking user notification (toast-like)
#[async_trait]
pub trait NotificationEffects: Send + Sync {
    /// Show `message`; callers treat failure as non-fatal
    async fn notify(&self, message: &str) -> Result<(), NotificationError>;
}

#[async_trait]
impl<T: NotificationEffects + ?Sized> NotificationEffects for Arc<T> {
    async fn notify(&self, message: &str) -> Result<(), NotificationError> {
        (**self).notify(message).await
    }
}
