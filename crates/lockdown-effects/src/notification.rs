//! Notification handler for hosts without a toast surface

use async_trait::async_trait;
use lockdown_core::effects::NotificationEffects;
use lockdown_core::NotificationError;

/// Writes notifications to the tracing sink at `info`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotificationHandler;

impl TracingNotificationHandler {
    /// Create the handler
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl NotificationEffects for TracingNotificationHandler {
    async fn notify(&self, message: &str) -> Result<(), NotificationError> {
        tracing::info!(target: "lockdown::notification", "{}", message);
        Ok(())
    }
}
