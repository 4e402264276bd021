//! Recording notification handler

use async_trait::async_trait;
use lockdown_core::effects::NotificationEffects;
use lockdown_core::NotificationError;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

/// Captures notifications instead of showing them
#[derive(Debug, Default)]
pub struct MockNotificationHandler {
    messages: Mutex<Vec<String>>,
    fail: AtomicBool,
}

impl MockNotificationHandler {
    /// Handler that accepts every notification
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail subsequent notifications
    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// Messages received, failed ones included
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }
}

#[async_trait]
impl NotificationEffects for MockNotificationHandler {
    async fn notify(&self, message: &str) -> Result<(), NotificationError> {
        self.messages.lock().push(message.to_string());
        if self.fail.load(Ordering::SeqCst) {
            return Err(NotificationError::Unavailable {
                message: "injected failure".to_string(),
            });
        }
        Ok(())
    }
}
