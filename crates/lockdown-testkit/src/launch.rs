//! Recording launch handler

use async_trait::async_trait;
use lockdown_core::effects::{LaunchEffects, UiTarget};
use lockdown_core::LaunchError;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

/// Records every foreground request
#[derive(Debug, Default)]
pub struct MockLaunchHandler {
    requests: Mutex<Vec<(UiTarget, bool)>>,
    reject: AtomicBool,
}

impl MockLaunchHandler {
    /// Handler that accepts every request
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject subsequent requests with `ActivityStartRejected`
    pub fn set_reject(&self, reject: bool) {
        self.reject.store(reject, Ordering::SeqCst);
    }

    /// Every request received, rejected ones included
    pub fn requests(&self) -> Vec<(UiTarget, bool)> {
        self.requests.lock().clone()
    }

    /// Number of requests received
    pub fn launch_count(&self) -> usize {
        self.requests.lock().len()
    }
}

#[async_trait]
impl LaunchEffects for MockLaunchHandler {
    async fn start_task_root(&self, target: &UiTarget, new_task: bool) -> Result<(), LaunchError> {
        self.requests.lock().push((target.clone(), new_task));
        if self.reject.load(Ordering::SeqCst) {
            return Err(LaunchError::rejected("injected rejection"));
        }
        Ok(())
    }
}
