//! Lock UI Launcher

use lockdown_core::effects::{LaunchEffects, UiTarget};
use lockdown_core::LaunchError;
use std::sync::Arc;

/// Requests the restricted-mode UI in a task of its own.
///
/// The caller is a short-lived event handler with no visible task to nest
/// under, so every request asks for a new task.
pub struct LockUiLauncher<L: LaunchEffects + ?Sized> {
    launcher: Arc<L>,
    target: UiTarget,
}

impl<L: LaunchEffects + ?Sized> LockUiLauncher<L> {
    /// Launcher for `target`
    pub fn new(launcher: Arc<L>, target: UiTarget) -> Self {
        Self { launcher, target }
    }

    /// UI brought to the foreground
    pub fn target(&self) -> &UiTarget {
        &self.target
    }

    /// Ask the platform to foreground the lock UI. Repeat calls are plain
    /// repeat requests.
    pub async fn launch_foreground(&self) -> Result<(), LaunchError> {
        self.launcher.start_task_root(&self.target, true).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lockdown_testkit::MockLaunchHandler;

    #[tokio::test]
    async fn test_every_call_requests_a_new_task() {
        let handler = Arc::new(MockLaunchHandler::new());
        let target = UiTarget::new("com.emilocker.mdm/.LockActivity");
        let launcher = LockUiLauncher::new(handler.clone(), target.clone());

        launcher.launch_foreground().await.unwrap();
        launcher.launch_foreground().await.unwrap();

        assert_eq!(
            handler.requests(),
            vec![(target.clone(), true), (target, true)]
        );
    }

    #[tokio::test]
    async fn test_rejection_is_reported() {
        let handler = Arc::new(MockLaunchHandler::new());
        handler.set_reject(true);
        let launcher = LockUiLauncher::new(handler, UiTarget::new("x/.Lock"));

        assert!(matches!(
            launcher.launch_foreground().await,
            Err(LaunchError::ActivityStartRejected { .. })
        ));
    }
}
