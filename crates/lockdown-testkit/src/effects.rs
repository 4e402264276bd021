//! Composite mock effect system
//!
//! Bundles one mock per collaborator behind a single value so a controller
//! can be wired with `Arc<MockLockdownEffects>` while tests keep direct access
//! to each mock for failure injection and inspection.

use crate::device_policy::MockDevicePolicyHandler;
use crate::launch::MockLaunchHandler;
use crate::notification::MockNotificationHandler;
use crate::persistence::MemoryPersistenceHandler;
use async_trait::async_trait;
use lockdown_core::effects::{
    DevicePolicyEffects, LaunchEffects, NotificationEffects, PersistenceEffects, UiTarget,
};
use lockdown_core::{
    AdminComponent, KeyguardFeatures, LaunchError, NotificationError, PolicyError, StoreError,
};

/// One mock handler per collaborator
#[derive(Debug, Default)]
pub struct MockLockdownEffects {
    /// Persistence collaborator
    pub persistence: MemoryPersistenceHandler,
    /// Device-policy collaborator
    pub device_policy: MockDevicePolicyHandler,
    /// Foreground-launch collaborator
    pub launcher: MockLaunchHandler,
    /// Notification collaborator
    pub notifications: MockNotificationHandler,
}

impl MockLockdownEffects {
    /// All collaborators healthy and empty
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PersistenceEffects for MockLockdownEffects {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        self.persistence.get(key).await
    }

    async fn put(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        self.persistence.put(key, value).await
    }
}

#[async_trait]
impl DevicePolicyEffects for MockLockdownEffects {
    async fn set_lock_task_packages(
        &self,
        admin: &AdminComponent,
        packages: &[String],
    ) -> Result<(), PolicyError> {
        self.device_policy
            .set_lock_task_packages(admin, packages)
            .await
    }

    async fn set_keyguard_disabled_features(
        &self,
        admin: &AdminComponent,
        features: KeyguardFeatures,
    ) -> Result<(), PolicyError> {
        self.device_policy
            .set_keyguard_disabled_features(admin, features)
            .await
    }
}

#[async_trait]
impl LaunchEffects for MockLockdownEffects {
    async fn start_task_root(&self, target: &UiTarget, new_task: bool) -> Result<(), LaunchError> {
        self.launcher.start_task_root(target, new_task).await
    }
}

#[async_trait]
impl NotificationEffects for MockLockdownEffects {
    async fn notify(&self, message: &str) -> Result<(), NotificationError> {
        self.notifications.notify(message).await
    }
}
