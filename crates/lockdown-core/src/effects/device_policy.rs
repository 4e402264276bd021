//! Device-policy effect interface

use crate::errors::PolicyError;
use crate::policy::{AdminComponent, KeyguardFeatures};
use async_trait::async_trait;
use std::sync::Arc;

/// Platform device-policy service, scoped to an admin component.
///
/// Both setters replace the previous value outright.
#[async_trait]
pub trait DevicePolicyEffects: Send + Sync {
    /// Replace the lock-task allow-list
    async fn set_lock_task_packages(
        &self,
        admin: &AdminComponent,
        packages: &[String],
    ) -> Result<(), PolicyError>;

    /// Replace the disabled keyguard feature mask
    async fn set_keyguard_disabled_features(
        &self,
        admin: &AdminComponent,
        features: KeyguardFeatures,
    ) -> Result<(), PolicyError>;
}

#[async_trait]
impl<T: DevicePolicyEffects + ?Sized> DevicePolicyEffects for Arc<T> {
    async fn set_lock_task_packages(
        &self,
        admin: &AdminComponent,
        packages: &[String],
    ) -> Result<(), PolicyError> {
        (**self).set_lock_task_packages(admin, packages).await
    }

    async fn set_keyguard_disabled_features(
        &self,
        admin: &AdminComponent,
        features: KeyguardFeatures,
    ) -> Result<(), PolicyError> {
        (**self)
            .set_keyguard_disabled_features(admin, features)
            .await
    }
}
