//! Policy Enforcement Engine
//!
//! Pushes a [`PolicyConfiguration`] to the device-policy service. Both values
//! are full replacements, so applying the same configuration again leaves the
//! device unchanged.

use lockdown_core::effects::DevicePolicyEffects;
use lockdown_core::{AdminComponent, PolicyConfiguration, PolicyError};
use std::sync::Arc;
use tracing::debug;

/// Applies lockdown policy through the device-policy effect
pub struct PolicyEnforcementEngine<P: DevicePolicyEffects + ?Sized> {
    device_policy: Arc<P>,
    admin: AdminComponent,
}

impl<P: DevicePolicyEffects + ?Sized> PolicyEnforcementEngine<P> {
    /// Engine issuing calls on behalf of `admin`
    pub fn new(device_policy: Arc<P>, admin: AdminComponent) -> Self {
        Self {
            device_policy,
            admin,
        }
    }

    /// Replace the allow-list, then the keyguard mask.
    ///
    /// Stops at the first failure; a later call re-applies both values.
    pub async fn apply(&self, config: &PolicyConfiguration) -> Result<(), PolicyError> {
        let packages: Vec<String> = config.lock_task_packages().iter().cloned().collect();
        self.device_policy
            .set_lock_task_packages(&self.admin, &packages)
            .await?;

        let features = config.keyguard_disabled_features();
        self.device_policy
            .set_keyguard_disabled_features(&self.admin, features)
            .await?;

        debug!(
            admin = %self.admin,
            packages = ?packages,
            keyguard_mask = features.bits(),
            "lockdown policy applied"
        );
        Ok(())
    }
}
