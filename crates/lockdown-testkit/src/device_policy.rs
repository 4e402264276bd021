//! Recording device-policy handler

use async_trait::async_trait;
use lockdown_core::effects::DevicePolicyEffects;
use lockdown_core::{AdminComponent, KeyguardFeatures, PolicyError};
use parking_lot::Mutex;

/// Device policy as the mock platform currently holds it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DevicePolicyState {
    /// Current lock-task allow-list
    pub lock_task_packages: Vec<String>,
    /// Current disabled keyguard features
    pub keyguard_disabled_features: KeyguardFeatures,
    /// Admin component of the last successful call
    pub admin: Option<AdminComponent>,
}

/// Device-policy handler that applies calls to an in-memory device
#[derive(Debug, Default)]
pub struct MockDevicePolicyHandler {
    state: Mutex<DevicePolicyState>,
    failure: Mutex<Option<PolicyError>>,
    calls: Mutex<usize>,
}

impl MockDevicePolicyHandler {
    /// Device with no policy applied
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every call with `error` until cleared with `None`
    pub fn set_failure(&self, error: Option<PolicyError>) {
        *self.failure.lock() = error;
    }

    /// Snapshot of the device policy
    pub fn state(&self) -> DevicePolicyState {
        self.state.lock().clone()
    }

    /// Number of calls received, failed ones included
    pub fn call_count(&self) -> usize {
        *self.calls.lock()
    }

    fn check(&self) -> Result<(), PolicyError> {
        *self.calls.lock() += 1;
        match self.failure.lock().clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl DevicePolicyEffects for MockDevicePolicyHandler {
    async fn set_lock_task_packages(
        &self,
        admin: &AdminComponent,
        packages: &[String],
    ) -> Result<(), PolicyError> {
        self.check()?;
        let mut state = self.state.lock();
        state.lock_task_packages = packages.to_vec();
        state.admin = Some(admin.clone());
        Ok(())
    }

    async fn set_keyguard_disabled_features(
        &self,
        admin: &AdminComponent,
        features: KeyguardFeatures,
    ) -> Result<(), PolicyError> {
        self.check()?;
        let mut state = self.state.lock();
        state.keyguard_disabled_features = features;
        state.admin = Some(admin.clone());
        Ok(())
    }
}
