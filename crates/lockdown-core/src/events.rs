//! Lifecycle events delivered by the platform

use crate::extras::EnrollmentExtras;
use serde::{Deserialize, Serialize};

/// A platform lifecycle callback, reduced to its payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LifecycleEvent {
    /// Device-admin capability was granted (or re-announced after reboot)
    AdminActivated,
    /// Platform-managed provisioning finished
    ProvisioningComplete {
        /// Admin extras bundle, absent when the provisioner sent none
        extras: Option<EnrollmentExtras>,
    },
}

impl LifecycleEvent {
    /// Provisioning completion carrying `extras`
    pub fn provisioning_complete(extras: impl Into<Option<EnrollmentExtras>>) -> Self {
        Self::ProvisioningComplete {
            extras: extras.into(),
        }
    }

    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::AdminActivated => "admin_activated",
            Self::ProvisioningComplete { .. } => "provisioning_complete",
        }
    }
}
