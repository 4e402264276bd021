//! Device lifecycle state and the persisted enrollment record

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle of a managed device.
///
/// Variants are declared in lifecycle order so the derived `Ord` matches the
/// only permitted direction of travel.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum DeviceLifecycleState {
    /// No device-admin capability yet
    #[default]
    Unprovisioned,
    /// Device-admin granted, provisioning not finished
    AdminEnabled,
    /// Provisioned and held in restricted mode
    Locked,
}

impl DeviceLifecycleState {
    /// Whether moving from `self` to `next` keeps the lifecycle monotonic.
    /// Staying in place is allowed.
    pub fn can_advance_to(self, next: Self) -> bool {
        next >= self
    }
}

impl fmt::Display for DeviceLifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unprovisioned => "unprovisioned",
            Self::AdminEnabled => "admin-enabled",
            Self::Locked => "locked",
        };
        f.write_str(name)
    }
}

/// Durable enrollment state. Owned by the Enrollment Store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentRecord {
    /// Opaque enrollment identifier from the provisioning extras
    pub enrolled_id: Option<String>,
    /// Current lifecycle state
    pub state: DeviceLifecycleState,
    /// Set once the policy engine has applied the policy for the current
    /// `Locked` commit. Records written before this field existed decode as
    /// unconfirmed, which only costs one extra idempotent application.
    #[serde(default)]
    pub policy_confirmed: bool,
}

impl EnrollmentRecord {
    /// Record with the given state and no enrollment identifier
    pub fn with_state(state: DeviceLifecycleState) -> Self {
        Self {
            enrolled_id: None,
            state,
            policy_confirmed: false,
        }
    }

    /// Locked record carrying `enrolled_id`, policy not yet confirmed
    pub fn locked(enrolled_id: Option<String>) -> Self {
        Self {
            enrolled_id,
            state: DeviceLifecycleState::Locked,
            policy_confirmed: false,
        }
    }

    /// Locked but the policy engine has not confirmed success
    pub fn needs_policy_retry(&self) -> bool {
        self.state == DeviceLifecycleState::Locked && !self.policy_confirmed
    }
}
