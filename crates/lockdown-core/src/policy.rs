//! Policy bundle applied when the device locks

use bitflags::bitflags;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of the admin receiver that device-policy calls are scoped to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AdminComponent {
    /// Package that owns the receiver
    pub package: String,
    /// Receiver class name
    pub class: String,
}

impl AdminComponent {
    /// Create a component identity
    pub fn new(package: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            class: class.into(),
        }
    }
}

impl fmt::Display for AdminComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.package, self.class)
    }
}

bitflags! {
    /// Bitmask of lock-screen features disabled by the admin.
    ///
    /// Bit values follow the platform's keyguard constants.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct KeyguardFeatures: u32 {
        /// Lock-screen widgets
        const WIDGETS_ALL = 1 << 0;
        /// Camera on the secure lock screen
        const SECURE_CAMERA = 1 << 1;
        /// Notifications on the secure lock screen
        const SECURE_NOTIFICATIONS = 1 << 2;
        /// Unredacted notification content
        const UNREDACTED_NOTIFICATIONS = 1 << 3;
        /// Trust agents
        const TRUST_AGENTS = 1 << 4;
        /// Fingerprint unlock
        const FINGERPRINT = 1 << 5;
        /// Remote input from notifications
        const REMOTE_INPUT = 1 << 6;
        /// Face unlock
        const FACE = 1 << 7;
        /// Iris unlock
        const IRIS = 1 << 8;
        /// Lock-screen shortcuts
        const SHORTCUTS_ALL = 1 << 9;
        /// Every feature, including ones added by future platform releases
        const ALL = 0x7fff_ffff;
    }
}

impl Default for KeyguardFeatures {
    fn default() -> Self {
        Self::empty()
    }
}

/// Policy applied to the device by the enforcement engine.
///
/// The allow-list always contains the agent's own package, in first position.
/// Only [`PolicyConfiguration::lockdown`] builds one, so there is no decoder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PolicyConfiguration {
    lock_task_packages: IndexSet<String>,
    keyguard_disabled_features: KeyguardFeatures,
}

impl PolicyConfiguration {
    /// The fixed lockdown policy: only `self_package` may run in lock-task
    /// mode and every keyguard feature is disabled.
    pub fn lockdown(self_package: impl Into<String>) -> Self {
        let mut lock_task_packages = IndexSet::new();
        lock_task_packages.insert(self_package.into());
        Self {
            lock_task_packages,
            keyguard_disabled_features: KeyguardFeatures::ALL,
        }
    }

    /// Ordered lock-task allow-list
    pub fn lock_task_packages(&self) -> &IndexSet<String> {
        &self.lock_task_packages
    }

    /// Keyguard mask
    pub fn keyguard_disabled_features(&self) -> KeyguardFeatures {
        self.keyguard_disabled_features
    }

    /// Whether `package` may enter lock-task mode
    pub fn allows(&self, package: &str) -> bool {
        self.lock_task_packages.contains(package)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lockdown_policy_is_self_only_and_all_disabled() {
        let policy = PolicyConfiguration::lockdown("com.emilocker.mdm");
        assert_eq!(policy.lock_task_packages().len(), 1);
        assert!(policy.allows("com.emilocker.mdm"));
        assert_eq!(policy.keyguard_disabled_features(), KeyguardFeatures::ALL);
    }

    #[test]
    fn test_all_mask_covers_named_features() {
        let named = KeyguardFeatures::WIDGETS_ALL
            | KeyguardFeatures::SECURE_CAMERA
            | KeyguardFeatures::TRUST_AGENTS
            | KeyguardFeatures::FINGERPRINT
            | KeyguardFeatures::SHORTCUTS_ALL;
        assert!(KeyguardFeatures::ALL.contains(named));
        assert!(!KeyguardFeatures::default().contains(KeyguardFeatures::FACE));
    }

    #[test]
    fn test_mask_matches_platform_values() {
        assert_eq!(KeyguardFeatures::ALL.bits(), 0x7fff_ffff);
        assert_eq!(KeyguardFeatures::FACE.bits(), 128);
        assert_eq!(KeyguardFeatures::default().bits(), 0);
        let unknown = KeyguardFeatures::from_bits_retain(1 << 20);
        assert!(KeyguardFeatures::ALL.contains(unknown));
    }

    #[test]
    fn test_policy_serializes_mask_and_ordered_packages() {
        let policy = PolicyConfiguration::lockdown("com.emilocker.mdm");
        let json = serde_json::to_value(&policy).unwrap();
        assert_eq!(json["lock_task_packages"], serde_json::json!(["com.emilocker.mdm"]));
        assert!(!json["keyguard_disabled_features"].is_null());
    }

    #[test]
    fn test_component_display() {
        let component = AdminComponent::new("com.emilocker.mdm", ".DeviceAdminReceiver");
        assert_eq!(component.to_string(), "com.emilocker.mdm/.DeviceAdminReceiver");
    }
}
