//! # Lockdown Testkit
//!
//! Mock handlers for every collaborator effect, a composite mock effect
//! system, fixtures and proptest strategies.

pub mod device_policy;
pub mod effects;
pub mod launch;
pub mod notification;
pub mod persistence;
pub mod strategies;

pub use device_policy::{DevicePolicyState, MockDevicePolicyHandler};
pub use effects::MockLockdownEffects;
pub use launch::MockLaunchHandler;
pub use notification::MockNotificationHandler;
pub use persistence::MemoryPersistenceHandler;

use lockdown_core::{AgentConfig, EnrollmentExtras, ENROLLED_ID_KEY};

/// Package identifier used by fixtures
pub const TEST_PACKAGE: &str = "com.emilocker.mdm";

/// Agent configuration for the fixture package
pub fn test_config() -> AgentConfig {
    AgentConfig::new(TEST_PACKAGE)
}

/// Extras carrying only an enrollment identifier
pub fn extras_with_id(enrolled_id: &str) -> EnrollmentExtras {
    EnrollmentExtras::new().with(ENROLLED_ID_KEY, enrolled_id)
}
