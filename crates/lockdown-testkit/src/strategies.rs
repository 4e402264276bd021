//! Proptest strategies for lifecycle types

use lockdown_core::{
    DeviceLifecycleState, EnrollmentExtras, EnrollmentRecord, ExtraValue, LifecycleEvent,
    ENROLLED_ID_KEY,
};
use proptest::prelude::*;

/// Any lifecycle state
pub fn arb_state() -> impl Strategy<Value = DeviceLifecycleState> {
    prop_oneof![
        Just(DeviceLifecycleState::Unprovisioned),
        Just(DeviceLifecycleState::AdminEnabled),
        Just(DeviceLifecycleState::Locked),
    ]
}

/// Enrollment identifiers, including the empty string
pub fn arb_enrolled_id() -> impl Strategy<Value = String> {
    prop_oneof![Just(String::new()), "DEV-[0-9]{1,4}"]
}

/// Extras bundles with and without a usable identifier
pub fn arb_extras() -> impl Strategy<Value = Option<EnrollmentExtras>> {
    prop_oneof![
        Just(None),
        Just(Some(EnrollmentExtras::new())),
        arb_enrolled_id().prop_map(|id| Some(EnrollmentExtras::new().with(ENROLLED_ID_KEY, id))),
        any::<i64>().prop_map(|n| Some(EnrollmentExtras::new().with(ENROLLED_ID_KEY, n))),
        Just(Some(EnrollmentExtras::new().with(ENROLLED_ID_KEY, ExtraValue::Null))),
    ]
}

/// Any lifecycle event
pub fn arb_event() -> impl Strategy<Value = LifecycleEvent> {
    prop_oneof![
        Just(LifecycleEvent::AdminActivated),
        arb_extras().prop_map(|extras| LifecycleEvent::ProvisioningComplete { extras }),
    ]
}

/// Any persisted record
pub fn arb_record() -> impl Strategy<Value = EnrollmentRecord> {
    (
        proptest::option::of("DEV-[0-9]{1,4}"),
        arb_state(),
        any::<bool>(),
    )
        .prop_map(|(enrolled_id, state, policy_confirmed)| EnrollmentRecord {
            enrolled_id,
            state,
            policy_confirmed,
        })
}
