//! Effect traits for every platform collaborator
//!
//! The agent never talks to the platform directly. Each collaborator is an
//! effect trait here; production handlers live in `lockdown-effects` and test
//! doubles in `lockdown-testkit`.

pub mod device_policy;
pub mod launch;
pub mod notification;
pub mod persistence;

pub use device_policy::DevicePolicyEffects;
pub use launch::{LaunchEffects, UiTarget};
pub use notification::NotificationEffects;
pub use persistence::PersistenceEffects;
