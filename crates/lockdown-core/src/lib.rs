//! # Lockdown Core
//!
//! Foundation types for the device lockdown agent: the enrollment lifecycle,
//! the persisted record, provisioning extras, the fixed policy bundle, the
//! error taxonomy and one effect trait per platform collaborator.
//!
//! This crate performs no I/O of its own apart from reading configuration
//! files.

#![forbid(unsafe_code)]

pub mod config;
pub mod effects;
pub mod errors;
pub mod events;
pub mod extras;
pub mod lifecycle;
pub mod policy;

pub use config::AgentConfig;
pub use errors::{
    ConfigError, EnrollmentError, LaunchError, NotificationError, PolicyError, StoreError,
};
pub use events::LifecycleEvent;
pub use extras::{EnrollmentExtras, ExtraValue, MissingEnrolledId, ENROLLED_ID_KEY};
pub use lifecycle::{DeviceLifecycleState, EnrollmentRecord};
pub use policy::{AdminComponent, KeyguardFeatures, PolicyConfiguration};
