//! # Lockdown Agent
//!
//! On-device enrollment handshake for a managed device. Reacts to the
//! platform's device-admin lifecycle events and moves the device through
//! `Unprovisioned -> AdminEnabled -> Locked`, applying the lockdown policy and
//! foregrounding the lock UI on every provisioning delivery.
//!
//! ## Components
//!
//! - [`EnrollmentStore`]: durable record, read fresh on every event
//! - [`PolicyEnforcementEngine`]: idempotent policy application
//! - [`LockUiLauncher`]: foreground requests for the restricted UI
//! - [`transition`]: pure event table producing ordered action plans
//! - [`HandshakeController`]: executes plans against the collaborators
//!
//! ## Usage
//!
//! ```ignore
//! let controller = HandshakeController::new(Arc::new(platform_effects), &config)?;
//! controller.on_enabled().await?;
//! controller.on_provisioning_complete(Some(extras)).await?;
//! ```

#![forbid(unsafe_code)]

pub mod controller;
pub mod effects;
pub mod enforcement;
pub mod launcher;
pub mod store;
pub mod transition;

pub use controller::{
    DeviceAdminEvents, HandshakeController, LaunchStatus, PolicyStatus, TransitionOutcome,
};
pub use effects::LockdownEffects;
pub use enforcement::PolicyEnforcementEngine;
pub use launcher::LockUiLauncher;
pub use store::EnrollmentStore;
pub use transition::{Action, PlanNote, TransitionPlan};
