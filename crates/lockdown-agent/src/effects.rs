//! Composed effect bound for the lockdown agent
//!
//! The controller needs exactly the four platform collaborators. Any type
//! implementing all of them is usable as the agent's effect system.

use lockdown_core::effects::{
    DevicePolicyEffects, LaunchEffects, NotificationEffects, PersistenceEffects,
};

/// Every collaborator the enrollment handshake drives
pub trait LockdownEffects:
    PersistenceEffects + DevicePolicyEffects + LaunchEffects + NotificationEffects + Send + Sync
{
}

impl<T> LockdownEffects for T where
    T: PersistenceEffects + DevicePolicyEffects + LaunchEffects + NotificationEffects + Send + Sync
{
}
