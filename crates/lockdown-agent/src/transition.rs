//! Lifecycle transition table
//!
//! Pure functions from (durable record, event) to a [`TransitionPlan`]. The
//! controller executes plans; nothing here touches a collaborator, which keeps
//! monotonicity and re-delivery behaviour checkable without mocks.
//!
//! | state \ event  | AdminActivated                            | ProvisioningComplete            |
//! |----------------|-------------------------------------------|---------------------------------|
//! | Unprovisioned  | notify, persist AdminEnabled              | persist Locked, policy, launch  |
//! | AdminEnabled   | notify                                    | persist Locked, policy, launch  |
//! | Locked         | notify (+ policy, launch if unconfirmed)  | persist Locked, policy, launch  |

use lockdown_core::{
    DeviceLifecycleState, EnrollmentExtras, EnrollmentRecord, LifecycleEvent, MissingEnrolledId,
};

/// A side effect the controller must perform, in plan order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Best-effort activation confirmation
    Notify,
    /// Durably write this record; failure aborts the plan
    Persist(EnrollmentRecord),
    /// Apply the lockdown policy; failure degrades but does not abort
    ApplyPolicy,
    /// Best-effort foreground request for the lock UI
    LaunchLockUi,
}

/// Something worth logging about how the plan was derived
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanNote {
    /// Provisioning completed without an extras bundle
    ExtrasMissing,
    /// Extras present but without a usable enrollment identifier
    EnrolledIdMissing(MissingEnrolledId),
    /// No identifier in this delivery; the stored one is kept
    KeptPreviousEnrolledId,
    /// Provisioning completed before activation was observed
    ActivationSkipped,
    /// Locked without confirmed policy; re-applying
    PolicyRetry,
}

/// Ordered actions for one event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionPlan {
    /// State before the event
    pub from: DeviceLifecycleState,
    /// State once every `Persist` succeeds
    pub to: DeviceLifecycleState,
    /// Side effects, in execution order
    pub actions: Vec<Action>,
    /// Diagnostics for the log
    pub notes: Vec<PlanNote>,
}

impl TransitionPlan {
    fn stay(current: &EnrollmentRecord) -> Self {
        Self {
            from: current.state,
            to: current.state,
            actions: Vec::new(),
            notes: Vec::new(),
        }
    }

    /// Whether the plan includes `action`
    pub fn contains(&self, action: &Action) -> bool {
        self.actions.contains(action)
    }

    /// The record this plan persists, if any
    pub fn persisted_record(&self) -> Option<&EnrollmentRecord> {
        self.actions.iter().find_map(|action| match action {
            Action::Persist(record) => Some(record),
            _ => None,
        })
    }
}

/// Dispatch an event to its transition function
pub fn plan(current: &EnrollmentRecord, event: &LifecycleEvent) -> TransitionPlan {
    match event {
        LifecycleEvent::AdminActivated => admin_activated(current),
        LifecycleEvent::ProvisioningComplete { extras } => {
            provisioning_complete(current, extras.as_ref())
        }
    }
}

/// `AdminActivated`: only the first delivery changes state. Re-deliveries
/// notify again and, if a previous lock left policy unconfirmed, retry it and
/// bring the lock UI back to the foreground.
pub fn admin_activated(current: &EnrollmentRecord) -> TransitionPlan {
    let mut plan = TransitionPlan::stay(current);
    plan.actions.push(Action::Notify);

    match current.state {
        DeviceLifecycleState::Unprovisioned => {
            let next = EnrollmentRecord {
                state: DeviceLifecycleState::AdminEnabled,
                ..current.clone()
            };
            plan.to = next.state;
            plan.actions.push(Action::Persist(next));
        }
        DeviceLifecycleState::AdminEnabled => {}
        DeviceLifecycleState::Locked => {
            if current.needs_policy_retry() {
                plan.notes.push(PlanNote::PolicyRetry);
                plan.actions.push(Action::ApplyPolicy);
                plan.actions.push(Action::LaunchLockUi);
            }
        }
    }

    plan
}

/// `ProvisioningComplete`: persist `Locked`, apply policy, launch the lock UI.
/// Runs in full on every delivery.
pub fn provisioning_complete(
    current: &EnrollmentRecord,
    extras: Option<&EnrollmentExtras>,
) -> TransitionPlan {
    let mut plan = TransitionPlan::stay(current);

    let delivered_id = match extras {
        None => {
            plan.notes.push(PlanNote::ExtrasMissing);
            None
        }
        Some(extras) => match extras.lookup_enrolled_id() {
            Ok(id) => Some(id.to_string()),
            Err(reason) => {
                plan.notes.push(PlanNote::EnrolledIdMissing(reason));
                None
            }
        },
    };

    let enrolled_id = match (delivered_id, &current.enrolled_id) {
        (Some(id), _) => Some(id),
        (None, Some(previous)) => {
            plan.notes.push(PlanNote::KeptPreviousEnrolledId);
            Some(previous.clone())
        }
        (None, None) => None,
    };

    if current.state == DeviceLifecycleState::Unprovisioned {
        plan.notes.push(PlanNote::ActivationSkipped);
    }

    plan.to = DeviceLifecycleState::Locked;
    plan.actions.push(Action::Persist(EnrollmentRecord::locked(enrolled_id)));
    plan.actions.push(Action::ApplyPolicy);
    plan.actions.push(Action::LaunchLockUi);
    plan
}
