//! Enrollment Handshake Controller
//!
//! Executes [`TransitionPlan`]s against the collaborators. Holds no
//! enrollment state between events: every event starts from a fresh
//! [`EnrollmentStore::load`].
//!
//! Error propagation:
//! - persistence failures abort the event and are returned to the platform,
//! - policy failures are logged and reported in the outcome,
//! - launch and notification failures are logged and absorbed.

use crate::effects::LockdownEffects;
use crate::enforcement::PolicyEnforcementEngine;
use crate::launcher::LockUiLauncher;
use crate::store::EnrollmentStore;
use crate::transition::{self, Action, PlanNote, TransitionPlan};
use async_lock::Mutex;
use async_trait::async_trait;
use lockdown_core::{
    AgentConfig, DeviceLifecycleState, EnrollmentError, EnrollmentExtras, EnrollmentRecord,
    LaunchError, LifecycleEvent, PolicyConfiguration, PolicyError,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// What happened to the policy during an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyStatus {
    /// The plan did not call for enforcement
    NotAttempted,
    /// Policy applied
    Applied,
    /// Enforcement failed; retried on the next event
    Failed(PolicyError),
}

/// What happened to the lock UI during an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchStatus {
    /// The plan did not call for a launch
    NotAttempted,
    /// Foreground request accepted
    Requested,
    /// Foreground request rejected
    Failed(LaunchError),
}

/// Result of handling one lifecycle event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionOutcome {
    /// State loaded at the start of the event
    pub previous: DeviceLifecycleState,
    /// Durable record at the end of the event
    pub record: EnrollmentRecord,
    /// Enforcement result
    pub policy: PolicyStatus,
    /// Lock UI result
    pub launch: LaunchStatus,
}

impl TransitionOutcome {
    /// Durable state at the end of the event
    pub fn current(&self) -> DeviceLifecycleState {
        self.record.state
    }

    /// Locked with policy not confirmed
    pub fn is_degraded(&self) -> bool {
        self.record.needs_policy_retry()
    }
}

/// Device-admin callbacks as the platform adapter sees them.
///
/// Every receiver registered with the platform forwards here, so all of them
/// share one implementation of the handshake.
#[async_trait]
pub trait DeviceAdminEvents: Send + Sync {
    /// Device-admin capability granted
    async fn on_enabled(&self) -> Result<TransitionOutcome, EnrollmentError>;

    /// Managed provisioning finished
    async fn on_provisioning_complete(
        &self,
        extras: Option<EnrollmentExtras>,
    ) -> Result<TransitionOutcome, EnrollmentError>;
}

/// Top-level enrollment state machine
pub struct HandshakeController<E: LockdownEffects + ?Sized> {
    effects: Arc<E>,
    store: EnrollmentStore<E>,
    engine: PolicyEnforcementEngine<E>,
    launcher: LockUiLauncher<E>,
    policy: PolicyConfiguration,
    activation_message: String,
    gate: Mutex<()>,
}

impl<E: LockdownEffects + ?Sized> HandshakeController<E> {
    /// Wire a controller from a validated configuration
    pub fn new(effects: Arc<E>, config: &AgentConfig) -> Result<Self, EnrollmentError> {
        config.validate()?;
        Ok(Self {
            store: EnrollmentStore::new(effects.clone(), config.storage_namespace.clone()),
            engine: PolicyEnforcementEngine::new(effects.clone(), config.admin_component()),
            launcher: LockUiLauncher::new(effects.clone(), config.lock_ui_target()),
            policy: config.policy_configuration(),
            activation_message: config.activation_message.clone(),
            gate: Mutex::new(()),
            effects,
        })
    }

    /// The enrollment store this controller reads and writes
    pub fn store(&self) -> &EnrollmentStore<E> {
        &self.store
    }

    /// Policy applied on lock
    pub fn policy(&self) -> &PolicyConfiguration {
        &self.policy
    }

    /// Handle one lifecycle event to completion.
    ///
    /// Handlers are serialised so the store is never raced even if the host
    /// delivers events concurrently.
    #[tracing::instrument(skip_all, fields(event = event.name()))]
    pub async fn handle(
        &self,
        event: LifecycleEvent,
    ) -> Result<TransitionOutcome, EnrollmentError> {
        let _serial = self.gate.lock().await;

        let current = self.store.load().await?;
        let plan = transition::plan(&current, &event);
        log_plan(&plan);

        let outcome = self.execute(current, plan).await?;
        info!(
            from = %outcome.previous,
            to = %outcome.current(),
            enrolled_id = ?outcome.record.enrolled_id,
            degraded = outcome.is_degraded(),
            "lifecycle event handled"
        );
        Ok(outcome)
    }

    async fn execute(
        &self,
        current: EnrollmentRecord,
        plan: TransitionPlan,
    ) -> Result<TransitionOutcome, EnrollmentError> {
        let mut outcome = TransitionOutcome {
            previous: current.state,
            record: current,
            policy: PolicyStatus::NotAttempted,
            launch: LaunchStatus::NotAttempted,
        };

        for action in plan.actions {
            match action {
                Action::Notify => self.notify().await,
                Action::Persist(next) => {
                    if let Err(err) = self.store.save(&next).await {
                        warn!(
                            error = %err,
                            state = %outcome.record.state,
                            "transition aborted, record unchanged"
                        );
                        return Err(err.into());
                    }
                    outcome.record = next;
                }
                Action::ApplyPolicy => {
                    outcome.policy = self.enforce(&mut outcome.record).await;
                }
                Action::LaunchLockUi => {
                    outcome.launch = match self.launcher.launch_foreground().await {
                        Ok(()) => {
                            debug!(ui = %self.launcher.target(), "lock UI foreground requested");
                            LaunchStatus::Requested
                        }
                        Err(err) => {
                            warn!(
                                error = %err,
                                ui = %self.launcher.target(),
                                "lock UI launch rejected"
                            );
                            LaunchStatus::Failed(err)
                        }
                    };
                }
            }
        }

        Ok(outcome)
    }

    async fn notify(&self) {
        if let Err(err) = self.effects.notify(&self.activation_message).await {
            debug!(error = %err, "activation notification dropped");
        }
    }

    /// Apply policy and record the confirmation. A failed confirmation write
    /// only means one more idempotent application on a later event.
    async fn enforce(&self, record: &mut EnrollmentRecord) -> PolicyStatus {
        if let Err(err) = self.engine.apply(&self.policy).await {
            warn!(error = %err, "policy enforcement failed, locked without confirmed policy");
            return PolicyStatus::Failed(err);
        }

        if !record.policy_confirmed {
            let confirmed = EnrollmentRecord {
                policy_confirmed: true,
                ..record.clone()
            };
            match self.store.save(&confirmed).await {
                Ok(()) => *record = confirmed,
                Err(err) => warn!(error = %err, "policy applied but confirmation not persisted"),
            }
        }
        PolicyStatus::Applied
    }
}

fn log_plan(plan: &TransitionPlan) {
    for note in &plan.notes {
        match note {
            PlanNote::ExtrasMissing => {
                warn!("provisioning completed without extras, continuing without enrollment id")
            }
            PlanNote::EnrolledIdMissing(reason) => {
                warn!(?reason, "extras carry no usable enrollment id")
            }
            PlanNote::KeptPreviousEnrolledId => {
                debug!("no enrollment id delivered, keeping stored id")
            }
            PlanNote::ActivationSkipped => {
                warn!("provisioning completed before admin activation was recorded")
            }
            PlanNote::PolicyRetry => info!("retrying policy enforcement for locked device"),
        }
    }
    debug!(from = %plan.from, to = %plan.to, actions = plan.actions.len(), "transition planned");
}

#[async_trait]
impl<E: LockdownEffects + ?Sized> DeviceAdminEvents for HandshakeController<E> {
    async fn on_enabled(&self) -> Result<TransitionOutcome, EnrollmentError> {
        self.handle(LifecycleEvent::AdminActivated).await
    }

    async fn on_provisioning_complete(
        &self,
        extras: Option<EnrollmentExtras>,
    ) -> Result<TransitionOutcome, EnrollmentError> {
        self.handle(LifecycleEvent::ProvisioningComplete { extras }).await
    }
}
