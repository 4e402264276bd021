use assert_matches::assert_matches;
use lockdown_agent::{
    DeviceAdminEvents, HandshakeController, LaunchStatus, PolicyStatus, TransitionOutcome,
};
use lockdown_core::config::DEFAULT_ACTIVATION_MESSAGE;
use lockdown_core::{
    AgentConfig, DeviceLifecycleState, EnrollmentError, EnrollmentExtras, EnrollmentRecord,
    KeyguardFeatures, LifecycleEvent, PolicyError, StoreError,
};
use lockdown_testkit::{extras_with_id, test_config, MockLockdownEffects, TEST_PACKAGE};
use std::sync::Arc;

fn controller() -> (
    Arc<MockLockdownEffects>,
    HandshakeController<MockLockdownEffects>,
) {
    let effects = Arc::new(MockLockdownEffects::new());
    let controller =
        HandshakeController::new(effects.clone(), &test_config()).expect("valid config");
    (effects, controller)
}

async fn stored(controller: &HandshakeController<MockLockdownEffects>) -> EnrollmentRecord {
    controller.store().load().await.expect("record readable")
}

#[tokio::test]
async fn activation_then_provisioning_locks_device() {
    let (effects, controller) = controller();

    let activated = controller.on_enabled().await.expect("activation handled");
    assert_eq!(activated.current(), DeviceLifecycleState::AdminEnabled);

    let locked = controller
        .on_provisioning_complete(Some(extras_with_id("DEV-42")))
        .await
        .expect("provisioning handled");

    assert_eq!(locked.previous, DeviceLifecycleState::AdminEnabled);
    assert_eq!(locked.policy, PolicyStatus::Applied);
    assert_eq!(locked.launch, LaunchStatus::Requested);

    let record = stored(&controller).await;
    assert_eq!(record.enrolled_id.as_deref(), Some("DEV-42"));
    assert_eq!(record.state, DeviceLifecycleState::Locked);
    assert!(record.policy_confirmed);

    let device = effects.device_policy.state();
    assert_eq!(device.lock_task_packages, vec![TEST_PACKAGE.to_string()]);
    assert_eq!(device.keyguard_disabled_features, KeyguardFeatures::ALL);
    assert_eq!(device.admin, Some(test_config().admin_component()));

    assert_eq!(
        effects.launcher.requests(),
        vec![(test_config().lock_ui_target(), true)]
    );
    assert_eq!(
        effects.notifications.messages(),
        vec![DEFAULT_ACTIVATION_MESSAGE.to_string()]
    );
}

#[tokio::test]
async fn provisioning_without_extras_still_locks() {
    let (effects, controller) = controller();
    controller.on_enabled().await.unwrap();

    let outcome = controller.on_provisioning_complete(None).await.unwrap();

    assert_eq!(outcome.current(), DeviceLifecycleState::Locked);
    assert_eq!(outcome.record.enrolled_id, None);
    assert_eq!(stored(&controller).await.enrolled_id, None);
    assert_eq!(effects.launcher.launch_count(), 1);
}

#[tokio::test]
async fn redelivered_provisioning_is_idempotent() {
    let (effects, controller) = controller();
    controller.on_enabled().await.unwrap();

    let first = controller
        .on_provisioning_complete(Some(extras_with_id("DEV-42")))
        .await
        .unwrap();
    let device_after_first = effects.device_policy.state();

    let second = controller
        .on_provisioning_complete(Some(extras_with_id("DEV-42")))
        .await
        .expect("re-delivery must not error");

    assert_eq!(first.record, second.record);
    assert_eq!(effects.device_policy.state(), device_after_first);
    assert_eq!(second.policy, PolicyStatus::Applied);
    // Every delivery foregrounds the lock UI, not just the first.
    assert_eq!(effects.launcher.launch_count(), 2);
}

#[tokio::test]
async fn storage_failure_aborts_before_enforcement() {
    let (effects, controller) = controller();
    controller.on_enabled().await.unwrap();
    effects.persistence.set_fail_puts(true);

    let result = controller
        .on_provisioning_complete(Some(extras_with_id("DEV-42")))
        .await;

    assert_matches!(
        result,
        Err(EnrollmentError::Store(StoreError::Unavailable { .. }))
    );
    assert_eq!(effects.device_policy.call_count(), 0);
    assert_eq!(effects.launcher.launch_count(), 0);

    effects.persistence.set_fail_puts(false);
    assert_eq!(
        stored(&controller).await.state,
        DeviceLifecycleState::AdminEnabled
    );

    // Platform re-delivers the event once storage recovers.
    let retried = controller
        .on_provisioning_complete(Some(extras_with_id("DEV-42")))
        .await
        .unwrap();
    assert_eq!(retried.current(), DeviceLifecycleState::Locked);
}

#[tokio::test]
async fn policy_failure_locks_degraded_and_recovers_on_next_event() {
    let (effects, controller) = controller();
    controller.on_enabled().await.unwrap();
    effects
        .device_policy
        .set_failure(Some(PolicyError::unavailable("service restarting")));

    let degraded = controller
        .on_provisioning_complete(Some(extras_with_id("DEV-42")))
        .await
        .expect("policy failure is not surfaced");

    assert_eq!(degraded.current(), DeviceLifecycleState::Locked);
    assert_matches!(degraded.policy, PolicyStatus::Failed(PolicyError::Unavailable { .. }));
    assert_eq!(degraded.launch, LaunchStatus::Requested);
    assert!(degraded.is_degraded());
    assert!(stored(&controller).await.needs_policy_retry());

    effects.device_policy.set_failure(None);
    let recovered: TransitionOutcome = controller.on_enabled().await.unwrap();

    assert_eq!(recovered.policy, PolicyStatus::Applied);
    assert!(!recovered.is_degraded());
    assert!(stored(&controller).await.policy_confirmed);
    assert_eq!(
        effects.device_policy.state().lock_task_packages,
        vec![TEST_PACKAGE.to_string()]
    );
    // The retry brings the lock UI back to the foreground as well.
    assert_eq!(recovered.launch, LaunchStatus::Requested);
    assert_eq!(effects.launcher.launch_count(), 2);
}

#[tokio::test]
async fn unreadable_record_aborts_before_enforcement() {
    let (effects, controller) = controller();
    controller.on_enabled().await.unwrap();
    effects.persistence.set_fail_gets(true);

    let result = controller
        .on_provisioning_complete(Some(extras_with_id("DEV-42")))
        .await;

    assert_matches!(
        result,
        Err(EnrollmentError::Store(StoreError::Unavailable { .. }))
    );
    assert_eq!(effects.persistence.put_count(), 1);
    assert_eq!(effects.device_policy.call_count(), 0);
    assert_eq!(effects.launcher.launch_count(), 0);

    effects.persistence.set_fail_gets(false);
    assert_eq!(
        stored(&controller).await.state,
        DeviceLifecycleState::AdminEnabled
    );
}

#[tokio::test]
async fn lost_policy_confirmation_reapplies_on_next_event() {
    let (effects, controller) = controller();
    controller.on_enabled().await.unwrap();
    // The Locked commit lands, the confirmation write after it does not.
    effects.persistence.fail_after_puts(1);

    let outcome = controller
        .on_provisioning_complete(Some(extras_with_id("DEV-42")))
        .await
        .expect("confirmation failure is not surfaced");

    assert_eq!(outcome.policy, PolicyStatus::Applied);
    assert_eq!(outcome.current(), DeviceLifecycleState::Locked);
    assert!(!outcome.record.policy_confirmed);
    let persisted = stored(&controller).await;
    assert!(persisted.needs_policy_retry());
    assert_eq!(persisted.enrolled_id.as_deref(), Some("DEV-42"));

    effects.persistence.clear_put_budget();
    let policy_calls = effects.device_policy.call_count();
    let retried = controller.on_enabled().await.unwrap();

    assert_eq!(retried.policy, PolicyStatus::Applied);
    assert!(effects.device_policy.call_count() > policy_calls);
    assert!(stored(&controller).await.policy_confirmed);
}

#[tokio::test]
async fn unauthorized_policy_is_retried_by_redelivered_provisioning() {
    let (effects, controller) = controller();
    effects
        .device_policy
        .set_failure(Some(PolicyError::unauthorized("admin revoked")));

    let first = controller
        .on_provisioning_complete(Some(extras_with_id("DEV-9")))
        .await
        .unwrap();
    assert_matches!(first.policy, PolicyStatus::Failed(PolicyError::Unauthorized { .. }));

    effects.device_policy.set_failure(None);
    let second = controller
        .on_provisioning_complete(Some(extras_with_id("DEV-9")))
        .await
        .unwrap();
    assert_eq!(second.policy, PolicyStatus::Applied);
    assert_eq!(second.record.enrolled_id.as_deref(), Some("DEV-9"));
}

#[tokio::test]
async fn repeated_activation_has_no_side_effects_beyond_notification() {
    let (effects, controller) = controller();

    controller.on_enabled().await.unwrap();
    controller.on_enabled().await.unwrap();
    controller.on_enabled().await.unwrap();

    assert_eq!(effects.persistence.put_count(), 1);
    assert_eq!(effects.device_policy.call_count(), 0);
    assert_eq!(effects.launcher.launch_count(), 0);
    assert_eq!(effects.notifications.messages().len(), 3);
}

#[tokio::test]
async fn activation_after_lock_keeps_device_locked() {
    let (effects, controller) = controller();
    controller.on_enabled().await.unwrap();
    controller
        .on_provisioning_complete(Some(extras_with_id("DEV-42")))
        .await
        .unwrap();
    let writes = effects.persistence.put_count();
    let policy_calls = effects.device_policy.call_count();

    let outcome = controller.on_enabled().await.unwrap();

    assert_eq!(outcome.current(), DeviceLifecycleState::Locked);
    assert_eq!(outcome.policy, PolicyStatus::NotAttempted);
    assert_eq!(effects.persistence.put_count(), writes);
    assert_eq!(effects.device_policy.call_count(), policy_calls);
    assert_eq!(effects.launcher.launch_count(), 1);
}

#[tokio::test]
async fn notification_failure_never_blocks_activation() {
    let (effects, controller) = controller();
    effects.notifications.set_fail(true);

    let outcome = controller.on_enabled().await.expect("notification is best effort");
    assert_eq!(outcome.current(), DeviceLifecycleState::AdminEnabled);
}

#[tokio::test]
async fn launch_rejection_is_not_fatal() {
    let (effects, controller) = controller();
    controller.on_enabled().await.unwrap();
    effects.launcher.set_reject(true);

    let outcome = controller
        .on_provisioning_complete(Some(extras_with_id("DEV-42")))
        .await
        .expect("launch failure is absorbed");

    assert_eq!(outcome.current(), DeviceLifecycleState::Locked);
    assert_matches!(outcome.launch, LaunchStatus::Failed(_));
    assert_eq!(outcome.policy, PolicyStatus::Applied);
}

#[tokio::test]
async fn provisioning_before_activation_goes_straight_to_locked() {
    let (_, controller) = controller();

    let outcome = controller
        .handle(LifecycleEvent::provisioning_complete(extras_with_id("DEV-1")))
        .await
        .unwrap();

    assert_eq!(outcome.previous, DeviceLifecycleState::Unprovisioned);
    assert_eq!(outcome.current(), DeviceLifecycleState::Locked);
}

#[tokio::test]
async fn redelivery_without_extras_keeps_enrollment_id() {
    let (_, controller) = controller();
    controller
        .on_provisioning_complete(Some(extras_with_id("DEV-42")))
        .await
        .unwrap();

    let outcome = controller.on_provisioning_complete(None).await.unwrap();
    assert_eq!(outcome.record.enrolled_id.as_deref(), Some("DEV-42"));
}

#[tokio::test]
async fn extras_bundle_from_provisioning_payload() {
    let (_, controller) = controller();
    let extras = EnrollmentExtras::from_json(
        r#"{"enrolledId":"DEV-77","server_url":"https://console.example","auto_enroll":true,"policy":"strict_emi"}"#,
    )
    .unwrap();

    let outcome = controller
        .on_provisioning_complete(Some(extras))
        .await
        .unwrap();
    assert_eq!(outcome.record.enrolled_id.as_deref(), Some("DEV-77"));
}

#[tokio::test]
async fn corrupt_record_is_surfaced() {
    let (effects, controller) = controller();
    effects
        .persistence
        .insert_raw(controller.store().key(), b"\xff\xfe".to_vec());

    assert_matches!(
        controller.on_enabled().await,
        Err(EnrollmentError::Store(StoreError::Corrupt { .. }))
    );
}

#[tokio::test]
async fn concurrent_deliveries_are_serialised() {
    let (effects, controller) = controller();

    let (a, b) = tokio::join!(
        controller.on_provisioning_complete(Some(extras_with_id("DEV-42"))),
        controller.on_enabled(),
    );
    a.unwrap();
    b.unwrap();

    assert_eq!(stored(&controller).await.state, DeviceLifecycleState::Locked);
    assert_eq!(effects.launcher.launch_count(), 1);
}

#[test]
fn invalid_configuration_is_rejected() {
    let effects = Arc::new(MockLockdownEffects::new());
    let result = HandshakeController::new(effects, &AgentConfig::new(""));
    assert!(matches!(result, Err(EnrollmentError::Config(_))));
}
