//! Wait Estimation Integration Tests
//!
//! Completed waits feed per-(queue type, bracket) histories; estimates
//! are the mean of the recent window and fall back to a configured
//! default when no history exists.

use std::sync::Arc;
use std::time::Duration;

use muster_core::application::{GateConfig, JoinGate};
use muster_core::domain::{Actor, ActorId, JoinRequest, JoinVerdict, QueueTypeId, RoleTag};
use muster_core::port::id_provider::mocks::SequentialIds;
use muster_core::port::match_signal::mocks::CountingSignal;
use muster_core::port::notifier::mocks::RecordingNotifier;
use muster_core::port::time_provider::mocks::ManualClock;
use muster_core::port::PolicySet;
use muster_infra_content::default_content;

const VALLEY: u32 = 30;
const GULCH: u32 = 489;

fn build_gate() -> (Arc<JoinGate>, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::at(1_000_000));
    let gate = Arc::new(JoinGate::new(
        GateConfig::default(),
        Arc::new(default_content()),
        PolicySet::new(),
        Arc::new(RecordingNotifier::new()),
        Arc::new(CountingSignal::new()),
        clock.clone(),
        Arc::new(SequentialIds::new()),
    ));
    (gate, clock)
}

fn soldier(id: ActorId, level: u32) -> Actor {
    Actor::new(
        id,
        format!("soldier-{}", id),
        level,
        RoleTag::new("WARRIOR"),
        0,
    )
}

fn estimate_of(verdict: &JoinVerdict) -> Duration {
    match verdict {
        JoinVerdict::Accepted { wait_estimate, .. } => *wait_estimate,
        other => panic!("expected acceptance, got {:?}", other),
    }
}

/// Complete one wait of `wait_ms` for `id` on `activity`
async fn sample(gate: &JoinGate, clock: &ManualClock, id: ActorId, activity: u32, wait_ms: i64) {
    gate.attach_actor(soldier(id, 45)).await.unwrap();
    gate.join(id, JoinRequest::solo(activity)).await.unwrap();
    clock.advance(wait_ms);
    gate.assign(id, QueueTypeId::unrated(activity), 9000 + id)
        .await
        .unwrap();
}

/// Waits of 10s, 20s and 30s make the next estimate 20s
#[tokio::test]
async fn test_estimate_is_mean_of_completed_waits() {
    let (gate, clock) = build_gate();

    sample(&gate, &clock, 1, VALLEY, 10_000).await;
    sample(&gate, &clock, 2, VALLEY, 20_000).await;
    sample(&gate, &clock, 3, VALLEY, 30_000).await;

    gate.attach_actor(soldier(4, 45)).await.unwrap();
    let verdict = gate.join(4, JoinRequest::solo(VALLEY)).await.unwrap();
    assert_eq!(estimate_of(&verdict), Duration::from_secs(20));

    println!("✅ [10s, 20s, 30s] → 20s estimate");
}

/// A queue with no completed waits reports the configured default
#[tokio::test]
async fn test_estimate_defaults_without_history() {
    let (gate, _) = build_gate();
    gate.attach_actor(soldier(1, 45)).await.unwrap();

    let verdict = gate.join(1, JoinRequest::solo(VALLEY)).await.unwrap();
    assert_eq!(estimate_of(&verdict), Duration::from_secs(30));

    println!("✅ No history → default 30s estimate");
}

/// Histories are scoped per bracket: a fast 40-49 queue says nothing
/// about the 10-19 queue of the same activity
#[tokio::test]
async fn test_estimates_scoped_per_bracket() {
    let (gate, clock) = build_gate();

    sample(&gate, &clock, 1, VALLEY, 5_000).await;

    // Same activity, different bracket
    gate.attach_actor(soldier(2, 15)).await.unwrap();
    let verdict = gate.join(2, JoinRequest::solo(VALLEY)).await.unwrap();
    assert_eq!(estimate_of(&verdict), Duration::from_secs(30));

    // Same bracket sees the sample
    gate.attach_actor(soldier(3, 45)).await.unwrap();
    let verdict = gate.join(3, JoinRequest::solo(VALLEY)).await.unwrap();
    assert_eq!(estimate_of(&verdict), Duration::from_secs(5));

    println!("✅ Bracket-scoped histories");
}

/// Histories are scoped per queue type as well
#[tokio::test]
async fn test_estimates_scoped_per_queue_type() {
    let (gate, clock) = build_gate();

    sample(&gate, &clock, 1, VALLEY, 5_000).await;

    gate.attach_actor(soldier(2, 45)).await.unwrap();
    let verdict = gate.join(2, JoinRequest::solo(GULCH)).await.unwrap();
    assert_eq!(estimate_of(&verdict), Duration::from_secs(30));

    println!("✅ Queue-type-scoped histories");
}

/// Only the ten most recent waits count
#[tokio::test]
async fn test_estimate_window_drops_old_samples() {
    let (gate, clock) = build_gate();

    // Twelve waits of 1s..12s; the window keeps 3s..12s, mean 7.5s
    for id in 1..=12 {
        sample(&gate, &clock, id, VALLEY, id as i64 * 1_000).await;
    }

    gate.attach_actor(soldier(99, 45)).await.unwrap();
    let verdict = gate.join(99, JoinRequest::solo(VALLEY)).await.unwrap();
    assert_eq!(estimate_of(&verdict), Duration::from_millis(7_500));

    println!("✅ Sliding window keeps the ten newest samples");
}

/// An abandoned wait leaves no sample behind
#[tokio::test]
async fn test_abandoned_wait_not_sampled() {
    let (gate, clock) = build_gate();

    gate.attach_actor(soldier(1, 45)).await.unwrap();
    gate.join(1, JoinRequest::solo(VALLEY)).await.unwrap();
    clock.advance(120_000);
    gate.leave(1, QueueTypeId::unrated(VALLEY)).await.unwrap();

    gate.attach_actor(soldier(2, 45)).await.unwrap();
    let verdict = gate.join(2, JoinRequest::solo(VALLEY)).await.unwrap();
    assert_eq!(estimate_of(&verdict), Duration::from_secs(30));

    println!("✅ Abandoned waits never pollute the history");
}
