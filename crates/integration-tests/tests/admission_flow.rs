//! End-to-End Admission Flow Tests
//!
//! Drives the full gate lifecycle against the built-in content tables:
//! attach, join, status, assign, leave, detach.

use std::sync::Arc;

use muster_core::application::{GateConfig, JoinGate};
use muster_core::domain::{Actor, ActorId, JoinRequest, JoinVerdict, QueueTypeId, RejectReason, RoleTag};
use muster_core::port::id_provider::mocks::SequentialIds;
use muster_core::port::match_signal::mocks::CountingSignal;
use muster_core::port::notifier::mocks::RecordingNotifier;
use muster_core::port::time_provider::mocks::ManualClock;
use muster_core::port::PolicySet;
use muster_infra_content::{default_content, default_content_file, load_content};

const VALLEY: u32 = 30;
const GULCH: u32 = 489;
const BASIN: u32 = 529;

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

/// Flow 1: login, queue, wait, assignment into an instance
#[tokio::test]
async fn test_full_lifecycle_to_assignment() {
    let (gate, clock) = build_gate();

    gate.attach_actor(soldier(1, 45)).await.unwrap();

    let verdict = gate.join(1, JoinRequest::solo(VALLEY)).await.unwrap();
    let bracket = match &verdict {
        JoinVerdict::Accepted { bracket, .. } => *bracket,
        other => panic!("expected acceptance, got {:?}", other),
    };
    assert_eq!(bracket, 3, "level 45 lands in the 40-49 bracket");

    let status = gate.status(1).await.unwrap();
    assert_eq!(status.len(), 1);
    assert_eq!(status[0].queue_type, QueueTypeId::unrated(VALLEY));
    assert_eq!(status[0].slot, 0);

    clock.advance(25_000);
    gate.assign(1, QueueTypeId::unrated(VALLEY), 9001)
        .await
        .unwrap();

    assert!(gate.status(1).await.unwrap().is_empty());
    assert_eq!(gate.stats().await.active_tickets, 0);

    println!("✅ Full lifecycle: attach → join → assign");
}

/// Flow 2: both slots fill, the third join is refused
#[tokio::test]
async fn test_slot_table_capacity() {
    let (gate, _) = build_gate();
    gate.attach_actor(soldier(1, 45)).await.unwrap();

    assert!(gate
        .join(1, JoinRequest::solo(VALLEY))
        .await
        .unwrap()
        .is_accepted());
    assert!(gate
        .join(1, JoinRequest::solo(GULCH))
        .await
        .unwrap()
        .is_accepted());

    let third = gate.join(1, JoinRequest::solo(BASIN)).await.unwrap();
    assert_eq!(third.reason(), Some(RejectReason::TooManyQueues));
    assert_eq!(gate.stats().await.active_tickets, 2);

    println!("✅ Slot capacity enforced at two concurrent queues");
}

/// Flow 3: leave frees the slot and a rejoin succeeds
#[tokio::test]
async fn test_leave_then_rejoin() {
    let (gate, clock) = build_gate();
    gate.attach_actor(soldier(1, 45)).await.unwrap();

    gate.join(1, JoinRequest::solo(VALLEY)).await.unwrap();
    clock.advance(5_000);
    gate.leave(1, QueueTypeId::unrated(VALLEY)).await.unwrap();

    assert!(gate.status(1).await.unwrap().is_empty());

    let rejoin = gate.join(1, JoinRequest::solo(VALLEY)).await.unwrap();
    assert!(rejoin.is_accepted());

    println!("✅ Leave then rejoin");
}

/// Flow 4: detach cancels every ticket the actor still holds
#[tokio::test]
async fn test_detach_cancels_held_tickets() {
    let (gate, _) = build_gate();
    gate.attach_actor(soldier(1, 45)).await.unwrap();
    gate.join(1, JoinRequest::solo(VALLEY)).await.unwrap();
    gate.join(1, JoinRequest::solo(GULCH)).await.unwrap();

    let cancelled = gate.detach_actor(1).await.unwrap();
    assert_eq!(cancelled, 2);

    let stats = gate.stats().await;
    assert_eq!(stats.actors, 0);
    assert_eq!(stats.active_tickets, 0);

    println!("✅ Detach cancelled {} tickets", cancelled);
}

/// Flow 5: content loaded from a JSON file drives the same gate
#[tokio::test]
async fn test_file_loaded_content_end_to_end() {
    let path = std::env::temp_dir().join(format!("muster-it-content-{}.json", std::process::id()));
    let raw = serde_json::to_string_pretty(&default_content_file()).unwrap();
    std::fs::write(&path, raw).unwrap();

    let content = load_content(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    let gate = Arc::new(JoinGate::new(
        GateConfig::default(),
        Arc::new(content),
        PolicySet::new(),
        Arc::new(RecordingNotifier::new()),
        Arc::new(CountingSignal::new()),
        Arc::new(ManualClock::at(1_000_000)),
        Arc::new(SequentialIds::new()),
    ));

    gate.attach_actor(soldier(1, 45)).await.unwrap();
    let verdict = gate.join(1, JoinRequest::solo(GULCH)).await.unwrap();
    assert!(verdict.is_accepted());

    println!("✅ File-loaded content admits joins");
}
