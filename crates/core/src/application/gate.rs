// Join Gate - admission control facade
//
// Owns the per-process queue state. One lock serializes every
// evaluate-then-issue pair, so a request is checked and applied against
// the same state snapshot. Notices and scheduler signals go out after
// the lock drops.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::domain::{
    Actor, ActorId, DomainError, InstanceId, JoinRequest, JoinVerdict, QueueTypeId, RejectReason,
};
use crate::error::{AppError, Result};
use crate::port::{
    ContentDirectory, IdProvider, MatchSignal, Notifier, PolicySet, QueueChanged, QueueNotice,
    TimeProvider,
};
use super::config::GateConfig;
use super::estimator;
use super::issuer;
use super::registry::{self, ActorTable, QueueRegistry};
use super::rules::{self, Evaluation};

/// Mutable state behind the gate lock
#[derive(Default)]
struct GateState {
    actors: ActorTable,
    queues: QueueRegistry,
}

/// One actor's view of one held ticket
#[derive(Debug, Clone, PartialEq)]
pub struct TicketStatus {
    pub queue_type: QueueTypeId,
    pub bracket: crate::domain::BracketId,
    pub slot: crate::domain::QueueSlot,
    pub joined_at: i64,
    pub waited_ms: i64,
    pub wait_estimate: std::time::Duration,
}

/// Registry-wide counters for operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateStats {
    pub actors: usize,
    pub open_queues: usize,
    pub active_tickets: usize,
}

pub struct JoinGate {
    state: Mutex<GateState>,
    config: GateConfig,
    content: Arc<dyn ContentDirectory>,
    policies: PolicySet,
    notifier: Arc<dyn Notifier>,
    signal: Arc<dyn MatchSignal>,
    time_provider: Arc<dyn TimeProvider>,
    id_provider: Arc<dyn IdProvider>,
}

impl JoinGate {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        config: GateConfig,
        content: Arc<dyn ContentDirectory>,
        policies: PolicySet,
        notifier: Arc<dyn Notifier>,
        signal: Arc<dyn MatchSignal>,
        time_provider: Arc<dyn TimeProvider>,
        id_provider: Arc<dyn IdProvider>,
    ) -> Self {
        Self {
            state: Mutex::new(GateState::default()),
            config,
            content,
            policies,
            notifier,
            signal,
            time_provider,
            id_provider,
        }
    }

    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    /// Register a connected actor (session layer calls this on login)
    pub async fn attach_actor(&self, actor: Actor) -> Result<()> {
        let mut state = self.state.lock().await;
        debug!(actor = actor.id, name = %actor.name, level = actor.level, "actor attached");
        state.actors.attach(actor)?;
        Ok(())
    }

    /// Remove a disconnecting actor, cancelling every ticket it still
    /// holds. Returns the number of cancelled tickets.
    pub async fn detach_actor(&self, actor_id: ActorId) -> Result<usize> {
        let changes = {
            let mut state = self.state.lock().await;
            let GateState { actors, queues } = &mut *state;
            let actor = actors
                .detach(actor_id)
                .ok_or(DomainError::ActorNotFound(actor_id))?;

            let mut changes = Vec::new();
            for (_, queue_type) in actor.held_queues() {
                if let Some(ticket) = queues.remove_ticket(actor_id, queue_type) {
                    changes.push(QueueChanged {
                        queue_type,
                        bracket: ticket.bracket,
                    });
                }
            }
            info!(actor = actor_id, cancelled = changes.len(), "actor detached");
            changes
        };

        let cancelled = changes.len();
        for change in changes {
            self.signal.queue_changed(change);
        }
        Ok(cancelled)
    }

    /// One join request: evaluate, and on acceptance issue, against the
    /// same locked state. The caller gets the verdict; the actor's
    /// session gets a notice; the scheduler gets a signal on success.
    pub async fn join(&self, actor_id: ActorId, request: JoinRequest) -> Result<JoinVerdict> {
        let (verdict, notice, change) = {
            let mut state = self.state.lock().await;
            let GateState { actors, queues } = &mut *state;

            let actor = actors
                .get(actor_id)
                .ok_or(DomainError::ActorNotFound(actor_id))?;

            let evaluation = rules::evaluate(
                &self.config,
                self.content.as_ref(),
                &self.policies,
                queues,
                actor,
                &request,
            )
            .map_err(|err| {
                warn!(
                    actor = actor_id,
                    activity = request.activity,
                    error = %err,
                    "join refused: configuration fault"
                );
                AppError::from(err)
            })?;

            match evaluation {
                Evaluation::Reject(reason) => {
                    info!(
                        actor = actor_id,
                        activity = request.activity,
                        reason = %reason,
                        "join rejected"
                    );
                    let notice = QueueNotice::Rejected {
                        queue_type: request.queue_type(),
                        reason,
                    };
                    (JoinVerdict::Rejected(reason), notice, None)
                }
                Evaluation::Admit(admission) => {
                    let now = self.time_provider.now_millis();
                    let ticket_id = self.id_provider.next_ticket_id();
                    let actor = actors
                        .get_mut(actor_id)
                        .ok_or(DomainError::ActorNotFound(actor_id))?;

                    match issuer::issue(
                        actor,
                        queues,
                        admission.queue_type,
                        &admission.bracket,
                        ticket_id,
                        now,
                    ) {
                        Ok(ticket) => {
                            debug_assert!(registry::random_exclusive(
                                actor,
                                QueueTypeId::unrated(self.content.random_activity())
                            ));
                            self.policies.notify_joined(actor, admission.queue_type);

                            let estimate = estimator::estimate(
                                queues,
                                admission.queue_type,
                                admission.bracket.id,
                                self.config.default_wait_estimate(),
                            );
                            info!(
                                actor = actor_id,
                                queue = %admission.queue_type,
                                bracket = admission.bracket.id,
                                slot = ticket.slot,
                                "joined queue"
                            );
                            let verdict = JoinVerdict::Accepted {
                                ticket: ticket.id.clone(),
                                queue_type: admission.queue_type,
                                bracket: admission.bracket.id,
                                slot: ticket.slot,
                                wait_estimate: estimate,
                            };
                            let notice = QueueNotice::Queued {
                                queue_type: admission.queue_type,
                                slot: ticket.slot,
                                wait_estimate: estimate,
                            };
                            let change = QueueChanged {
                                queue_type: admission.queue_type,
                                bracket: admission.bracket.id,
                            };
                            (verdict, notice, Some(change))
                        }
                        Err(DomainError::SlotTableFull(_)) => {
                            // Unreachable while evaluation and issuance
                            // share one critical section; kept as the hard
                            // guarantee of no partial application.
                            warn!(actor = actor_id, "slot table full at issuance");
                            let reason = RejectReason::NoFreeSlot;
                            let notice = QueueNotice::Rejected {
                                queue_type: admission.queue_type,
                                reason,
                            };
                            (JoinVerdict::Rejected(reason), notice, None)
                        }
                        Err(err) => return Err(err.into()),
                    }
                }
            }
        };

        if let Some(change) = change {
            self.signal.queue_changed(change);
        }
        self.notifier.deliver(actor_id, notice).await;
        Ok(verdict)
    }

    /// Cancel one held ticket at the actor's request. No wait sample is
    /// recorded for abandoned waits.
    pub async fn leave(&self, actor_id: ActorId, queue_type: QueueTypeId) -> Result<()> {
        let (notice, change) = {
            let mut state = self.state.lock().await;
            let GateState { actors, queues } = &mut *state;
            let actor = actors
                .get_mut(actor_id)
                .ok_or(DomainError::ActorNotFound(actor_id))?;
            let ticket = queues.remove_ticket(actor_id, queue_type).ok_or_else(|| {
                DomainError::TicketNotFound {
                    actor: actor_id,
                    queue: queue_type.to_string(),
                }
            })?;
            actor.release_slot(queue_type);

            info!(actor = actor_id, queue = %queue_type, "left queue");
            (
                QueueNotice::Left { queue_type },
                QueueChanged {
                    queue_type,
                    bracket: ticket.bracket,
                },
            )
        };

        self.signal.queue_changed(change);
        self.notifier.deliver(actor_id, notice).await;
        Ok(())
    }

    /// The external scheduler claims a waiting ticket for a readied
    /// instance. Records the completed wait against the ticket's
    /// (queue type, bracket) and marks the actor active.
    pub async fn assign(
        &self,
        actor_id: ActorId,
        queue_type: QueueTypeId,
        instance: InstanceId,
    ) -> Result<()> {
        let (notice, change) = {
            let mut state = self.state.lock().await;
            let GateState { actors, queues } = &mut *state;
            let actor = actors
                .get_mut(actor_id)
                .ok_or(DomainError::ActorNotFound(actor_id))?;
            let ticket = queues.remove_ticket(actor_id, queue_type).ok_or_else(|| {
                DomainError::TicketNotFound {
                    actor: actor_id,
                    queue: queue_type.to_string(),
                }
            })?;
            actor.release_slot(queue_type);
            actor.instance = Some(instance);

            let waited = ticket.waited_ms(self.time_provider.now_millis());
            queues.record_wait(queue_type, ticket.bracket, waited);

            info!(
                actor = actor_id,
                queue = %queue_type,
                instance = instance,
                waited_ms = waited,
                "assigned to instance"
            );
            (
                QueueNotice::Assigned { queue_type },
                QueueChanged {
                    queue_type,
                    bracket: ticket.bracket,
                },
            )
        };

        self.signal.queue_changed(change);
        self.notifier.deliver(actor_id, notice).await;
        Ok(())
    }

    /// Every ticket the actor currently holds, with live estimates
    pub async fn status(&self, actor_id: ActorId) -> Result<Vec<TicketStatus>> {
        let state = self.state.lock().await;
        let actor = state
            .actors
            .get(actor_id)
            .ok_or(DomainError::ActorNotFound(actor_id))?;

        let now = self.time_provider.now_millis();
        let mut out = Vec::new();
        for (slot, queue_type) in actor.held_queues() {
            if let Some(ticket) = state.queues.ticket_for(actor_id, queue_type) {
                out.push(TicketStatus {
                    queue_type,
                    bracket: ticket.bracket,
                    slot,
                    joined_at: ticket.joined_at,
                    waited_ms: ticket.waited_ms(now),
                    wait_estimate: estimator::estimate(
                        &state.queues,
                        queue_type,
                        ticket.bracket,
                        self.config.default_wait_estimate(),
                    ),
                });
            }
        }
        Ok(out)
    }

    pub async fn stats(&self) -> GateStats {
        let state = self.state.lock().await;
        GateStats {
            actors: state.actors.len(),
            open_queues: state.queues.open_queues(),
            active_tickets: state.queues.total_tickets(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ActivityClass, ActivityTemplate, Bracket, BracketTable, RoleTag};
    use crate::port::id_provider::mocks::SequentialIds;
    use crate::port::match_signal::mocks::CountingSignal;
    use crate::port::notifier::mocks::RecordingNotifier;
    use crate::port::policy::mocks::FixedPolicy;
    use crate::port::time_provider::mocks::ManualClock;
    use crate::port::StaticContent;
    use std::time::Duration;

    const RANDOM: u32 = 32;
    const ALTERAC: u32 = 30;
    const WARSONG: u32 = 489;

    fn content() -> StaticContent {
        let templates = vec![
            ActivityTemplate {
                id: ALTERAC,
                name: "Alterac".into(),
                map_id: 30,
                capacity_per_side: 40,
                class: ActivityClass::Standard,
            },
            ActivityTemplate {
                id: WARSONG,
                name: "Warsong".into(),
                map_id: 489,
                capacity_per_side: 10,
                class: ActivityClass::Standard,
            },
            ActivityTemplate {
                id: RANDOM,
                name: "Random".into(),
                map_id: 0,
                capacity_per_side: 10,
                class: ActivityClass::Random,
            },
        ];
        let brackets = BracketTable::new(vec![
            Bracket {
                id: 0,
                map_id: 30,
                min_level: 10,
                max_level: 80,
            },
            Bracket {
                id: 0,
                map_id: 489,
                min_level: 10,
                max_level: 80,
            },
            Bracket {
                id: 0,
                map_id: 0,
                min_level: 10,
                max_level: 80,
            },
        ]);
        StaticContent::new(templates, brackets, RANDOM)
    }

    struct Harness {
        gate: Arc<JoinGate>,
        notifier: Arc<RecordingNotifier>,
        signal: Arc<CountingSignal>,
        clock: Arc<ManualClock>,
    }

    fn harness() -> Harness {
        harness_with(GateConfig::default())
    }

    fn harness_with(config: GateConfig) -> Harness {
        harness_full(config, PolicySet::new())
    }

    fn harness_full(config: GateConfig, policies: PolicySet) -> Harness {
        let notifier = Arc::new(RecordingNotifier::new());
        let signal = Arc::new(CountingSignal::new());
        let clock = Arc::new(ManualClock::at(1_000_000));
        let gate = Arc::new(JoinGate::new(
            config,
            Arc::new(content()),
            policies,
            notifier.clone(),
            signal.clone(),
            clock.clone(),
            Arc::new(SequentialIds::new()),
        ));
        Harness {
            gate,
            notifier,
            signal,
            clock,
        }
    }

    fn actor(id: ActorId, level: u32) -> Actor {
        Actor::new(id, format!("actor-{}", id), level, RoleTag::new("MAGE"), 30)
    }

    fn accepted_estimate(verdict: &JoinVerdict) -> Duration {
        match verdict {
            JoinVerdict::Accepted { wait_estimate, .. } => *wait_estimate,
            other => panic!("expected acceptance, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn accepted_join_issues_notifies_and_signals() {
        let h = harness();
        h.gate.attach_actor(actor(7, 25)).await.unwrap();

        let verdict = h.gate.join(7, JoinRequest::solo(ALTERAC)).await.unwrap();
        match &verdict {
            JoinVerdict::Accepted {
                ticket,
                slot,
                wait_estimate,
                ..
            } => {
                assert_eq!(ticket, "ticket-1");
                assert_eq!(*slot, 0);
                assert_eq!(*wait_estimate, Duration::from_secs(30));
            }
            other => panic!("expected acceptance, got {:?}", other),
        }

        let notices = h.notifier.take();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].0, 7);
        assert!(matches!(notices[0].1, QueueNotice::Queued { slot: 0, .. }));
        assert_eq!(h.signal.count(), 1);
    }

    #[tokio::test]
    async fn rejected_join_notifies_without_signal() {
        let h = harness_with(GateConfig {
            min_level: 10,
            ..GateConfig::default()
        });
        h.gate.attach_actor(actor(7, 5)).await.unwrap();

        let verdict = h.gate.join(7, JoinRequest::solo(ALTERAC)).await.unwrap();
        assert_eq!(verdict.reason(), Some(RejectReason::LevelTooLow));

        let notices = h.notifier.take();
        assert!(matches!(
            notices[0].1,
            QueueNotice::Rejected {
                reason: RejectReason::LevelTooLow,
                ..
            }
        ));
        assert_eq!(h.signal.count(), 0);
        assert_eq!(h.gate.stats().await.active_tickets, 0);
    }

    #[tokio::test]
    async fn policy_observers_hear_accepted_joins_only() {
        let observer = FixedPolicy::clear();
        let mut policies = PolicySet::new();
        policies.register("observer", Box::new(observer.clone()));
        let h = harness_full(GateConfig::default(), policies);

        h.gate.attach_actor(actor(7, 25)).await.unwrap();
        let mut deserter = actor(8, 25);
        deserter.restricted = true;
        h.gate.attach_actor(deserter).await.unwrap();

        h.gate.join(7, JoinRequest::solo(ALTERAC)).await.unwrap();
        let rejected = h.gate.join(8, JoinRequest::solo(ALTERAC)).await.unwrap();
        assert!(!rejected.is_accepted());

        assert_eq!(observer.joined(), vec![(7, QueueTypeId::unrated(ALTERAC))]);
    }

    #[tokio::test]
    async fn sequential_duplicate_join_rejects() {
        let h = harness();
        h.gate.attach_actor(actor(7, 25)).await.unwrap();

        let first = h.gate.join(7, JoinRequest::solo(ALTERAC)).await.unwrap();
        assert!(first.is_accepted());

        let second = h.gate.join(7, JoinRequest::solo(ALTERAC)).await.unwrap();
        assert_eq!(second.reason(), Some(RejectReason::AlreadyInNonRandom));
        assert_eq!(h.gate.stats().await.active_tickets, 1);
    }

    #[tokio::test]
    async fn concurrent_duplicate_joins_issue_exactly_one_ticket() {
        let h = harness();
        h.gate.attach_actor(actor(7, 25)).await.unwrap();

        let first = tokio::spawn({
            let gate = h.gate.clone();
            async move { gate.join(7, JoinRequest::solo(RANDOM)).await.unwrap() }
        });
        let second = tokio::spawn({
            let gate = h.gate.clone();
            async move { gate.join(7, JoinRequest::solo(RANDOM)).await.unwrap() }
        });

        let (a, b) = (first.await.unwrap(), second.await.unwrap());
        assert!(a.is_accepted() ^ b.is_accepted());

        let reason = a.reason().or(b.reason()).unwrap();
        assert!(matches!(
            reason,
            RejectReason::AlreadyInRandom | RejectReason::AlreadyInNonRandom
        ));
        assert_eq!(h.gate.stats().await.active_tickets, 1);
    }

    #[tokio::test]
    async fn leave_frees_the_slot_without_recording_a_wait() {
        let h = harness();
        h.gate.attach_actor(actor(7, 25)).await.unwrap();
        h.gate.join(7, JoinRequest::solo(ALTERAC)).await.unwrap();

        h.clock.advance(15_000);
        h.gate.leave(7, QueueTypeId::unrated(ALTERAC)).await.unwrap();
        assert_eq!(h.gate.stats().await.active_tickets, 0);

        // No sample was recorded: the rejoin still sees the default
        let verdict = h.gate.join(7, JoinRequest::solo(ALTERAC)).await.unwrap();
        assert_eq!(accepted_estimate(&verdict), Duration::from_secs(30));

        let notices = h.notifier.take();
        assert!(matches!(notices[1].1, QueueNotice::Left { .. }));
    }

    #[tokio::test]
    async fn leave_without_a_ticket_is_an_error() {
        let h = harness();
        h.gate.attach_actor(actor(7, 25)).await.unwrap();
        let err = h
            .gate
            .leave(7, QueueTypeId::unrated(ALTERAC))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Domain(DomainError::TicketNotFound { actor: 7, .. })
        ));
    }

    #[tokio::test]
    async fn assign_records_the_completed_wait() {
        let h = harness();
        h.gate.attach_actor(actor(7, 25)).await.unwrap();
        h.gate.join(7, JoinRequest::solo(ALTERAC)).await.unwrap();

        h.clock.advance(20_000);
        h.gate
            .assign(7, QueueTypeId::unrated(ALTERAC), 4242)
            .await
            .unwrap();

        // The next joiner in the same bracket sees the sampled wait
        h.gate.attach_actor(actor(8, 25)).await.unwrap();
        let verdict = h.gate.join(8, JoinRequest::solo(ALTERAC)).await.unwrap();
        assert_eq!(accepted_estimate(&verdict), Duration::from_secs(20));

        // The assigned actor is inside an instance now
        let verdict = h.gate.join(7, JoinRequest::solo(WARSONG)).await.unwrap();
        assert_eq!(verdict.reason(), Some(RejectReason::AlreadyActive));
    }

    #[tokio::test]
    async fn detach_cancels_every_ticket() {
        let h = harness();
        h.gate.attach_actor(actor(7, 25)).await.unwrap();
        h.gate.join(7, JoinRequest::solo(ALTERAC)).await.unwrap();
        h.gate.join(7, JoinRequest::solo(WARSONG)).await.unwrap();
        assert_eq!(h.gate.stats().await.active_tickets, 2);

        let cancelled = h.gate.detach_actor(7).await.unwrap();
        assert_eq!(cancelled, 2);
        assert_eq!(h.gate.stats().await.active_tickets, 0);
        // Two joins plus two cancellations
        assert_eq!(h.signal.count(), 4);
    }

    #[tokio::test]
    async fn status_reports_held_tickets() {
        let h = harness();
        h.gate.attach_actor(actor(7, 25)).await.unwrap();
        h.gate.join(7, JoinRequest::solo(ALTERAC)).await.unwrap();
        h.clock.advance(5_000);

        let status = h.gate.status(7).await.unwrap();
        assert_eq!(status.len(), 1);
        assert_eq!(status[0].queue_type, QueueTypeId::unrated(ALTERAC));
        assert_eq!(status[0].slot, 0);
        assert_eq!(status[0].waited_ms, 5_000);
    }

    #[tokio::test]
    async fn unknown_actor_is_not_found() {
        let h = harness();
        let err = h.gate.join(99, JoinRequest::solo(ALTERAC)).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Domain(DomainError::ActorNotFound(99))
        ));
    }

    #[tokio::test]
    async fn attach_twice_conflicts() {
        let h = harness();
        h.gate.attach_actor(actor(7, 25)).await.unwrap();
        let err = h.gate.attach_actor(actor(7, 25)).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Domain(DomainError::ActorAlreadyAttached(7))
        ));
    }
}
