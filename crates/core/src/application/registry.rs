// Queue Registry - shared queue bookkeeping
//
// Pure data structures. The gate serializes all access; nothing here
// locks or blocks.

use std::collections::{HashMap, VecDeque};

use crate::domain::{Actor, ActorId, BracketId, DomainError, QueueTicket, QueueTypeId};
use super::constants::WAIT_SAMPLE_WINDOW;

/// Bounded history of completed waits in milliseconds. The oldest
/// sample falls out when the window is full.
#[derive(Debug, Clone, Default)]
pub struct WaitHistory {
    samples: VecDeque<i64>,
}

impl WaitHistory {
    pub fn record(&mut self, wait_ms: i64) {
        if self.samples.len() == WAIT_SAMPLE_WINDOW {
            self.samples.pop_front();
        }
        self.samples.push_back(wait_ms.max(0));
    }

    pub fn samples(&self) -> impl Iterator<Item = i64> + '_ {
        self.samples.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Live state of one queue type: pending tickets in arrival order,
/// plus per-bracket wait history. History outlives the tickets.
#[derive(Debug, Clone, Default)]
pub struct QueueEntry {
    tickets: Vec<QueueTicket>,
    history: HashMap<BracketId, WaitHistory>,
}

impl QueueEntry {
    pub fn tickets(&self) -> &[QueueTicket] {
        &self.tickets
    }

    pub fn in_bracket(&self, bracket: BracketId) -> usize {
        self.tickets.iter().filter(|t| t.bracket == bracket).count()
    }
}

/// All queue state for one gate. One instance per process, owned by
/// the gate behind its lock.
#[derive(Debug, Default)]
pub struct QueueRegistry {
    entries: HashMap<QueueTypeId, QueueEntry>,
}

impl QueueRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a freshly issued ticket. Only the issuer calls this.
    pub fn insert_ticket(&mut self, ticket: QueueTicket) {
        self.entries
            .entry(ticket.queue_type)
            .or_default()
            .tickets
            .push(ticket);
    }

    /// Remove and return the ticket `actor` holds for `queue_type`
    pub fn remove_ticket(&mut self, actor: ActorId, queue_type: QueueTypeId) -> Option<QueueTicket> {
        let entry = self.entries.get_mut(&queue_type)?;
        let at = entry.tickets.iter().position(|t| t.actor == actor)?;
        Some(entry.tickets.remove(at))
    }

    pub fn ticket_for(&self, actor: ActorId, queue_type: QueueTypeId) -> Option<&QueueTicket> {
        self.entries
            .get(&queue_type)?
            .tickets
            .iter()
            .find(|t| t.actor == actor)
    }

    /// Record one completed wait against (queue type, bracket)
    pub fn record_wait(&mut self, queue_type: QueueTypeId, bracket: BracketId, wait_ms: i64) {
        self.entries
            .entry(queue_type)
            .or_default()
            .history
            .entry(bracket)
            .or_default()
            .record(wait_ms);
    }

    pub fn wait_history(&self, queue_type: QueueTypeId, bracket: BracketId) -> Option<&WaitHistory> {
        self.entries.get(&queue_type)?.history.get(&bracket)
    }

    pub fn queue_len(&self, queue_type: QueueTypeId) -> usize {
        self.entries.get(&queue_type).map_or(0, |e| e.tickets.len())
    }

    pub fn entry(&self, queue_type: QueueTypeId) -> Option<&QueueEntry> {
        self.entries.get(&queue_type)
    }

    pub fn queue_types(&self) -> impl Iterator<Item = QueueTypeId> + '_ {
        self.entries.keys().copied()
    }

    /// Queue types with at least one pending ticket
    pub fn open_queues(&self) -> usize {
        self.entries.values().filter(|e| !e.tickets.is_empty()).count()
    }

    pub fn total_tickets(&self) -> usize {
        self.entries.values().map(|e| e.tickets.len()).sum()
    }
}

/// Connected actors, keyed by id. Replaces the host's session map for
/// everything the gate needs to know.
#[derive(Debug, Default)]
pub struct ActorTable {
    actors: HashMap<ActorId, Actor>,
}

impl ActorTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&mut self, actor: Actor) -> Result<(), DomainError> {
        if self.actors.contains_key(&actor.id) {
            return Err(DomainError::ActorAlreadyAttached(actor.id));
        }
        self.actors.insert(actor.id, actor);
        Ok(())
    }

    pub fn detach(&mut self, id: ActorId) -> Option<Actor> {
        self.actors.remove(&id)
    }

    pub fn get(&self, id: ActorId) -> Option<&Actor> {
        self.actors.get(&id)
    }

    pub fn get_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.actors.get_mut(&id)
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }
}

/// Holds while the actor's tickets satisfy mutual exclusion: a ticket
/// for the random queue never coexists with any other ticket.
pub fn random_exclusive(actor: &Actor, random_queue: QueueTypeId) -> bool {
    !(actor.holds(random_queue) && actor.held_queues().count() > 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RoleTag;

    fn ticket(actor: ActorId, queue_type: QueueTypeId, bracket: BracketId) -> QueueTicket {
        QueueTicket::new(format!("t-{}", actor), actor, queue_type, bracket, 0, 0)
    }

    #[test]
    fn insert_then_remove_round_trips() {
        let mut reg = QueueRegistry::new();
        let q = QueueTypeId::unrated(30);
        reg.insert_ticket(ticket(7, q, 0));

        assert_eq!(reg.queue_len(q), 1);
        assert!(reg.ticket_for(7, q).is_some());

        let removed = reg.remove_ticket(7, q).unwrap();
        assert_eq!(removed.actor, 7);
        assert_eq!(reg.queue_len(q), 0);
        assert!(reg.remove_ticket(7, q).is_none());
    }

    #[test]
    fn tickets_keep_arrival_order() {
        let mut reg = QueueRegistry::new();
        let q = QueueTypeId::unrated(30);
        for id in [3, 1, 2] {
            reg.insert_ticket(ticket(id, q, 0));
        }
        let order: Vec<ActorId> = reg.entry(q).unwrap().tickets().iter().map(|t| t.actor).collect();
        assert_eq!(order, vec![3, 1, 2]);
    }

    #[test]
    fn wait_history_is_bounded() {
        let mut history = WaitHistory::default();
        for i in 0..(WAIT_SAMPLE_WINDOW as i64 + 5) {
            history.record(i * 1_000);
        }
        assert_eq!(history.len(), WAIT_SAMPLE_WINDOW);
        // Oldest five fell out
        assert_eq!(history.samples().next(), Some(5_000));
    }

    #[test]
    fn history_survives_ticket_removal() {
        let mut reg = QueueRegistry::new();
        let q = QueueTypeId::unrated(30);
        reg.insert_ticket(ticket(7, q, 1));
        reg.record_wait(q, 1, 12_000);
        reg.remove_ticket(7, q);

        assert_eq!(reg.queue_len(q), 0);
        assert_eq!(reg.wait_history(q, 1).unwrap().len(), 1);
    }

    #[test]
    fn history_is_keyed_by_bracket() {
        let mut reg = QueueRegistry::new();
        let q = QueueTypeId::unrated(30);
        reg.record_wait(q, 0, 10_000);
        reg.record_wait(q, 1, 50_000);

        assert_eq!(reg.wait_history(q, 0).unwrap().samples().next(), Some(10_000));
        assert_eq!(reg.wait_history(q, 1).unwrap().samples().next(), Some(50_000));
    }

    #[test]
    fn attach_rejects_duplicates() {
        let mut table = ActorTable::new();
        let actor = Actor::new(7, "Asha", 25, RoleTag::new("MAGE"), 30);
        table.attach(actor.clone()).unwrap();
        assert!(matches!(
            table.attach(actor),
            Err(DomainError::ActorAlreadyAttached(7))
        ));
    }

    #[test]
    fn random_exclusivity_check() {
        let random = QueueTypeId::unrated(32);
        let mut actor = Actor::new(7, "Asha", 25, RoleTag::new("MAGE"), 30);
        assert!(random_exclusive(&actor, random));

        actor.occupy_slot(random);
        assert!(random_exclusive(&actor, random));

        actor.occupy_slot(QueueTypeId::unrated(30));
        assert!(!random_exclusive(&actor, random));
    }
}
