// Actor state as the queue core sees it
//
// Sessions are owned by the surrounding service; the core reads their
// fields and mutates nothing but the queue slot table.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::activity::{MapId, QueueTypeId};

/// Session-scoped actor identifier
pub type ActorId = u64;

/// Identifier of a running activity instance
pub type InstanceId = u64;

/// Identifier of a pre-formed party
pub type PartyId = u64;

/// Content-defined unlock (exempts from certain role locks)
pub type UnlockId = u32;

/// Index into an actor's queue slot table
pub type QueueSlot = usize;

/// Queue slots per actor. An actor waits in at most this many queues.
pub const MAX_QUEUE_SLOTS: usize = 2;

/// Class/role tag, compared as an opaque content-defined string
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoleTag(String);

impl RoleTag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RoleTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// State of the looking-for-group subsystem for one actor.
///
/// Consumed here, never driven: the gate only needs to know whether the
/// subsystem is in use and whether that use is exactly "queued".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LfgState {
    None,
    RoleCheck,
    Queued,
    Proposal,
    Grouped,
}

impl LfgState {
    /// Anything past `None` means the subsystem is in use
    pub fn in_use(&self) -> bool {
        *self != LfgState::None
    }
}

impl Default for LfgState {
    fn default() -> Self {
        LfgState::None
    }
}

/// One connected actor.
///
/// The slot table mirrors registry membership: slot `i` is `Some(q)`
/// exactly while the actor holds a ticket for queue `q`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub id: ActorId,
    pub name: String,
    pub level: u32,
    pub role: RoleTag,
    /// Map the actor is currently on (role locks key off this)
    pub map_id: MapId,
    /// Set while inside a running activity instance
    pub instance: Option<InstanceId>,
    /// Penalty flag; requeueing is refused until it clears
    pub restricted: bool,
    /// Staff override; exempt from role locks
    pub privileged: bool,
    pub unlocks: HashSet<UnlockId>,
    pub lfg_state: LfgState,
    slots: [Option<QueueTypeId>; MAX_QUEUE_SLOTS],
}

impl Actor {
    pub fn new(id: ActorId, name: impl Into<String>, level: u32, role: RoleTag, map_id: MapId) -> Self {
        Self {
            id,
            name: name.into(),
            level,
            role,
            map_id,
            instance: None,
            restricted: false,
            privileged: false,
            unlocks: HashSet::new(),
            lfg_state: LfgState::None,
            slots: [None; MAX_QUEUE_SLOTS],
        }
    }

    pub fn in_instance(&self) -> bool {
        self.instance.is_some()
    }

    pub fn has_free_slot(&self) -> bool {
        self.slots.iter().any(|s| s.is_none())
    }

    /// True while any slot is occupied
    pub fn holds_any(&self) -> bool {
        self.slots.iter().any(|s| s.is_some())
    }

    /// True while a ticket for exactly this queue is held
    pub fn holds(&self, queue_type: QueueTypeId) -> bool {
        self.slots.iter().any(|s| *s == Some(queue_type))
    }

    /// True while any rated-format ticket is held
    pub fn holds_rated(&self) -> bool {
        self.slots.iter().flatten().any(|q| q.is_rated())
    }

    pub fn slot_of(&self, queue_type: QueueTypeId) -> Option<QueueSlot> {
        self.slots.iter().position(|s| *s == Some(queue_type))
    }

    /// Occupied slots in table order
    pub fn held_queues(&self) -> impl Iterator<Item = (QueueSlot, QueueTypeId)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.map(|q| (i, q)))
    }

    /// Claim the lowest free slot for `queue_type`. Returns the slot
    /// index, or `None` when the table is full.
    pub fn occupy_slot(&mut self, queue_type: QueueTypeId) -> Option<QueueSlot> {
        let free = self.slots.iter().position(|s| s.is_none())?;
        self.slots[free] = Some(queue_type);
        Some(free)
    }

    /// Clear the slot holding `queue_type`, returning its index
    pub fn release_slot(&mut self, queue_type: QueueTypeId) -> Option<QueueSlot> {
        let held = self.slot_of(queue_type)?;
        self.slots[held] = None;
        Some(held)
    }
}
