// Queue tickets - one actor's pending claim on one queue

use serde::{Deserialize, Serialize};

use super::activity::QueueTypeId;
use super::actor::{ActorId, QueueSlot};
use super::bracket::BracketId;

/// Ticket identifier (UUID v4, minted by the id provider)
pub type TicketId = String;

/// One pending request to enter an activity of a given kind and
/// bracket. Created only by the issuer; removed on leave, assignment,
/// or session detach.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueTicket {
    pub id: TicketId,
    pub actor: ActorId,
    pub queue_type: QueueTypeId,
    pub bracket: BracketId,
    /// Issue timestamp, epoch milliseconds (provider time, not wall
    /// clock reads scattered through the code)
    pub joined_at: i64,
    /// Slot this ticket occupies in the actor's table
    pub slot: QueueSlot,
}

impl QueueTicket {
    pub fn new(
        id: TicketId,
        actor: ActorId,
        queue_type: QueueTypeId,
        bracket: BracketId,
        joined_at: i64,
        slot: QueueSlot,
    ) -> Self {
        Self {
            id,
            actor,
            queue_type,
            bracket,
            joined_at,
            slot,
        }
    }

    /// Elapsed wait in milliseconds as of `now_millis`
    pub fn waited_ms(&self, now_millis: i64) -> i64 {
        (now_millis - self.joined_at).max(0)
    }
}
