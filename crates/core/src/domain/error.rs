// Domain Error Types
//
// Configuration and bookkeeping faults. User-facing refusals travel as
// RejectReason verdicts, never as errors.

use thiserror::Error;

use super::activity::{ActivityId, MapId};
use super::actor::ActorId;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Unknown activity kind: {0}")]
    UnknownActivity(ActivityId),

    #[error("No bracket covers level {level} on map {map_id}")]
    BracketNotFound { map_id: MapId, level: u32 },

    #[error("Rated formats do not join through the open queue path")]
    RatedJoinPath,

    #[error("Actor not found: {0}")]
    ActorNotFound(ActorId),

    #[error("Actor already attached: {0}")]
    ActorAlreadyAttached(ActorId),

    #[error("Actor {actor} holds no ticket for queue {queue}")]
    TicketNotFound { actor: ActorId, queue: String },

    #[error("Queue slot table full for actor {0}")]
    SlotTableFull(ActorId),
}

pub type Result<T> = std::result::Result<T, DomainError>;
