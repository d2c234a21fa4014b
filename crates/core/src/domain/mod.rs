// Domain Layer - Pure admission entities and reference data

pub mod activity;
pub mod actor;
pub mod bracket;
pub mod error;
pub mod request;
pub mod ticket;
pub mod verdict;

// Re-exports
pub use activity::{ActivityClass, ActivityId, ActivityTemplate, MapId, QueueTypeId, TeamSize};
pub use actor::{
    Actor, ActorId, InstanceId, LfgState, PartyId, QueueSlot, RoleTag, UnlockId, MAX_QUEUE_SLOTS,
};
pub use bracket::{Bracket, BracketId, BracketTable};
pub use error::DomainError;
pub use request::JoinRequest;
pub use ticket::{QueueTicket, TicketId};
pub use verdict::{JoinVerdict, RejectReason};
