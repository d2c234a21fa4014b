// Join verdicts and the rejection taxonomy

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::activity::QueueTypeId;
use super::actor::QueueSlot;
use super::bracket::BracketId;
use super::ticket::TicketId;

/// Why a join request was refused. Exactly one reason is reported per
/// refused request. Content faults (unknown activity, missing bracket)
/// are errors, not reasons, and never appear here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RejectReason {
    LevelTooLow,
    LevelTooHigh,
    ActivityDisabled,
    TooManyQueues,
    PolicyVetoed,
    AlreadyActive,
    LfgConflict,
    Restricted,
    AlreadyInRandom,
    AlreadyInNonRandom,
    QueuedForRated,
    RoleRestricted,
    NoFreeSlot,
}

impl RejectReason {
    /// One human-readable sentence per reason
    pub fn message(&self) -> &'static str {
        match self {
            RejectReason::LevelTooLow => "level is below the minimum for this queue",
            RejectReason::LevelTooHigh => "level is above the maximum for this queue",
            RejectReason::ActivityDisabled => "this activity is currently disabled",
            RejectReason::TooManyQueues => "already waiting in the maximum number of queues",
            RejectReason::PolicyVetoed => "join refused by server policy",
            RejectReason::AlreadyActive => "cannot queue while inside a running activity",
            RejectReason::LfgConflict => "cannot queue while using the group finder",
            RejectReason::Restricted => "cannot requeue while restricted",
            RejectReason::AlreadyInRandom => "already queued for the random activity",
            RejectReason::AlreadyInNonRandom => "already queued for a specific activity",
            RejectReason::QueuedForRated => "already queued for a rated format",
            RejectReason::RoleRestricted => "this role cannot join from its current location",
            RejectReason::NoFreeSlot => "no free queue slot",
        }
    }
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let code = match self {
            RejectReason::LevelTooLow => "LEVEL_TOO_LOW",
            RejectReason::LevelTooHigh => "LEVEL_TOO_HIGH",
            RejectReason::ActivityDisabled => "ACTIVITY_DISABLED",
            RejectReason::TooManyQueues => "TOO_MANY_QUEUES",
            RejectReason::PolicyVetoed => "POLICY_VETOED",
            RejectReason::AlreadyActive => "ALREADY_ACTIVE",
            RejectReason::LfgConflict => "LFG_CONFLICT",
            RejectReason::Restricted => "RESTRICTED",
            RejectReason::AlreadyInRandom => "ALREADY_IN_RANDOM",
            RejectReason::AlreadyInNonRandom => "ALREADY_IN_NON_RANDOM",
            RejectReason::QueuedForRated => "QUEUED_FOR_RATED",
            RejectReason::RoleRestricted => "ROLE_RESTRICTED",
            RejectReason::NoFreeSlot => "NO_FREE_SLOT",
        };
        write!(f, "{}", code)
    }
}

/// Outcome of one join request, as returned to the caller
#[derive(Debug, Clone, PartialEq)]
pub enum JoinVerdict {
    Accepted {
        ticket: TicketId,
        queue_type: QueueTypeId,
        bracket: BracketId,
        slot: QueueSlot,
        wait_estimate: Duration,
    },
    Rejected(RejectReason),
}

impl JoinVerdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, JoinVerdict::Accepted { .. })
    }

    pub fn reason(&self) -> Option<RejectReason> {
        match self {
            JoinVerdict::Rejected(reason) => Some(*reason),
            JoinVerdict::Accepted { .. } => None,
        }
    }
}
