//! RPC Request/Response Types
//!
//! Defines the JSON-RPC method parameters and results.

use serde::{Deserialize, Serialize};

use muster_core::domain::{
    ActivityId, ActorId, BracketId, InstanceId, LfgState, MapId, PartyId, RejectReason, TeamSize,
    UnlockId,
};

/// actor.attach.v1 - Register a connected actor
#[derive(Debug, Deserialize)]
pub struct AttachRequest {
    pub actor_id: ActorId,
    pub name: String,
    pub level: u32,
    pub role: String,
    pub map_id: MapId,
    #[serde(default)]
    pub restricted: bool,
    #[serde(default)]
    pub privileged: bool,
    #[serde(default)]
    pub unlocks: Vec<UnlockId>,
    #[serde(default)]
    pub lfg_state: Option<LfgState>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AttachResponse {
    pub actor_id: ActorId,
    pub attached: bool,
}

/// actor.detach.v1 - Remove a disconnecting actor
#[derive(Debug, Deserialize)]
pub struct DetachRequest {
    pub actor_id: ActorId,
}

#[derive(Debug, Clone, Serialize)]
pub struct DetachResponse {
    pub actor_id: ActorId,
    pub cancelled_tickets: usize,
}

/// queue.join.v1 - Request admission to a queue
#[derive(Debug, Deserialize)]
pub struct JoinRpcRequest {
    pub actor_id: ActorId,
    pub activity: ActivityId,
    #[serde(default)]
    pub team_size: TeamSize,
    #[serde(default)]
    pub party: Option<PartyId>,
}

#[derive(Debug, Clone, Serialize)]
pub struct JoinRpcResponse {
    pub accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bracket: Option<BracketId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slot: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wait_estimate_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<RejectReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// queue.leave.v1 - Cancel a held ticket
#[derive(Debug, Deserialize)]
pub struct LeaveRequest {
    pub actor_id: ActorId,
    pub activity: ActivityId,
    #[serde(default)]
    pub team_size: TeamSize,
}

#[derive(Debug, Clone, Serialize)]
pub struct LeaveResponse {
    pub actor_id: ActorId,
    pub left: bool,
}

/// queue.assign.v1 - Scheduler claims a waiting ticket
#[derive(Debug, Deserialize)]
pub struct AssignRequest {
    pub actor_id: ActorId,
    pub activity: ActivityId,
    #[serde(default)]
    pub team_size: TeamSize,
    pub instance: InstanceId,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssignResponse {
    pub actor_id: ActorId,
    pub assigned: bool,
}

/// queue.status.v1 - Tickets an actor holds
#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub actor_id: ActorId,
}

#[derive(Debug, Clone, Serialize)]
pub struct TicketInfo {
    pub activity: ActivityId,
    pub team_size: TeamSize,
    pub bracket: BracketId,
    pub slot: usize,
    pub joined_at: i64,
    pub waited_ms: i64,
    pub wait_estimate_ms: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub actor_id: ActorId,
    pub tickets: Vec<TicketInfo>,
}

/// admin.stats.v1 - Gate-wide counters
#[derive(Debug, Deserialize)]
pub struct StatsRequest {
    // No parameters needed
}

#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub actors: usize,
    pub open_queues: usize,
    pub active_tickets: usize,
    pub uptime_seconds: i64,
}
