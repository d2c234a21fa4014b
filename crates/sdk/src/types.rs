//! SDK Request/Response Types
//!
//! Mirrors the JSON-RPC types from api-rpc crate. Enum-valued fields travel
//! as their wire codes (SCREAMING_SNAKE_CASE strings) so the SDK stays free
//! of a core dependency.

use serde::{Deserialize, Serialize};

/// Request to register a connected actor
#[derive(Debug, Clone, Serialize)]
pub struct AttachRequest {
    pub actor_id: u64,
    pub name: String,
    pub level: u32,
    pub role: String,
    pub map_id: u32,
    #[serde(default)]
    pub restricted: bool,
    #[serde(default)]
    pub privileged: bool,
    #[serde(default)]
    pub unlocks: Vec<u32>,
    #[serde(default)]
    pub lfg_state: Option<String>,
}

/// Response from attach operation
#[derive(Debug, Clone, Deserialize)]
pub struct AttachResponse {
    pub actor_id: u64,
    pub attached: bool,
}

/// Request to remove a disconnecting actor
#[derive(Debug, Clone, Serialize)]
pub struct DetachRequest {
    pub actor_id: u64,
}

/// Response from detach operation
#[derive(Debug, Clone, Deserialize)]
pub struct DetachResponse {
    pub actor_id: u64,
    pub cancelled_tickets: usize,
}

/// Request admission to a queue
#[derive(Debug, Clone, Serialize)]
pub struct JoinRequest {
    pub actor_id: u64,
    pub activity: u32,
    #[serde(default)]
    pub team_size: u8,
    #[serde(default)]
    pub party: Option<u64>,
}

/// Response from join operation
///
/// `ticket`, `bracket`, `slot` and `wait_estimate_ms` are present only when
/// `accepted` is true; `reason` and `message` only when it is false.
#[derive(Debug, Clone, Deserialize)]
pub struct JoinResponse {
    pub accepted: bool,
    #[serde(default)]
    pub ticket: Option<String>,
    #[serde(default)]
    pub bracket: Option<u8>,
    #[serde(default)]
    pub slot: Option<usize>,
    #[serde(default)]
    pub wait_estimate_ms: Option<u64>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Request to cancel a held ticket
#[derive(Debug, Clone, Serialize)]
pub struct LeaveRequest {
    pub actor_id: u64,
    pub activity: u32,
    #[serde(default)]
    pub team_size: u8,
}

/// Response from leave operation
#[derive(Debug, Clone, Deserialize)]
pub struct LeaveResponse {
    pub actor_id: u64,
    pub left: bool,
}

/// Request to hand a waiting ticket to an instance
#[derive(Debug, Clone, Serialize)]
pub struct AssignRequest {
    pub actor_id: u64,
    pub activity: u32,
    #[serde(default)]
    pub team_size: u8,
    pub instance: u64,
}

/// Response from assign operation
#[derive(Debug, Clone, Deserialize)]
pub struct AssignResponse {
    pub actor_id: u64,
    pub assigned: bool,
}

/// Request for the tickets an actor holds
#[derive(Debug, Clone, Serialize)]
pub struct StatusRequest {
    pub actor_id: u64,
}

/// One held ticket in a status response
#[derive(Debug, Clone, Deserialize)]
pub struct TicketInfo {
    pub activity: u32,
    pub team_size: u8,
    pub bracket: u8,
    pub slot: usize,
    pub joined_at: i64,
    pub waited_ms: i64,
    pub wait_estimate_ms: u64,
}

/// Response from status operation
#[derive(Debug, Clone, Deserialize)]
pub struct StatusResponse {
    pub actor_id: u64,
    pub tickets: Vec<TicketInfo>,
}

/// Request for gate-wide counters
#[derive(Debug, Clone, Serialize)]
pub struct StatsRequest {}

/// Response with gate-wide counters
#[derive(Debug, Clone, Deserialize)]
pub struct StatsResponse {
    pub actors: usize,
    pub open_queues: usize,
    pub active_tickets: usize,
    pub uptime_seconds: i64,
}
