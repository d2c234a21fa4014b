//! RPC Method Handlers
//!
//! Implements the business logic for each JSON-RPC method.

use std::sync::Arc;
use std::time::Duration;

use jsonrpsee::types::ErrorObjectOwned;
use tracing::debug;

use muster_core::application::JoinGate;
use muster_core::domain::{Actor, JoinRequest, JoinVerdict, QueueTypeId, RoleTag};

use crate::error::{throttled, to_rpc_error};
use crate::join_throttle::JoinThrottle;
use crate::types::{
    AssignRequest, AssignResponse, AttachRequest, AttachResponse, DetachRequest, DetachResponse,
    JoinRpcRequest, JoinRpcResponse, LeaveRequest, LeaveResponse, StatsRequest, StatsResponse,
    StatusRequest, StatusResponse, TicketInfo,
};

/// RPC Handler with injected dependencies
pub struct RpcHandler {
    gate: Arc<JoinGate>,
    join_throttle: JoinThrottle,
    start_time: std::time::Instant,
}

impl RpcHandler {
    pub fn new(gate: Arc<JoinGate>) -> Self {
        // Default: 5 join attempts per 10s window per actor
        let burst: usize = std::env::var("MUSTER_JOIN_BURST")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(5);

        let window_ms: u64 = std::env::var("MUSTER_JOIN_WINDOW_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(10_000);

        Self {
            gate,
            join_throttle: JoinThrottle::new(burst, Duration::from_millis(window_ms)),
            start_time: std::time::Instant::now(),
        }
    }

    /// actor.attach.v1
    pub async fn attach(&self, params: AttachRequest) -> Result<AttachResponse, ErrorObjectOwned> {
        let mut actor = Actor::new(
            params.actor_id,
            params.name,
            params.level,
            RoleTag::new(params.role),
            params.map_id,
        );
        actor.restricted = params.restricted;
        actor.privileged = params.privileged;
        actor.unlocks = params.unlocks.into_iter().collect();
        if let Some(state) = params.lfg_state {
            actor.lfg_state = state;
        }

        let actor_id = actor.id;
        self.gate.attach_actor(actor).await.map_err(to_rpc_error)?;
        Ok(AttachResponse {
            actor_id,
            attached: true,
        })
    }

    /// actor.detach.v1
    pub async fn detach(&self, params: DetachRequest) -> Result<DetachResponse, ErrorObjectOwned> {
        let cancelled = self
            .gate
            .detach_actor(params.actor_id)
            .await
            .map_err(to_rpc_error)?;

        // A detach is a natural point to forget stale throttle windows
        self.join_throttle.prune().await;

        Ok(DetachResponse {
            actor_id: params.actor_id,
            cancelled_tickets: cancelled,
        })
    }

    /// queue.join.v1
    pub async fn join(&self, params: JoinRpcRequest) -> Result<JoinRpcResponse, ErrorObjectOwned> {
        // Per-actor throttle (DoS protection)
        if !self.join_throttle.check(params.actor_id).await {
            debug!(actor = params.actor_id, "join throttled");
            return Err(throttled());
        }

        let request = JoinRequest {
            activity: params.activity,
            team_size: params.team_size,
            party: params.party,
        };

        let verdict = self
            .gate
            .join(params.actor_id, request)
            .await
            .map_err(to_rpc_error)?;

        Ok(match verdict {
            JoinVerdict::Accepted {
                ticket,
                bracket,
                slot,
                wait_estimate,
                ..
            } => JoinRpcResponse {
                accepted: true,
                ticket: Some(ticket),
                bracket: Some(bracket),
                slot: Some(slot),
                wait_estimate_ms: Some(wait_estimate.as_millis() as u64),
                reason: None,
                message: None,
            },
            JoinVerdict::Rejected(reason) => JoinRpcResponse {
                accepted: false,
                ticket: None,
                bracket: None,
                slot: None,
                wait_estimate_ms: None,
                reason: Some(reason),
                message: Some(reason.message().to_string()),
            },
        })
    }

    /// queue.leave.v1
    pub async fn leave(&self, params: LeaveRequest) -> Result<LeaveResponse, ErrorObjectOwned> {
        self.gate
            .leave(
                params.actor_id,
                QueueTypeId::new(params.activity, params.team_size),
            )
            .await
            .map_err(to_rpc_error)?;

        Ok(LeaveResponse {
            actor_id: params.actor_id,
            left: true,
        })
    }

    /// queue.assign.v1
    pub async fn assign(&self, params: AssignRequest) -> Result<AssignResponse, ErrorObjectOwned> {
        self.gate
            .assign(
                params.actor_id,
                QueueTypeId::new(params.activity, params.team_size),
                params.instance,
            )
            .await
            .map_err(to_rpc_error)?;

        Ok(AssignResponse {
            actor_id: params.actor_id,
            assigned: true,
        })
    }

    /// queue.status.v1
    pub async fn status(&self, params: StatusRequest) -> Result<StatusResponse, ErrorObjectOwned> {
        let tickets = self
            .gate
            .status(params.actor_id)
            .await
            .map_err(to_rpc_error)?;

        Ok(StatusResponse {
            actor_id: params.actor_id,
            tickets: tickets
                .into_iter()
                .map(|t| TicketInfo {
                    activity: t.queue_type.activity,
                    team_size: t.queue_type.team_size,
                    bracket: t.bracket,
                    slot: t.slot,
                    joined_at: t.joined_at,
                    waited_ms: t.waited_ms,
                    wait_estimate_ms: t.wait_estimate.as_millis() as u64,
                })
                .collect(),
        })
    }

    /// admin.stats.v1
    pub async fn stats(&self, _params: StatsRequest) -> Result<StatsResponse, ErrorObjectOwned> {
        let stats = self.gate.stats().await;
        Ok(StatsResponse {
            actors: stats.actors,
            open_queues: stats.open_queues,
            active_tickets: stats.active_tickets,
            uptime_seconds: self.start_time.elapsed().as_secs() as i64,
        })
    }
}
