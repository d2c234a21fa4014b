//! Muster Client Implementation

use crate::error::{Result, SdkError};
use crate::types::{
    AssignRequest, AssignResponse, AttachRequest, AttachResponse, DetachRequest, DetachResponse,
    JoinRequest, JoinResponse, LeaveRequest, LeaveResponse, StatsRequest, StatsResponse,
    StatusRequest, StatusResponse,
};
use jsonrpsee::core::client::ClientT;
use jsonrpsee::core::traits::ToRpcParams;
use jsonrpsee::http_client::{HttpClient, HttpClientBuilder};
use serde::Serialize;
use serde_json::value::RawValue;
use std::time::Duration;

/// Daemon methods take their request object as named params, so each
/// request struct travels as the params root, not a one-element array.
struct NamedParams<T>(T);

impl<T: Serialize> ToRpcParams for NamedParams<T> {
    fn to_rpc_params(self) -> std::result::Result<Option<Box<RawValue>>, serde_json::Error> {
        serde_json::value::to_raw_value(&self.0).map(Some)
    }
}

/// Muster Queue Engine Client
///
/// Provides a high-level interface to interact with the Muster daemon.
///
/// # Example
///
/// ```no_run
/// use muster_sdk::MusterClient;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = MusterClient::connect("http://127.0.0.1:9538").await?;
/// # Ok(())
/// # }
/// ```
pub struct MusterClient {
    client: HttpClient,
}

impl MusterClient {
    /// Connect to the Muster daemon
    ///
    /// # Arguments
    ///
    /// * `url` - RPC endpoint URL (e.g., `http://127.0.0.1:9538`)
    pub async fn connect(url: impl AsRef<str>) -> Result<Self> {
        let url = url.as_ref();

        let client = HttpClientBuilder::default()
            .request_timeout(Duration::from_secs(30))
            .build(url)
            .map_err(|e| SdkError::Connection(format!("Failed to create client: {}", e)))?;

        Ok(Self { client })
    }

    /// Register an actor with the gate
    ///
    /// An actor must be attached before it can join, leave, or query queues.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use muster_sdk::{MusterClient, AttachRequest};
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// # let client = MusterClient::connect("http://127.0.0.1:9538").await?;
    /// let response = client.attach(AttachRequest {
    ///     actor_id: 42,
    ///     name: "Aldra".to_string(),
    ///     level: 70,
    ///     role: "healer".to_string(),
    ///     map_id: 1,
    ///     restricted: false,
    ///     privileged: false,
    ///     unlocks: vec![],
    ///     lfg_state: None,
    /// }).await?;
    ///
    /// assert!(response.attached);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn attach(&self, request: AttachRequest) -> Result<AttachResponse> {
        let params = NamedParams(request);
        let response: AttachResponse = self.client.request("actor.attach.v1", params).await?;

        Ok(response)
    }

    /// Detach an actor, cancelling any tickets it still holds
    pub async fn detach(&self, actor_id: u64) -> Result<DetachResponse> {
        let request = DetachRequest { actor_id };
        let params = NamedParams(request);
        let response: DetachResponse = self.client.request("actor.detach.v1", params).await?;

        Ok(response)
    }

    /// Request admission to a queue
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use muster_sdk::{MusterClient, JoinRequest};
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// # let client = MusterClient::connect("http://127.0.0.1:9538").await?;
    /// let response = client.join(JoinRequest {
    ///     actor_id: 42,
    ///     activity: 489,
    ///     team_size: 0,
    ///     party: None,
    /// }).await?;
    ///
    /// if response.accepted {
    ///     println!("Queued, estimate {}ms", response.wait_estimate_ms.unwrap_or(0));
    /// } else {
    ///     println!("Rejected: {}", response.reason.unwrap_or_default());
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn join(&self, request: JoinRequest) -> Result<JoinResponse> {
        let params = NamedParams(request);
        let response: JoinResponse = self.client.request("queue.join.v1", params).await?;

        Ok(response)
    }

    /// Cancel a held ticket
    pub async fn leave(&self, actor_id: u64, activity: u32, team_size: u8) -> Result<LeaveResponse> {
        let request = LeaveRequest {
            actor_id,
            activity,
            team_size,
        };
        let params = NamedParams(request);
        let response: LeaveResponse = self.client.request("queue.leave.v1", params).await?;

        Ok(response)
    }

    /// Hand a waiting ticket to an activity instance
    ///
    /// Meant for the match scheduler, not for game-server session code.
    pub async fn assign(
        &self,
        actor_id: u64,
        activity: u32,
        team_size: u8,
        instance: u64,
    ) -> Result<AssignResponse> {
        let request = AssignRequest {
            actor_id,
            activity,
            team_size,
            instance,
        };
        let params = NamedParams(request);
        let response: AssignResponse = self.client.request("queue.assign.v1", params).await?;

        Ok(response)
    }

    /// List the tickets an actor currently holds
    pub async fn status(&self, actor_id: u64) -> Result<StatusResponse> {
        let request = StatusRequest { actor_id };
        let params = NamedParams(request);
        let response: StatusResponse = self.client.request("queue.status.v1", params).await?;

        Ok(response)
    }

    /// Fetch gate-wide counters
    pub async fn stats(&self) -> Result<StatsResponse> {
        let params = NamedParams(StatsRequest {});
        let response: StatsResponse = self.client.request("admin.stats.v1", params).await?;

        Ok(response)
    }
}
