//! Muster SDK - Rust Client Library
//!
//! Provides a convenient client for interacting with the Muster queue daemon.
//!
//! # Example
//!
//! ```no_run
//! use muster_sdk::{MusterClient, AttachRequest, JoinRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Connect to daemon
//!     let client = MusterClient::connect("http://127.0.0.1:9538").await?;
//!
//!     // Register the actor, then queue it
//!     client.attach(AttachRequest {
//!         actor_id: 42,
//!         name: "Aldra".to_string(),
//!         level: 70,
//!         role: "healer".to_string(),
//!         map_id: 1,
//!         restricted: false,
//!         privileged: false,
//!         unlocks: vec![],
//!         lfg_state: None,
//!     }).await?;
//!
//!     let response = client.join(JoinRequest {
//!         actor_id: 42,
//!         activity: 489,
//!         team_size: 0,
//!         party: None,
//!     }).await?;
//!
//!     println!("Accepted: {}", response.accepted);
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod types;

pub use client::MusterClient;
pub use error::{Result, SdkError};
pub use types::{
    AssignRequest, AssignResponse, AttachRequest, AttachResponse, DetachRequest, DetachResponse,
    JoinRequest, JoinResponse, LeaveRequest, LeaveResponse, StatsRequest, StatsResponse,
    StatusRequest, StatusResponse, TicketInfo,
};
