//! JSON-RPC API Layer
//!
//! Implements the JSON-RPC 2.0 server for the Muster queue engine.

pub mod error;
pub mod handler;
pub mod join_throttle;
pub mod server;
pub mod types;

pub use server::{RpcServer, RpcServerConfig};
