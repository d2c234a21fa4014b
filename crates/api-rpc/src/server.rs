//! JSON-RPC Server
//!
//! Implements the JSON-RPC 2.0 server over localhost TCP.

use crate::handler::RpcHandler;
use crate::types::{
    AssignRequest, AttachRequest, DetachRequest, JoinRpcRequest, LeaveRequest, StatsRequest,
    StatusRequest,
};
use jsonrpsee::server::{Server, ServerHandle};
use jsonrpsee::RpcModule;
use muster_core::application::JoinGate;
use std::sync::Arc;
use tracing::info;

// jsonrpsee has no Unix socket transport (hyper limitation), so the server
// binds TCP on localhost only. Game-server processes connect over loopback.
const DEFAULT_RPC_HOST: &str = "127.0.0.1";
const DEFAULT_RPC_PORT: u16 = 9538;

/// RPC Server Configuration
pub struct RpcServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for RpcServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_RPC_HOST.to_string(),
            port: DEFAULT_RPC_PORT,
        }
    }
}

/// RPC Server
pub struct RpcServer {
    config: RpcServerConfig,
    handler: Arc<RpcHandler>,
}

impl RpcServer {
    pub fn new(config: RpcServerConfig, gate: Arc<JoinGate>) -> Self {
        Self {
            config,
            handler: Arc::new(RpcHandler::new(gate)),
        }
    }

    /// Start the JSON-RPC server
    ///
    /// Security: Only binds to 127.0.0.1 (no external access)
    pub async fn start(self) -> Result<ServerHandle, String> {
        let addr = format!("{}:{}", self.config.host, self.config.port);

        info!(
            host = %self.config.host,
            port = %self.config.port,
            "Starting JSON-RPC server on TCP (localhost only)"
        );

        // Build server with localhost-only binding
        let server = Server::builder()
            .build(&addr)
            .await
            .map_err(|e| format!("Failed to build server on {}: {}", addr, e))?;

        let mut module = RpcModule::new(());

        // Register methods
        let handler = self.handler.clone();
        module
            .register_async_method("actor.attach.v1", move |params, _, _| {
                let handler = handler.clone();
                async move {
                    let req: AttachRequest = params.parse()?;
                    handler.attach(req).await
                }
            })
            .map_err(|e| e.to_string())?;

        let handler = self.handler.clone();
        module
            .register_async_method("actor.detach.v1", move |params, _, _| {
                let handler = handler.clone();
                async move {
                    let req: DetachRequest = params.parse()?;
                    handler.detach(req).await
                }
            })
            .map_err(|e| e.to_string())?;

        let handler = self.handler.clone();
        module
            .register_async_method("queue.join.v1", move |params, _, _| {
                let handler = handler.clone();
                async move {
                    let req: JoinRpcRequest = params.parse()?;
                    handler.join(req).await
                }
            })
            .map_err(|e| e.to_string())?;

        let handler = self.handler.clone();
        module
            .register_async_method("queue.leave.v1", move |params, _, _| {
                let handler = handler.clone();
                async move {
                    let req: LeaveRequest = params.parse()?;
                    handler.leave(req).await
                }
            })
            .map_err(|e| e.to_string())?;

        let handler = self.handler.clone();
        module
            .register_async_method("queue.assign.v1", move |params, _, _| {
                let handler = handler.clone();
                async move {
                    let req: AssignRequest = params.parse()?;
                    handler.assign(req).await
                }
            })
            .map_err(|e| e.to_string())?;

        let handler = self.handler.clone();
        module
            .register_async_method("queue.status.v1", move |params, _, _| {
                let handler = handler.clone();
                async move {
                    let req: StatusRequest = params.parse()?;
                    handler.status(req).await
                }
            })
            .map_err(|e| e.to_string())?;

        // Admin APIs
        let handler = self.handler.clone();
        module
            .register_async_method("admin.stats.v1", move |params, _, _| {
                let handler = handler.clone();
                async move {
                    let req: StatsRequest = params.parse()?;
                    handler.stats(req).await
                }
            })
            .map_err(|e| e.to_string())?;

        info!("JSON-RPC server started successfully");

        let handle = server.start(module);
        Ok(handle)
    }
}
