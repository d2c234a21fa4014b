// Application Layer - Admission Use Cases

pub mod config;
pub mod constants;
pub mod estimator;
pub mod gate;
pub mod issuer;
pub mod registry;
pub mod rules;

// Re-exports
pub use config::GateConfig;
pub use gate::{GateStats, JoinGate, TicketStatus};
pub use registry::{ActorTable, QueueRegistry, WaitHistory};
pub use rules::{Admission, Evaluation};
