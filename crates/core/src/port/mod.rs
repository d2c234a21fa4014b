// Port Layer - Interfaces for external collaborators

pub mod content;
pub mod id_provider; // For deterministic testing
pub mod match_signal;
pub mod notifier;
pub mod policy;
pub mod time_provider;

// Re-exports
pub use content::{ContentDirectory, RoleLock, StaticContent};
pub use id_provider::{IdProvider, UuidProvider};
pub use match_signal::{ChannelMatchSignal, MatchSignal, QueueChanged};
pub use notifier::{LogNotifier, Notifier, QueueNotice};
pub use policy::{JoinPolicy, PolicyReview, PolicySet};
pub use time_provider::{SystemTimeProvider, TimeProvider};
