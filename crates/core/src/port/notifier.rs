// Notifier Port - delivers queue status to actor sessions

use std::time::Duration;

use async_trait::async_trait;

use crate::domain::{ActorId, QueueSlot, QueueTypeId, RejectReason};

/// Status of one actor/queue relationship, as delivered to the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueueNotice {
    /// Join refused with exactly one reason
    Rejected {
        queue_type: QueueTypeId,
        reason: RejectReason,
    },
    /// Ticket issued; the actor is waiting
    Queued {
        queue_type: QueueTypeId,
        slot: QueueSlot,
        wait_estimate: Duration,
    },
    /// Ticket cancelled at the actor's request
    Left { queue_type: QueueTypeId },
    /// Ticket claimed by the scheduler; an instance is ready
    Assigned { queue_type: QueueTypeId },
}

/// Delivery interface. Transport details (sessions, packets) live
/// outside the core; the gate only hands over notices.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn deliver(&self, actor: ActorId, notice: QueueNotice);
}

/// Log-only notifier (production default until a session transport is
/// wired in)
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn deliver(&self, actor: ActorId, notice: QueueNotice) {
        tracing::info!(actor = actor, notice = ?notice, "queue notice");
    }
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::sync::Mutex;

    /// Records every delivery for assertions
    pub struct RecordingNotifier {
        notices: Mutex<Vec<(ActorId, QueueNotice)>>,
    }

    impl RecordingNotifier {
        pub fn new() -> Self {
            Self {
                notices: Mutex::new(Vec::new()),
            }
        }

        pub fn count(&self) -> usize {
            self.notices.lock().unwrap().len()
        }

        /// Drain everything recorded so far
        pub fn take(&self) -> Vec<(ActorId, QueueNotice)> {
            std::mem::take(&mut *self.notices.lock().unwrap())
        }
    }

    impl Default for RecordingNotifier {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn deliver(&self, actor: ActorId, notice: QueueNotice) {
            self.notices.lock().unwrap().push((actor, notice));
        }
    }
}
