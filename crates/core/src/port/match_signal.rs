// Match Signal Port - nudges the external match scheduler

use tokio::sync::mpsc;

use crate::domain::{BracketId, QueueTypeId};

/// "This queue changed" - emitted after membership of (queue type,
/// bracket) grew or shrank
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueChanged {
    pub queue_type: QueueTypeId,
    pub bracket: BracketId,
}

/// One-way, fire-and-forget signal to the scheduling collaborator. The
/// scheduler folds duplicates and picks changes up on its next cycle;
/// the gate never waits on it.
pub trait MatchSignal: Send + Sync {
    fn queue_changed(&self, change: QueueChanged);
}

/// Production implementation: pushes changes onto an unbounded channel
/// drained by the scheduler side.
pub struct ChannelMatchSignal {
    tx: mpsc::UnboundedSender<QueueChanged>,
}

impl ChannelMatchSignal {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<QueueChanged>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl MatchSignal for ChannelMatchSignal {
    fn queue_changed(&self, change: QueueChanged) {
        // A dropped receiver just means no scheduler is listening
        let _ = self.tx.send(change);
    }
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::sync::Mutex;

    /// Collects every emitted change
    pub struct CountingSignal {
        changes: Mutex<Vec<QueueChanged>>,
    }

    impl CountingSignal {
        pub fn new() -> Self {
            Self {
                changes: Mutex::new(Vec::new()),
            }
        }

        pub fn count(&self) -> usize {
            self.changes.lock().unwrap().len()
        }

        pub fn take(&self) -> Vec<QueueChanged> {
            std::mem::take(&mut *self.changes.lock().unwrap())
        }
    }

    impl Default for CountingSignal {
        fn default() -> Self {
            Self::new()
        }
    }

    impl MatchSignal for CountingSignal {
        fn queue_changed(&self, change: QueueChanged) {
            self.changes.lock().unwrap().push(change);
        }
    }
}
