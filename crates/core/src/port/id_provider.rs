// ID Provider Port (for deterministic testing)

use crate::domain::TicketId;

/// ID provider interface (allows deterministic IDs in tests)
pub trait IdProvider: Send + Sync {
    /// Mint the id for a new ticket
    fn next_ticket_id(&self) -> TicketId;
}

/// UUID v4 provider (production)
pub struct UuidProvider;

impl IdProvider for UuidProvider {
    fn next_ticket_id(&self) -> TicketId {
        uuid::Uuid::new_v4().to_string()
    }
}

pub mod mocks {
    use super::IdProvider;
    use crate::domain::TicketId;
    use std::sync::atomic::{AtomicU64, Ordering};

    /// Sequential ids: ticket-1, ticket-2, ...
    pub struct SequentialIds {
        next: AtomicU64,
    }

    impl SequentialIds {
        pub fn new() -> Self {
            Self {
                next: AtomicU64::new(1),
            }
        }
    }

    impl Default for SequentialIds {
        fn default() -> Self {
            Self::new()
        }
    }

    impl IdProvider for SequentialIds {
        fn next_ticket_id(&self) -> TicketId {
            let n = self.next.fetch_add(1, Ordering::SeqCst);
            format!("ticket-{}", n)
        }
    }
}
