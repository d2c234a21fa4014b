// Wait-Time Estimation
//
// Arithmetic mean over the recent completed waits of (queue type,
// bracket). Purely informational: estimation never blocks issuance.

use std::time::Duration;

use crate::domain::{BracketId, QueueTypeId};
use super::registry::QueueRegistry;

/// Expected wait for a new ticket. Falls back to `default_estimate`
/// until the first real sample lands.
pub fn estimate(
    registry: &QueueRegistry,
    queue_type: QueueTypeId,
    bracket: BracketId,
    default_estimate: Duration,
) -> Duration {
    match registry.wait_history(queue_type, bracket) {
        Some(history) if !history.is_empty() => {
            let sum: i64 = history.samples().sum();
            let mean = sum / history.len() as i64;
            Duration::from_millis(mean.max(0) as u64)
        }
        _ => default_estimate,
    }
}
