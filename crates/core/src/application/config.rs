// Gate Configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::constants::{DEFAULT_MAX_LEVEL, DEFAULT_MIN_LEVEL, DEFAULT_WAIT_ESTIMATE_MS};

/// Tunables for the admission gate. Both level bounds are inclusive
/// and configured independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateConfig {
    /// Minimum actor level admitted to any queue
    pub min_level: u32,
    /// Maximum actor level admitted to any queue
    pub max_level: u32,
    /// Permit queueing while the group-finder state is exactly Queued
    pub allow_lfg_mixing: bool,
    /// Estimate returned for queues with no wait history yet
    pub default_wait_estimate_ms: u64,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            min_level: DEFAULT_MIN_LEVEL,
            max_level: DEFAULT_MAX_LEVEL,
            allow_lfg_mixing: false,
            default_wait_estimate_ms: DEFAULT_WAIT_ESTIMATE_MS,
        }
    }
}

impl GateConfig {
    pub fn default_wait_estimate(&self) -> Duration {
        Duration::from_millis(self.default_wait_estimate_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_permissive() {
        let config = GateConfig::default();
        assert_eq!(config.min_level, 1);
        assert_eq!(config.max_level, 80);
        assert!(!config.allow_lfg_mixing);
        assert_eq!(config.default_wait_estimate(), Duration::from_secs(30));
    }
}
