// Gate constants (ADR: No magic values)

/// Completed-wait samples kept per (queue type, bracket)
pub const WAIT_SAMPLE_WINDOW: usize = 10;

/// Wait estimate handed out before any sample exists (30s)
pub const DEFAULT_WAIT_ESTIMATE_MS: u64 = 30_000;

/// Permissive level floor used when none is configured
pub const DEFAULT_MIN_LEVEL: u32 = 1;

/// Permissive level ceiling used when none is configured
pub const DEFAULT_MAX_LEVEL: u32 = 80;
