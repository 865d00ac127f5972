// ============================================================================
// spark-broadcast - Constants
// Scheduler flag bits and default event prefixes
// ============================================================================

// =============================================================================
// BROADCAST STATE FLAGS
// =============================================================================

/// A normal-priority change occurred and has not been notified yet
pub const PENDING: u8 = 1 << 0;

/// An immediate-priority change occurred and must bypass throttling
pub const IMMEDIATE: u8 = 1 << 1;

/// A throttled notification cycle is currently running
pub const IN_PROGRESS: u8 = 1 << 2;

/// No flags set
pub const IDLE: u8 = 0;

// =============================================================================
// DEFAULT PREFIXES
// =============================================================================

/// Default marker for events that must not trigger a notification round.
pub const DEFAULT_PASSIVE_PREFIX: &str = "@@PASSIVE/";

/// Default marker for events that force a notification round right away.
pub const DEFAULT_IMMEDIATE_PREFIX: &str = "@@IMMEDIATE/";

// =============================================================================
// TESTS
// =============================================================================
