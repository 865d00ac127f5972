// ============================================================================
// spark-broadcast - Broadcast State
// The scheduler's flag record, one per enhancer instance
// ============================================================================

use std::cell::Cell;

use super::constants::*;

// =============================================================================
// BROADCAST STATE
// =============================================================================

/// The `PENDING` / `IMMEDIATE` / `IN_PROGRESS` flags shared by the dispatch
/// interceptor and the change-signal handler.
///
/// Flags can coexist: a coalesced `PENDING` lives alongside `IN_PROGRESS`, and
/// an immediate event may arrive while either is set.
#[derive(Debug, Default)]
pub struct BroadcastState {
    flags: Cell<u8>,
}

impl BroadcastState {
    pub fn new() -> Self {
        Self {
            flags: Cell::new(IDLE),
        }
    }

    pub fn flags(&self) -> u8 {
        self.flags.get()
    }

    fn has(&self, flag: u8) -> bool {
        (self.flags.get() & flag) != 0
    }

    fn insert(&self, flag: u8) {
        self.flags.set(self.flags.get() | flag);
    }

    fn remove(&self, flag: u8) {
        self.flags.set(self.flags.get() & !flag);
    }

    /// Clear `flag`, returning whether it was set.
    fn take(&self, flag: u8) -> bool {
        let was = self.has(flag);
        self.remove(flag);
        was
    }

    // =========================================================================
    // PENDING
    // =========================================================================

    pub fn is_pending(&self) -> bool {
        self.has(PENDING)
    }

    pub fn mark_pending(&self) {
        self.insert(PENDING);
    }

    pub fn take_pending(&self) -> bool {
        self.take(PENDING)
    }

    // =========================================================================
    // IMMEDIATE
    // =========================================================================

    pub fn is_immediate(&self) -> bool {
        self.has(IMMEDIATE)
    }

    pub fn mark_immediate(&self) {
        self.insert(IMMEDIATE);
    }

    pub fn take_immediate(&self) -> bool {
        self.take(IMMEDIATE)
    }

    // =========================================================================
    // IN PROGRESS
    // =========================================================================

    pub fn is_in_progress(&self) -> bool {
        self.has(IN_PROGRESS)
    }

    pub fn begin_cycle(&self) {
        self.insert(IN_PROGRESS);
    }

    pub fn end_cycle(&self) {
        self.remove(IN_PROGRESS);
    }

    pub fn is_idle(&self) -> bool {
        self.flags.get() == IDLE
    }
}

// =============================================================================
// TESTS
// =============================================================================
