// ============================================================================
// spark-broadcast - Classifier
// Turn an outgoing event's kind into scheduler flags
// ============================================================================
//
// Runs synchronously inside dispatch, ahead of the container's change signal,
// so a burst of same-turn dispatches is fully reflected in the flags before
// the scheduler reacts to any of them.
// ============================================================================

use crate::core::config::{Prefixes, Priority};
use crate::core::state::BroadcastState;

// =============================================================================
// CLASSIFICATION
// =============================================================================

/// Which flag, if any, an event raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Raised `IMMEDIATE`
    Immediate,
    /// Raised `PENDING`
    Pending,
    /// Passive event, or the relevant flag was already set
    Unchanged,
}

/// Classify `kind` against `prefixes`, raising at most one flag on `state`.
///
/// The immediate check runs first, so an immediate-tagged event always wins
/// over the passive marker. A passive-tagged event never raises `PENDING`.
///
/// # Example
///
/// ```
/// use spark_broadcast::{classify, BroadcastState, Classification, Prefixes};
///
/// let state = BroadcastState::new();
/// let prefixes = Prefixes::default();
///
/// let kind = prefixes.passive("SCROLL");
/// assert_eq!(classify(&state, &prefixes, &kind), Classification::Unchanged);
/// assert_eq!(classify(&state, &prefixes, "SAVE"), Classification::Pending);
/// assert!(state.is_pending());
/// ```
pub fn classify(state: &BroadcastState, prefixes: &Prefixes, kind: &str) -> Classification {
    let priority = prefixes.priority(kind);

    if priority == Priority::Immediate && !state.is_immediate() {
        state.mark_immediate();
        return Classification::Immediate;
    }

    // A repeated immediate event falls back to the normal rules, and those
    // still honor a passive marker it may also carry.
    let passive = match priority {
        Priority::Passive => true,
        Priority::Immediate => prefixes.is_passive(kind),
        Priority::Normal => false,
    };
    if !passive && !state.is_pending() {
        state.mark_pending();
        return Classification::Pending;
    }

    Classification::Unchanged
}

// =============================================================================
// TESTS
// =============================================================================
