// ============================================================================
// spark-broadcast - Scheduling
// React to the container's change signal: notify now, defer, or coalesce
// ============================================================================
//
// Decision table (evaluated synchronously on every change signal):
//
//   IMMEDIATE            -> clear it, start a background round, done
//   PENDING, unthrottled -> clear it, start and expose a round
//   PENDING, cycle busy  -> leave PENDING set for the running cycle
//   PENDING, idle        -> begin a throttled cycle and expose it
//   nothing              -> no-op
//
// Only the throttled cycle suspends. It loops tick -> round -> frame until no
// PENDING remains at the end of an iteration.
// ============================================================================

use std::rc::Rc;

use tracing::{debug, trace};

use crate::broadcast::broadcaster::Broadcaster;
use crate::core::error::BroadcastError;
use crate::core::types::Notification;

// =============================================================================
// CHANGE SIGNAL HANDLER
// =============================================================================

pub(crate) fn handle_change(broadcaster: &Rc<Broadcaster>) {
    let state = &broadcaster.state;

    if state.take_immediate() {
        trace!("immediate round");
        broadcaster.record(|stats| stats.immediate_rounds += 1);
        // Not exposed: immediate rounds race any throttled cycle on their own
        broadcaster.drive(Notification::new(broadcaster.round()));
        return;
    }

    if !state.take_pending() {
        return;
    }

    if !broadcaster.config.throttle {
        trace!("unthrottled round");
        broadcaster.expose(Notification::new(broadcaster.round()));
        return;
    }

    if state.is_in_progress() {
        state.mark_pending();
        broadcaster.record(|stats| stats.coalesced += 1);
        trace!("change coalesced into running cycle");
        return;
    }

    state.begin_cycle();
    // Armed before the cycle is ever polled: dropping it unpolled still ends it
    let guard = CycleGuard {
        broadcaster: Rc::clone(broadcaster),
    };
    debug!("throttled cycle started");
    broadcaster.expose_deferred(Notification::new(throttled_cycle(guard)));
}

// =============================================================================
// THROTTLED CYCLE
// =============================================================================

/// Clears `IN_PROGRESS` however the cycle ends: finished, panicked, or
/// dropped by the runtime before its first poll.
struct CycleGuard {
    broadcaster: Rc<Broadcaster>,
}

impl Drop for CycleGuard {
    fn drop(&mut self) {
        self.broadcaster.state.end_cycle();
    }
}

/// The delayed notify loop. Resolves once no change is left pending.
///
/// A failed round does not stop changes that were coalesced into it from
/// getting their own round; the first failure is reported at the end.
async fn throttled_cycle(guard: CycleGuard) -> Result<(), BroadcastError> {
    let broadcaster = &guard.broadcaster;
    let mut first_failure = None;
    let mut iterations = 0u32;

    loop {
        broadcaster.runtime.tick().await;
        iterations += 1;

        match broadcaster.round().await {
            Ok(()) => {
                if broadcaster.config.request_animation {
                    broadcaster.request_frame();
                }
            }
            Err(err) => {
                debug!(iteration = iterations, error = %err, "throttled round failed");
                first_failure.get_or_insert(err);
            }
        }

        if !broadcaster.state.take_pending() {
            break;
        }
        trace!(iteration = iterations, "pending change, running another round");
    }

    debug!(iterations, "throttled cycle finished");
    match first_failure {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

// =============================================================================
// TESTS
// =============================================================================
