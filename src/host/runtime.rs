// ============================================================================
// spark-broadcast - Runtime
//
// Pluggable executor capability: background spawning plus the tick that
// separates a burst of dispatches from the throttled round that follows it.
// ============================================================================

use std::time::Duration;

use futures::future::LocalBoxFuture;
use futures::FutureExt;

// =============================================================================
// RUNTIME TRAIT
// =============================================================================

/// Where the scheduler runs its background work.
///
/// Everything here is single-threaded: spawned futures are `!Send` and must be
/// polled on the thread that dispatches.
pub trait Runtime: 'static {
    /// Drive `task` to completion in the background.
    fn spawn(&self, task: LocalBoxFuture<'static, ()>);

    /// Resolve at the next timer boundary, never within the current turn.
    fn tick(&self) -> LocalBoxFuture<'static, ()>;
}

// =============================================================================
// TOKIO RUNTIME
// =============================================================================

/// Runtime backed by `tokio::task::spawn_local` and `tokio::time::sleep`.
///
/// Must be used from inside a [`tokio::task::LocalSet`]; spawning outside one
/// panics. Rounds whose listeners settle synchronously are finished inline
/// and never reach `spawn`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioRuntime {
    tick: Duration,
}

impl TokioRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `tick` as the throttle interval instead of a zero-delay timer.
    pub fn with_tick(tick: Duration) -> Self {
        Self { tick }
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick
    }
}

impl Runtime for TokioRuntime {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        // Detached: completion is observed through the Notification
        drop(tokio::task::spawn_local(task));
    }

    fn tick(&self) -> LocalBoxFuture<'static, ()> {
        tokio::time::sleep(self.tick).boxed_local()
    }
}

// =============================================================================
// TESTS
// =============================================================================
