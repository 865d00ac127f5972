// ============================================================================
// spark-broadcast - Broadcaster
// The per-instance record shared by the dispatch and change-signal paths
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use futures::future::LocalBoxFuture;
use futures::FutureExt;
use tracing::{debug, trace, warn};

use crate::broadcast::notify::notify;
use crate::core::config::BroadcastConfig;
use crate::core::error::BroadcastError;
use crate::core::state::BroadcastState;
use crate::core::types::{ListenerFn, Notification};
use crate::host::{FrameRequester, Runtime};
use crate::store::registry::Registry;

// =============================================================================
// STATS
// =============================================================================

/// Counters for one enhancer instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BroadcastStats {
    /// Notification rounds started (throttled, unthrottled and immediate)
    pub rounds: u64,
    /// Rounds started by immediate events
    pub immediate_rounds: u64,
    /// Changes folded into an already running throttled cycle
    pub coalesced: u64,
    /// Successful animation-frame requests
    pub frames_requested: u64,
    /// Rounds whose listeners reported a failure
    pub failed_rounds: u64,
}

// =============================================================================
// BROADCASTER
// =============================================================================

pub(crate) struct Broadcaster {
    pub(crate) config: BroadcastConfig,
    pub(crate) state: BroadcastState,
    pub(crate) listeners: Rc<Registry<ListenerFn>>,
    pub(crate) runtime: Rc<dyn Runtime>,
    frames: Option<Rc<dyn FrameRequester>>,
    notification: RefCell<Notification>,
    stats: Cell<BroadcastStats>,
}

impl Broadcaster {
    pub(crate) fn new(
        config: BroadcastConfig,
        runtime: Rc<dyn Runtime>,
        frames: Option<Rc<dyn FrameRequester>>,
    ) -> Rc<Self> {
        Rc::new(Self {
            config,
            state: BroadcastState::new(),
            listeners: Registry::new(),
            runtime,
            frames,
            notification: RefCell::new(Notification::resolved()),
            stats: Cell::new(BroadcastStats::default()),
        })
    }

    // =========================================================================
    // ROUNDS
    // =========================================================================

    /// Start one notify round. Listeners are invoked before this returns; the
    /// returned future settles once all of them have.
    pub(crate) fn round(self: &Rc<Self>) -> LocalBoxFuture<'static, Result<(), BroadcastError>> {
        self.record(|stats| stats.rounds += 1);
        let settled = notify(&self.listeners);

        let this = Rc::clone(self);
        async move {
            let result = settled.await;
            if result.is_err() {
                this.record(|stats| stats.failed_rounds += 1);
            }
            result
        }
        .boxed_local()
    }

    /// Make `notification` the one returned by `notification()` and drive it.
    pub(crate) fn expose(self: &Rc<Self>, notification: Notification) {
        *self.notification.borrow_mut() = notification.clone();
        self.drive(notification);
    }

    /// Like [`expose`](Self::expose), but never polls inside the current turn.
    pub(crate) fn expose_deferred(self: &Rc<Self>, notification: Notification) {
        *self.notification.borrow_mut() = notification.clone();
        self.spawn_driver(notification);
    }

    /// Poll `notification` to completion. Rounds whose listeners all settled
    /// synchronously finish here without touching the runtime. Nobody else
    /// is obliged to await it, so failures end up in the log.
    pub(crate) fn drive(self: &Rc<Self>, notification: Notification) {
        match notification.clone().now_or_never() {
            Some(result) => report(result),
            None => self.spawn_driver(notification),
        }
    }

    fn spawn_driver(self: &Rc<Self>, notification: Notification) {
        let guard = DriverGuard {
            broadcaster: Rc::downgrade(self),
            notification: notification.clone(),
        };
        self.runtime.spawn(
            async move {
                let _guard = guard;
                report(notification.await);
            }
            .boxed_local(),
        );
    }

    pub(crate) fn notification(&self) -> Notification {
        self.notification.borrow().clone()
    }

    // =========================================================================
    // ANIMATION FRAMES
    // =========================================================================

    /// Ask the host for one frame. A missing hook is a no-op.
    pub(crate) fn request_frame(&self) {
        let Some(frames) = &self.frames else {
            trace!("no animation frame hook installed");
            return;
        };

        match frames.request_frame() {
            Ok(()) => self.record(|stats| stats.frames_requested += 1),
            Err(err) => warn!(error = %err, "animation frame request failed"),
        }
    }

    // =========================================================================
    // STATS
    // =========================================================================

    pub(crate) fn record(&self, f: impl FnOnce(&mut BroadcastStats)) {
        let mut stats = self.stats.get();
        f(&mut stats);
        self.stats.set(stats);
    }

    pub(crate) fn stats(&self) -> BroadcastStats {
        self.stats.get()
    }
}

fn report(result: Result<(), BroadcastError>) {
    if let Err(err) = result {
        warn!(error = %err, "notification round failed");
    }
}

// =============================================================================
// DRIVER GUARD
// =============================================================================

/// Owned by a spawned driver. If the runtime drops the driver before the
/// notification settles, the exposed handle is released as well, so an
/// abandoned cycle is dropped along with the flags it holds.
struct DriverGuard {
    broadcaster: Weak<Broadcaster>,
    notification: Notification,
}

impl Drop for DriverGuard {
    fn drop(&mut self) {
        if self.notification.is_settled() {
            return;
        }
        let Some(broadcaster) = self.broadcaster.upgrade() else {
            return;
        };

        let abandoned = {
            let mut exposed = broadcaster.notification.borrow_mut();
            if !exposed.ptr_eq(&self.notification) {
                return;
            }
            std::mem::replace(&mut *exposed, Notification::resolved())
        };
        debug!("notification driver dropped before settling");
        drop(abandoned);
    }
}

// =============================================================================
// TESTS
// =============================================================================
