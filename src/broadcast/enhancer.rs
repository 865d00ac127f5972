// ============================================================================
// spark-broadcast - Notification Enhancer
// Installs the classifier and scheduler around a state container
// ============================================================================

use std::cell::Cell;
use std::future::Future;
use std::rc::{Rc, Weak};

use tracing::{debug, trace};

use crate::broadcast::broadcaster::{BroadcastStats, Broadcaster};
use crate::broadcast::classify::classify;
use crate::broadcast::scheduling::handle_change;
use crate::core::config::BroadcastConfig;
use crate::core::error::{BroadcastError, BroadcastResult, ListenerError};
use crate::core::types::{async_listener, sync_listener, Action, Notification};
use crate::host::{FrameRequester, Runtime, TokioRuntime};
use crate::store::container::StateContainer;
use crate::store::registry::Subscription;

// =============================================================================
// NOTIFICATION ENHANCER
// =============================================================================

/// Handle for one notification-scheduling instance.
///
/// Owns the flags, the listener registry and the current notification. It
/// wraps exactly one container via [`enhance`](Self::enhance).
///
/// # Example
///
/// ```
/// use spark_broadcast::{BroadcastConfig, NotificationEnhancer};
///
/// let enhancer = NotificationEnhancer::new(BroadcastConfig::throttled()).unwrap();
/// assert_eq!(enhancer.passive("HOVER"), "@@PASSIVE/HOVER");
/// assert_eq!(enhancer.immediate("RESIZE"), "@@IMMEDIATE/RESIZE");
/// ```
pub struct NotificationEnhancer {
    broadcaster: Rc<Broadcaster>,
    installed: Cell<bool>,
}

impl Default for NotificationEnhancer {
    fn default() -> Self {
        Self {
            broadcaster: Broadcaster::new(
                BroadcastConfig::default(),
                Rc::new(TokioRuntime::new()),
                None,
            ),
            installed: Cell::new(false),
        }
    }
}

impl NotificationEnhancer {
    /// Create an enhancer on the tokio runtime with no animation-frame hook.
    pub fn new(config: BroadcastConfig) -> BroadcastResult<Self> {
        Self::builder().config(config).build()
    }

    pub fn builder() -> EnhancerBuilder {
        EnhancerBuilder::default()
    }

    /// Wrap `container`: dispatches are classified and its change signal
    /// drives the scheduler.
    ///
    /// Fails with [`BroadcastError::AlreadyInstalled`] on a second call.
    pub fn enhance<C: StateContainer>(&self, container: C) -> BroadcastResult<EnhancedStore<C>> {
        if self.installed.replace(true) {
            return Err(BroadcastError::AlreadyInstalled);
        }

        let weak: Weak<Broadcaster> = Rc::downgrade(&self.broadcaster);
        let change_signal = container.subscribe(Rc::new(move || {
            if let Some(broadcaster) = weak.upgrade() {
                handle_change(&broadcaster);
            }
        }));

        debug!(
            throttle = self.broadcaster.config.throttle,
            request_animation = self.broadcaster.config.request_animation,
            "notification enhancer installed"
        );

        Ok(EnhancedStore {
            container,
            broadcaster: Rc::clone(&self.broadcaster),
            change_signal,
        })
    }

    /// `name` tagged so that dispatching it skips notification.
    pub fn passive(&self, name: &str) -> String {
        self.broadcaster.config.prefixes.passive(name)
    }

    /// `name` tagged so that dispatching it notifies at once.
    pub fn immediate(&self, name: &str) -> String {
        self.broadcaster.config.prefixes.immediate(name)
    }

    /// The most recently started cycle's completion, or the last completed one
    /// if none is running. Re-fetch after each dispatch.
    pub fn notification(&self) -> Notification {
        self.broadcaster.notification()
    }

    pub fn config(&self) -> &BroadcastConfig {
        &self.broadcaster.config
    }

    pub fn stats(&self) -> BroadcastStats {
        self.broadcaster.stats()
    }

    pub fn listener_count(&self) -> usize {
        self.broadcaster.listeners.len()
    }

    pub fn is_installed(&self) -> bool {
        self.installed.get()
    }
}

// =============================================================================
// BUILDER
// =============================================================================

/// Configures an enhancer and injects host capabilities.
#[derive(Default)]
pub struct EnhancerBuilder {
    config: BroadcastConfig,
    runtime: Option<Rc<dyn Runtime>>,
    frames: Option<Rc<dyn FrameRequester>>,
}

impl EnhancerBuilder {
    pub fn config(mut self, config: BroadcastConfig) -> Self {
        self.config = config;
        self
    }

    pub fn throttle(mut self, throttle: bool) -> Self {
        self.config.throttle = throttle;
        self
    }

    pub fn request_animation(mut self, request_animation: bool) -> Self {
        self.config.request_animation = request_animation;
        self
    }

    pub fn passive_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.prefixes.passive = prefix.into();
        self
    }

    pub fn immediate_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.prefixes.immediate = prefix.into();
        self
    }

    /// Defaults to [`TokioRuntime`].
    pub fn runtime(mut self, runtime: impl Runtime) -> Self {
        self.runtime = Some(Rc::new(runtime));
        self
    }

    /// Without one, frame requests are silently skipped.
    pub fn frame_requester(mut self, frames: impl FrameRequester) -> Self {
        self.frames = Some(Rc::new(frames));
        self
    }

    pub fn build(self) -> BroadcastResult<NotificationEnhancer> {
        self.config.validate()?;

        let runtime = self
            .runtime
            .unwrap_or_else(|| Rc::new(TokioRuntime::new()) as Rc<dyn Runtime>);

        Ok(NotificationEnhancer {
            broadcaster: Broadcaster::new(self.config, runtime, self.frames),
            installed: Cell::new(false),
        })
    }
}

// =============================================================================
// ENHANCED STORE
// =============================================================================

/// A container whose dispatch and subscribe go through the enhancer.
pub struct EnhancedStore<C: StateContainer> {
    container: C,
    broadcaster: Rc<Broadcaster>,
    change_signal: Subscription,
}

impl<C: StateContainer> EnhancedStore<C> {
    /// Classify the action, then forward it and return the container's result.
    pub fn dispatch(&self, action: C::Action) -> C::Action {
        let outcome = classify(
            &self.broadcaster.state,
            &self.broadcaster.config.prefixes,
            action.kind(),
        );
        trace!(kind = action.kind(), ?outcome, "dispatch classified");

        self.container.dispatch(action)
    }

    /// Register a synchronous render listener.
    pub fn subscribe(&self, listener: impl Fn() + 'static) -> Subscription {
        self.broadcaster
            .listeners
            .insert(Rc::from(sync_listener(listener)))
    }

    /// Register a listener whose render completes asynchronously.
    pub fn subscribe_async<F, Fut>(&self, listener: F) -> Subscription
    where
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = Result<(), ListenerError>> + 'static,
    {
        self.broadcaster
            .listeners
            .insert(Rc::from(async_listener(listener)))
    }

    pub fn state(&self) -> C::State {
        self.container.state()
    }

    pub fn notification(&self) -> Notification {
        self.broadcaster.notification()
    }

    pub fn inner(&self) -> &C {
        &self.container
    }

    /// Detach the scheduler from the container's change signal and hand the
    /// container back. Rounds already running finish on their own.
    pub fn into_inner(self) -> C {
        self.change_signal.unsubscribe();
        self.container
    }
}

// =============================================================================
// TESTS
// =============================================================================
