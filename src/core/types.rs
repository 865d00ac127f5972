// ============================================================================
// spark-broadcast - Core Types
// Actions, listener shapes and the notification handle
// ============================================================================

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::future::{self, LocalBoxFuture, Shared};
use futures::FutureExt;

use super::error::{BroadcastError, ListenerError};

// =============================================================================
// ACTION
// =============================================================================

/// Anything that can be dispatched: it only needs a kind string for the
/// classifier to inspect.
pub trait Action {
    fn kind(&self) -> &str;
}

impl Action for String {
    fn kind(&self) -> &str {
        self
    }
}

impl Action for &'static str {
    fn kind(&self) -> &str {
        self
    }
}

/// A dispatched event with a kind and a payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Event<P = ()> {
    pub kind: String,
    pub payload: P,
}

impl Event<()> {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            payload: (),
        }
    }
}

impl<P> Event<P> {
    pub fn with_payload(kind: impl Into<String>, payload: P) -> Self {
        Self {
            kind: kind.into(),
            payload,
        }
    }
}

impl<P> Action for Event<P> {
    fn kind(&self) -> &str {
        &self.kind
    }
}

// =============================================================================
// LISTENERS
// =============================================================================

/// What a listener hands back: the completion of its (possibly asynchronous)
/// render work.
pub type RenderFuture = LocalBoxFuture<'static, Result<(), ListenerError>>;

/// A registered render listener.
pub type ListenerFn = dyn Fn() -> RenderFuture;

/// A plain change callback on the underlying container.
pub type ChangeFn = dyn Fn();

/// Wrap a synchronous callback as a listener that settles right away.
pub fn sync_listener(f: impl Fn() + 'static) -> Box<ListenerFn> {
    Box::new(move || {
        f();
        future::ready(Ok(())).boxed_local()
    })
}

/// Wrap an asynchronous callback as a listener.
pub fn async_listener<F, Fut>(f: F) -> Box<ListenerFn>
where
    F: Fn() -> Fut + 'static,
    Fut: Future<Output = Result<(), ListenerError>> + 'static,
{
    Box::new(move || f().boxed_local())
}

// =============================================================================
// NOTIFICATION
// =============================================================================

/// Completion of one notify cycle.
///
/// Clones observe the same cycle; awaiting after the cycle finished returns
/// its cached result immediately.
#[derive(Clone)]
pub struct Notification {
    inner: Shared<LocalBoxFuture<'static, Result<(), BroadcastError>>>,
}

impl Notification {
    pub(crate) fn new(fut: impl Future<Output = Result<(), BroadcastError>> + 'static) -> Self {
        Self {
            inner: fut.boxed_local().shared(),
        }
    }

    /// A notification that has already settled successfully.
    pub fn resolved() -> Self {
        let notification = Self::new(future::ready(Ok(())));
        // Poll once so the result is cached and visible to `is_settled`.
        let _ = notification.inner.clone().now_or_never();
        notification
    }

    /// Whether the cycle has completed and its result is cached.
    pub fn is_settled(&self) -> bool {
        self.inner.peek().is_some()
    }

    /// The cached result, if the cycle has completed.
    pub fn result(&self) -> Option<Result<(), BroadcastError>> {
        self.inner.peek().cloned()
    }

    /// Whether both handles observe the same cycle.
    pub(crate) fn ptr_eq(&self, other: &Self) -> bool {
        self.inner.ptr_eq(&other.inner)
    }
}

impl Future for Notification {
    type Output = Result<(), BroadcastError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.get_mut().inner.poll_unpin(cx)
    }
}

impl std::fmt::Debug for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notification")
            .field("settled", &self.is_settled())
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================
