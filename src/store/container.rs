// ============================================================================
// spark-broadcast - State Containers
// The black-box contract the enhancer wraps, plus a minimal reference store
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::core::types::{Action, ChangeFn};
use crate::store::registry::{Registry, Subscription};

// =============================================================================
// STATE CONTAINER TRAIT
// =============================================================================

/// What the enhancer needs from a state container.
///
/// `subscribe` is the container's internal change signal: it must fire after
/// every dispatch-induced state update.
pub trait StateContainer: 'static {
    type State;
    type Action: Action;

    /// Apply an action and return it unmodified.
    fn dispatch(&self, action: Self::Action) -> Self::Action;

    /// Register a change callback.
    fn subscribe(&self, listener: Rc<ChangeFn>) -> Subscription;

    /// Current state snapshot.
    fn state(&self) -> Self::State;
}

// =============================================================================
// STORE
// =============================================================================

/// Reducer signature: previous state and action in, next state out.
pub type Reducer<S, A> = dyn Fn(&S, &A) -> S;

/// Minimal reducer-driven container.
///
/// # Example
///
/// ```
/// use spark_broadcast::{StateContainer, Store};
///
/// let store = Store::new(|count: &i32, action: &&'static str| match *action {
///     "INC" => count + 1,
///     _ => *count,
/// }, 0);
///
/// store.dispatch("INC");
/// assert_eq!(store.state(), 1);
/// ```
pub struct Store<S, A> {
    inner: Rc<StoreInner<S, A>>,
}

struct StoreInner<S, A> {
    state: RefCell<S>,
    reducer: Box<Reducer<S, A>>,
    listeners: Rc<Registry<ChangeFn>>,
}

impl<S, A> Clone for Store<S, A> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<S, A> Store<S, A>
where
    S: 'static,
    A: Action + 'static,
{
    pub fn new(reducer: impl Fn(&S, &A) -> S + 'static, initial: S) -> Self {
        Self {
            inner: Rc::new(StoreInner {
                state: RefCell::new(initial),
                reducer: Box::new(reducer),
                listeners: Registry::new(),
            }),
        }
    }

    /// Borrow the current state without cloning.
    pub fn with_state<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.inner.state.borrow())
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listeners.len()
    }
}

impl<S, A> StateContainer for Store<S, A>
where
    S: Clone + 'static,
    A: Action + 'static,
{
    type State = S;
    type Action = A;

    fn dispatch(&self, action: A) -> A {
        let next = (self.inner.reducer)(&self.inner.state.borrow(), &action);
        *self.inner.state.borrow_mut() = next;

        // Collect-then-call: listeners may dispatch or unsubscribe
        for listener in self.inner.listeners.snapshot() {
            listener();
        }
        action
    }

    fn subscribe(&self, listener: Rc<ChangeFn>) -> Subscription {
        self.inner.listeners.insert(listener)
    }

    fn state(&self) -> S {
        self.inner.state.borrow().clone()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Event;
    use std::cell::Cell;

    fn counter() -> Store<i32, Event<i32>> {
        Store::new(
            |count: &i32, action: &Event<i32>| match action.kind.as_str() {
                "ADD" => count + action.payload,
                _ => *count,
            },
            0,
        )
    }

    #[test]
    fn dispatch_reduces_and_returns_action() {
        let store = counter();
        let action = store.dispatch(Event::with_payload("ADD", 5));
        assert_eq!(action.payload, 5);
        assert_eq!(store.state(), 5);
        assert_eq!(store.with_state(|s| *s * 2), 10);
    }

    #[test]
    fn change_signal_fires_after_state_update() {
        let store = counter();
        let seen = Rc::new(Cell::new(0));

        store.subscribe(Rc::new({
            let store = store.clone();
            let seen = seen.clone();
            move || seen.set(store.state())
        }));

        store.dispatch(Event::with_payload("ADD", 2));
        assert_eq!(seen.get(), 2);

        // Unknown kinds still fire the signal
        store.dispatch(Event::with_payload("NOOP", 0));
        assert_eq!(seen.get(), 2);
    }

    #[test]
    fn unsubscribed_listener_stops_firing() {
        let store = counter();
        let calls = Rc::new(Cell::new(0));
        let sub = store.subscribe(Rc::new({
            let calls = calls.clone();
            move || calls.set(calls.get() + 1)
        }));

        store.dispatch(Event::with_payload("ADD", 1));
        sub.unsubscribe();
        store.dispatch(Event::with_payload("ADD", 1));

        assert_eq!(calls.get(), 1);
        assert_eq!(store.listener_count(), 0);
    }
}
