// ============================================================================
// spark-broadcast - Listener Registry
// Ordered listener storage with identity-based, idempotent removal
// ============================================================================
//
// Ids are handed out from a monotonically increasing counter and never
// reused, so a stale Subscription can never remove a listener that was added
// after it. Callers iterate a snapshot (collect-then-call), which keeps
// unsubscribe-during-iteration from disturbing the running pass.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

// =============================================================================
// LISTENER ID
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

// =============================================================================
// REGISTRY
// =============================================================================

/// Ordered sequence of listeners of type `L`.
pub struct Registry<L: ?Sized> {
    next_id: Cell<u64>,
    entries: RefCell<Vec<(ListenerId, Rc<L>)>>,
}

impl<L: ?Sized + 'static> Registry<L> {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            next_id: Cell::new(0),
            entries: RefCell::new(Vec::new()),
        })
    }

    /// Append a listener, returning the handle that removes it.
    pub fn insert(self: &Rc<Self>, listener: Rc<L>) -> Subscription {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.entries.borrow_mut().push((id, listener));

        Subscription {
            id,
            registry: Rc::downgrade(self) as Weak<dyn Detach>,
        }
    }

    /// Remove the listener with `id`. Returns false if it was already gone.
    pub fn remove(&self, id: ListenerId) -> bool {
        let mut entries = self.entries.borrow_mut();
        match entries.iter().position(|(entry_id, _)| *entry_id == id) {
            Some(index) => {
                entries.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, id: ListenerId) -> bool {
        self.entries.borrow().iter().any(|(entry_id, _)| *entry_id == id)
    }

    /// Clone out the current listeners in insertion order.
    pub fn snapshot(&self) -> Vec<Rc<L>> {
        self.entries
            .borrow()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

// =============================================================================
// SUBSCRIPTION
// =============================================================================

/// Type-erased removal, so one Subscription type serves every registry.
trait Detach {
    fn detach(&self, id: ListenerId) -> bool;
    fn is_attached(&self, id: ListenerId) -> bool;
}

impl<L: ?Sized + 'static> Detach for Registry<L> {
    fn detach(&self, id: ListenerId) -> bool {
        self.remove(id)
    }

    fn is_attached(&self, id: ListenerId) -> bool {
        self.contains(id)
    }
}

/// Handle returned by `subscribe`.
///
/// Dropping it does NOT unsubscribe; call [`Subscription::unsubscribe`].
#[derive(Clone)]
pub struct Subscription {
    id: ListenerId,
    registry: Weak<dyn Detach>,
}

impl Subscription {
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Remove the listener. Repeated calls are no-ops and return false.
    pub fn unsubscribe(&self) -> bool {
        match self.registry.upgrade() {
            Some(registry) => registry.detach(self.id),
            None => false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.registry
            .upgrade()
            .is_some_and(|registry| registry.is_attached(self.id))
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================
