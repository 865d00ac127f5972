// Shared helpers for the integration tests
#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::future::Future;
use std::rc::Rc;
use std::time::Duration;

use futures::channel::oneshot;
use futures::future::LocalBoxFuture;
use futures::FutureExt;
use spark_broadcast::{Event, ListenerError, Store};
use tokio::task::LocalSet;

/// Run `fut` on a paused current-thread runtime inside a LocalSet.
pub fn block_on_local(fut: impl Future<Output = ()>) {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .start_paused(true)
        .build()
        .unwrap();
    LocalSet::new().block_on(&rt, fut);
}

/// Let every pending tick, round and background driver run.
pub async fn settle() {
    tokio::time::sleep(Duration::from_millis(50)).await;
}

/// A container whose state never changes; only the change signal matters.
pub fn null_store() -> Store<(), Event> {
    Store::new(|_: &(), _: &Event| (), ())
}

/// Counts invocations of a synchronous listener.
pub fn counter(calls: Rc<Cell<u32>>) -> impl Fn() + 'static {
    move || calls.set(calls.get() + 1)
}

/// Async listener whose renders stay pending until the gate is opened.
#[derive(Clone, Default)]
pub struct Gate {
    calls: Rc<Cell<u32>>,
    waiting: Rc<RefCell<Vec<oneshot::Sender<Result<(), ListenerError>>>>>,
}

impl Gate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> u32 {
        self.calls.get()
    }

    pub fn waiting(&self) -> usize {
        self.waiting.borrow().len()
    }

    /// A listener bound to this gate; call on a clone to keep a handle.
    pub fn listener(self) -> impl Fn() -> LocalBoxFuture<'static, Result<(), ListenerError>> {
        let gate = self;
        move || {
            gate.calls.set(gate.calls.get() + 1);
            let (tx, rx) = oneshot::channel();
            gate.waiting.borrow_mut().push(tx);
            async move { rx.await.unwrap_or(Ok(())) }.boxed_local()
        }
    }

    /// Settle every waiting render successfully.
    pub fn open(&self) {
        for tx in self.waiting.borrow_mut().drain(..) {
            let _ = tx.send(Ok(()));
        }
    }

    /// Settle every waiting render with a failure.
    pub fn fail(&self, message: &str) {
        for tx in self.waiting.borrow_mut().drain(..) {
            let _ = tx.send(Err(ListenerError::new(message)));
        }
    }
}
