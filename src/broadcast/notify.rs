// ============================================================================
// spark-broadcast - Notifier
// One round: fire every listener, then wait for all of them to settle
// ============================================================================

use futures::future::{join_all, LocalBoxFuture};
use futures::FutureExt;

use crate::core::error::BroadcastError;
use crate::core::types::{ListenerFn, RenderFuture};
use crate::store::registry::Registry;

// =============================================================================
// NOTIFY
// =============================================================================

/// Run one notify round over a snapshot of `listeners`.
///
/// Every listener is called before this returns, in insertion order. The
/// returned future waits for all renders concurrently; if any failed it
/// resolves to the first failure in registration order.
pub fn notify(listeners: &Registry<ListenerFn>) -> LocalBoxFuture<'static, Result<(), BroadcastError>> {
    let renders: Vec<RenderFuture> = listeners
        .snapshot()
        .iter()
        .map(|listener| listener())
        .collect();

    async move {
        let results = join_all(renders).await;
        match results.into_iter().find_map(Result::err) {
            Some(err) => Err(BroadcastError::Listener(err)),
            None => Ok(()),
        }
    }
    .boxed_local()
}

// =============================================================================
// TESTS
// =============================================================================
