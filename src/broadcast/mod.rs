// ============================================================================
// spark-broadcast - Broadcast Module
// Classifier, scheduler and notifier wrapped around a state container
// ============================================================================

pub(crate) mod broadcaster;
pub mod classify;
pub mod enhancer;
pub mod notify;
pub(crate) mod scheduling;

pub use broadcaster::BroadcastStats;
pub use classify::{classify, Classification};
pub use enhancer::{EnhancedStore, EnhancerBuilder, NotificationEnhancer};
pub use notify::notify;
