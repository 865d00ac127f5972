// ============================================================================
// spark-broadcast - Render Notification Scheduling for State Containers
// ============================================================================
//
// Decides when and how often subscriber callbacks run in response to a burst
// of state changes: passive events skip notification, immediate events notify
// at once, and normal events either notify per change or are coalesced into
// tick-delayed throttled cycles.
// ============================================================================

pub mod broadcast;
pub mod core;
pub mod host;
pub mod store;

// Re-export core items at crate root for ergonomic access
pub use crate::core::constants;
pub use crate::core::config::{BroadcastConfig, Prefixes, Priority};
pub use crate::core::error::{BroadcastError, BroadcastResult, FrameError, ListenerError};
pub use crate::core::state::BroadcastState;
pub use crate::core::types::{
    async_listener, sync_listener, Action, ChangeFn, Event, ListenerFn, Notification,
    RenderFuture,
};

// Re-export the enhancer surface
pub use broadcast::{
    classify, notify, BroadcastStats, Classification, EnhancedStore, EnhancerBuilder,
    NotificationEnhancer,
};

// Re-export host capabilities
pub use host::{FrameRequester, Runtime, TokioRuntime};

// Re-export the container contract
pub use store::{ListenerId, Reducer, Registry, StateContainer, Store, Subscription};

// =============================================================================
// TESTS
// =============================================================================
