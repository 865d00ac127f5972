// ============================================================================
// spark-broadcast - Core Module
// Flags, configuration, errors and shared types
// ============================================================================

pub mod config;
pub mod constants;
pub mod error;
pub mod state;
pub mod types;

// Re-export commonly used items
pub use config::{BroadcastConfig, Prefixes, Priority};
pub use constants::*;
pub use error::{BroadcastError, BroadcastResult, FrameError, ListenerError};
pub use state::BroadcastState;
pub use types::{
    async_listener, sync_listener, Action, ChangeFn, Event, ListenerFn, Notification,
    RenderFuture,
};
