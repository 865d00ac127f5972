// ============================================================================
// spark-broadcast - Store Module
// Container contract, reference store and listener registry
// ============================================================================

pub mod container;
pub mod registry;

pub use container::{Reducer, StateContainer, Store};
pub use registry::{ListenerId, Registry, Subscription};
