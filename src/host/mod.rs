// ============================================================================
// spark-broadcast - Host Module
// Injected environment capabilities: executor, tick, animation frames
// ============================================================================

pub mod frame;
pub mod runtime;

pub use frame::FrameRequester;
pub use runtime::{Runtime, TokioRuntime};
