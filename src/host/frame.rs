// ============================================================================
// spark-broadcast - Animation Frames
//
// Optional host hook asked for one frame after each throttled round.
// ============================================================================

use crate::core::error::FrameError;

// =============================================================================
// FRAME REQUESTER TRAIT
// =============================================================================

/// A host capability that schedules a rendering frame.
///
/// Requests are fire-and-forget. A failure is logged by the scheduler and
/// never reaches listeners or the notification.
pub trait FrameRequester: 'static {
    fn request_frame(&self) -> Result<(), FrameError>;
}

impl<F> FrameRequester for F
where
    F: Fn() -> Result<(), FrameError> + 'static,
{
    fn request_frame(&self) -> Result<(), FrameError> {
        self()
    }
}

// =============================================================================
// TESTS
// =============================================================================
