//! Frame scheduling
//!
//! The loop asks for "one more frame"; the host decides when it runs
//! (`requestAnimationFrame` in the browser, a fixed step when headless).

/// "Run the loop once more before the next frame" primitive
pub trait FrameScheduler {
    /// Ask for one more frame
    fn request_frame(&mut self);
    /// Consume one outstanding request. Returns false if none was pending.
    fn take_request(&mut self) -> bool;
}

/// Records frame requests for the host to service
#[derive(Debug, Clone, Default)]
pub struct FrameQueue {
    pending: u32,
    /// Requests made over the queue's lifetime
    pub total_requests: u64,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> u32 {
        self.pending
    }
}

impl FrameScheduler for FrameQueue {
    fn request_frame(&mut self) {
        self.pending += 1;
        self.total_requests += 1;
    }

    fn take_request(&mut self) -> bool {
        if self.pending == 0 {
            return false;
        }
        self.pending -= 1;
        true
    }
}
