//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time (wall clock vs. manually stepped clock)
//! - Frame scheduling
//! - Keyboard input mapping

pub mod input;
pub mod schedule;
pub mod time;

pub use input::Key;
pub use schedule::{FrameQueue, FrameScheduler};
pub use time::{Clock, ManualClock, SystemClock};
