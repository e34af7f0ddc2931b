//! Frame timing.
//!
//! - one `FrameClock` per window; `tick()` once per presented frame
//! - `FrameStats` turns ticks into a periodic frames-per-second report

mod frame_clock;
mod stats;

pub use frame_clock::{FrameClock, FrameTime};
pub use stats::{FrameReport, FrameStats};
