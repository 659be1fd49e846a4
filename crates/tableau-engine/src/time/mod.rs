//! Time subsystem.
//!
//! Frame timing utilities decoupled from any runtime loop:
//! - one `FrameClock` per frame driver; call `tick()` once per frame
//! - `FpsMeter` turns those ticks into a once-per-window frame rate sample

mod fps;
mod frame_clock;

pub use fps::FpsMeter;
pub use frame_clock::{FrameClock, FrameTime};
