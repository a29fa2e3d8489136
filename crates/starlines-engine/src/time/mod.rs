//! Time subsystem.
//!
//! Provides stable, testable frame timing utilities without coupling to the runtime:
//! - `FrameClock`: call `tick()` once per presented frame to obtain `FrameTime`
//! - `FpsCounter`: fold frame deltas into a frames-per-second readout

mod fps;
mod frame_clock;

pub use fps::FpsCounter;
pub use frame_clock::{FrameClock, FrameTime};
