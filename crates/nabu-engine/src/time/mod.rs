//! Time subsystem.
//!
//! Frame timing driven by host timestamps rather than wall time:
//! - one `FrameClock` per render surface
//! - call `tick(timestamp_ms)` once per ticked frame
//! - call `reset()` when ticking is suspended so resume starts from `dt = 0`

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
