//! Platform abstraction layer
//!
//! Everything the simulation needs from the host, in narrow form:
//! - Time: a monotonic clock sampled once per frame
//! - Input: held-key state mapped to per-tick input

pub mod input;
pub mod time;

pub use input::{Key, KeyboardState};
pub use time::{Clock, ManualClock, MonotonicClock};
