//! Simulation module
//!
//! All gameplay logic lives here:
//! - Time is passed in by the host, never sampled internally
//! - Seeded RNG only
//! - Fixed-size entity pools, mutated in place
//! - No rendering or platform dependencies

pub mod animator;
pub mod collision;
pub mod obstacle;
pub mod rain;
pub mod state;
pub mod tick;

pub use animator::FrameAnimator;
pub use collision::{Aabb, overlaps};
pub use obstacle::Obstacle;
pub use rain::Raindrop;
pub use state::{Game, GameEvent, GamePhase, Player};
pub use tick::{TickInput, tick};
