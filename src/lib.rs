//! Jumpy Cat - a side-scrolling rainy-night runner
//!
//! Core modules:
//! - `sim`: Simulation (jump physics, scrolling, obstacles, rain, game state)
//! - `renderer`: Draw commands and sprite batching for the host renderer
//! - `audio`: Looping audio channels driven by the simulation
//! - `platform`: Time source and keyboard state
//! - `assets`: Asset discovery and procedural ground texture
//! - `settings`: Runtime preferences

pub mod assets;
pub mod audio;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod sprite;

pub use settings::Settings;
pub use sprite::{SceneAssets, Sprite, SpriteId};

/// Game configuration constants
pub mod consts {
    use std::time::Duration;

    /// Logical viewport (independent of the real window size)
    pub const SCREEN_WIDTH: f32 = 1280.0;
    pub const SCREEN_HEIGHT: f32 = 720.0;

    /// Cat sprite scale relative to its source frames
    pub const CAT_SCALE: f32 = 0.2;
    /// Hitbox is narrower than the drawn sprite
    pub const CAT_HITBOX_WIDTH_FACTOR: f32 = 0.8;
    /// Fixed horizontal anchor of the cat
    pub const CAT_X: f32 = 50.0;

    /// Jump physics (per tick, screen y grows downward)
    pub const GRAVITY: f32 = 2.0;
    pub const JUMP_VELOCITY: f32 = -35.0;

    /// Horizontal scroll speeds (per tick)
    pub const GROUND_SPEED: f32 = 20.0;
    pub const OBSTACLE_SPEED: f32 = 20.0;

    /// Obstacle spawning
    pub const OBSTACLE_SCALE: f32 = 5.0;
    pub const OBSTACLE_SPAWN_BUFFER: f32 = 200.0;
    pub const OBSTACLE_POOL_SIZE: usize = 2;
    pub const MIN_OBSTACLE_GAP: u32 = 600;
    pub const MAX_OBSTACLE_GAP: u32 = 900;

    /// Rain
    pub const RAIN_DROP_COUNT: usize = 200;
    pub const RAIN_MIN_SPEED: f32 = 400.0;
    pub const RAIN_MAX_SPEED: f32 = 600.0;
    pub const RAIN_MIN_LENGTH: f32 = 10.0;
    pub const RAIN_MAX_LENGTH: f32 = 20.0;

    /// Cat run-cycle frame duration
    pub const FRAME_DELAY: Duration = Duration::from_millis(100);

    /// Height of the generated ground strip
    pub const GROUND_TEXTURE_HEIGHT: u32 = 80;

    /// Score is elapsed milliseconds divided by this
    pub const SCORE_DIVISOR: u128 = 10;
}

/// Score for a run that has lasted `elapsed`
#[inline]
pub fn score_for_elapsed(elapsed: std::time::Duration) -> u64 {
    (elapsed.as_millis() / consts::SCORE_DIVISOR) as u64
}
