//! Rain particles
//!
//! Drops fall at a per-drop speed and wrap back above the top of the screen.
//! The pool is fixed; drops are only ever mutated.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// A single falling streak
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Raindrop {
    /// Top end of the streak
    pub pos: Vec2,
    /// Visual length of the streak
    pub length: f32,
    /// Fall speed (pixels/second)
    pub speed: f32,
}

impl Raindrop {
    /// A drop somewhere on screen with random speed and length
    pub fn new(screen: Vec2, rng: &mut impl Rng) -> Self {
        Self {
            pos: Vec2::new(
                rng.random::<f32>() * screen.x,
                rng.random::<f32>() * screen.y,
            ),
            length: rng.random_range(RAIN_MIN_LENGTH..RAIN_MAX_LENGTH),
            speed: rng.random_range(RAIN_MIN_SPEED..RAIN_MAX_SPEED),
        }
    }

    /// Fall for `dt` seconds; past the bottom, reappear just above the top
    /// at a fresh column. Returns true if the drop wrapped.
    pub fn fall(&mut self, dt: f32, screen: Vec2, rng: &mut impl Rng) -> bool {
        self.pos.y += self.speed * dt;
        if self.pos.y > screen.y {
            self.pos.y = -self.length;
            self.pos.x = random_column(screen.x, rng);
            true
        } else {
            false
        }
    }

    /// Bottom end of the streak
    #[inline]
    pub fn tail(&self) -> Vec2 {
        self.pos + Vec2::new(0.0, self.length)
    }
}

/// Uniform x in `[0, width)`
fn random_column(width: f32, rng: &mut impl Rng) -> f32 {
    let x = rng.random::<f32>() * width;
    // float rounding can land exactly on `width`
    if x >= width { 0.0 } else { x }
}

/// Build the full rain pool
pub fn spawn_rain(count: usize, screen: Vec2, rng: &mut impl Rng) -> Vec<Raindrop> {
    (0..count).map(|_| Raindrop::new(screen, rng)).collect()
}
