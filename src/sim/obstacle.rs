//! Ground obstacles
//!
//! A fixed pool of obstacles scrolls toward the cat. When one leaves the left
//! edge it is respawned in place behind the rightmost obstacle, so slots are
//! reused and never reallocated.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::consts::*;
use crate::sprite::{Sprite, SpriteId};

/// A scaled sprite resting on the ground line
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Top-left corner in screen space
    pub pos: Vec2,
    pub scale: f32,
    pub sprite: SpriteId,
    /// Natural (unscaled) sprite size
    pub sprite_size: Vec2,
}

impl Obstacle {
    /// Place a new obstacle just off the right edge, standing on `ground_y`
    pub fn spawn(sprite: &Sprite, ground_y: f32, screen_width: f32) -> Self {
        let scale = OBSTACLE_SCALE;
        let height = sprite.height as f32 * scale;
        Self {
            pos: Vec2::new(screen_width + OBSTACLE_SPAWN_BUFFER, ground_y - height),
            scale,
            sprite: sprite.id,
            sprite_size: sprite.size(),
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.sprite_size.x * self.scale
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.sprite_size.y * self.scale
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.sprite_size * self.scale
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, self.size())
    }

    /// Whole obstacle is past the left edge of the screen
    #[inline]
    pub fn is_off_screen_left(&self) -> bool {
        self.pos.x + self.width() < 0.0
    }

    /// Reuse this slot: new sprite, resting on the ground, `gap` past `max_x`
    pub fn respawn(&mut self, sprite: &Sprite, ground_y: f32, screen_width: f32, max_x: f32, gap: f32) {
        *self = Self::spawn(sprite, ground_y, screen_width);
        self.pos.x = max_x + gap;
    }
}

/// Random spacing between consecutive obstacles, inclusive on both ends
pub fn random_gap(rng: &mut impl Rng) -> f32 {
    rng.random_range(MIN_OBSTACLE_GAP..=MAX_OBSTACLE_GAP) as f32
}

/// Uniformly choose one of the candidate sprites (`sprites` is never empty)
pub fn pick_sprite<'a>(sprites: &'a [Sprite], rng: &mut impl Rng) -> &'a Sprite {
    &sprites[rng.random_range(0..sprites.len())]
}

/// Rightmost obstacle position in the pool
pub fn max_x(obstacles: &[Obstacle]) -> f32 {
    obstacles
        .iter()
        .map(|o| o.pos.x)
        .fold(f32::NEG_INFINITY, f32::max)
}

/// Move every obstacle left by `speed` and respawn any that scrolled off.
/// Returns how many slots were respawned.
pub fn scroll_pool(
    obstacles: &mut [Obstacle],
    sprites: &[Sprite],
    speed: f32,
    ground_y: f32,
    screen_width: f32,
    rng: &mut impl Rng,
) -> usize {
    let mut respawned = 0;
    for i in 0..obstacles.len() {
        obstacles[i].pos.x -= speed;
        if obstacles[i].is_off_screen_left() {
            let rightmost = max_x(obstacles);
            let sprite = pick_sprite(sprites, rng);
            let gap = random_gap(rng);
            obstacles[i].respawn(sprite, ground_y, screen_width, rightmost, gap);
            log::debug!(
                "Respawned obstacle {} as '{}' at x={:.0}",
                i,
                sprite.name,
                obstacles[i].pos.x
            );
            respawned += 1;
        }
    }
    respawned
}
