//! Sprite handles
//!
//! The simulation never touches pixels. A host decodes images, uploads them
//! wherever it likes and hands the core a `Sprite`: an opaque id plus the
//! natural pixel size, which is all gameplay needs for scaling and hitboxes.

use std::rc::Rc;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::assets::AssetError;

/// Host-assigned identifier for a decoded image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SpriteId(pub u32);

/// A decoded image as seen by the simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
    pub id: SpriteId,
    /// Source name (usually the file name), for logs
    pub name: String,
    pub width: u32,
    pub height: u32,
}

impl Sprite {
    pub fn new(id: u32, name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            id: SpriteId(id),
            name: name.into(),
            width,
            height,
        }
    }

    /// Natural size in pixels
    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }
}

/// Everything visual a game instance needs, validated once at the boundary.
///
/// Cloning is cheap: the sprite lists are shared, so a restart can rebuild the
/// game from the same bundle.
#[derive(Debug, Clone)]
pub struct SceneAssets {
    background: Rc<Sprite>,
    ground: Rc<Sprite>,
    cat_frames: Rc<[Sprite]>,
    obstacles: Rc<[Sprite]>,
}

impl SceneAssets {
    /// Bundle decoded sprites. Fails if there is nothing to animate or
    /// nothing to spawn.
    pub fn new(
        background: Sprite,
        ground: Sprite,
        cat_frames: Vec<Sprite>,
        obstacles: Vec<Sprite>,
    ) -> Result<Self, AssetError> {
        if cat_frames.is_empty() {
            return Err(AssetError::NoAnimationFrames);
        }
        if obstacles.is_empty() {
            return Err(AssetError::NoObstacleSprites);
        }
        Ok(Self {
            background: Rc::new(background),
            ground: Rc::new(ground),
            cat_frames: cat_frames.into(),
            obstacles: obstacles.into(),
        })
    }

    pub fn background(&self) -> &Sprite {
        &self.background
    }

    pub fn ground(&self) -> &Sprite {
        &self.ground
    }

    /// Cat run cycle (never empty)
    pub fn cat_frames(&self) -> &Rc<[Sprite]> {
        &self.cat_frames
    }

    /// Candidate obstacle sprites (never empty)
    pub fn obstacles(&self) -> &[Sprite] {
        &self.obstacles
    }

    /// Obstacle sprite names, in load order
    pub fn obstacle_names(&self) -> impl Iterator<Item = &str> {
        self.obstacles.iter().map(|s| s.name.as_str())
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// A small, valid bundle: 4 cat frames of 300x200, two box sprites
    pub fn scene_assets() -> SceneAssets {
        SceneAssets::new(
            Sprite::new(1, "bg.png", 640, 360),
            Sprite::new(2, "ground", 1280, 80),
            (0..4).map(|i| Sprite::new(10 + i, "cat.gif", 300, 200)).collect(),
            vec![
                Sprite::new(20, "box.png", 16, 16),
                Sprite::new(21, "crate.png", 20, 12),
            ],
        )
        .expect("valid test assets")
    }
}
