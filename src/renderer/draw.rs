//! Scene drawing
//!
//! `Game::draw` is read-only: it walks the current state and issues draw
//! commands to whatever `Surface` the host provides. `DrawList` is the
//! recording surface used for batching and tests.

use std::time::Duration;

use glam::Vec2;

use super::vertex::colors;
use crate::consts::*;
use crate::sim::Game;
use crate::sprite::{Sprite, SpriteId};

pub const GAME_OVER_TEXT: &str = "GAME OVER! Press R to restart";

/// A single positioned draw instruction in logical screen space
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Sprite with its top-left corner at `pos`, drawn at `size` pixels
    Sprite {
        sprite: SpriteId,
        pos: Vec2,
        scale: f32,
        size: Vec2,
    },
    /// Straight line segment
    Line { from: Vec2, to: Vec2, color: [f32; 4] },
    /// Debug-style text anchored at its top-left
    Text { text: String, pos: Vec2 },
}

impl DrawCommand {
    pub fn sprite(sprite: &Sprite, pos: Vec2, scale: f32) -> Self {
        DrawCommand::Sprite {
            sprite: sprite.id,
            pos,
            scale,
            size: sprite.size() * scale,
        }
    }
}

/// Render target for draw commands
pub trait Surface {
    fn draw(&mut self, command: DrawCommand);
}

/// Surface that records commands in order
#[derive(Debug, Default, Clone)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// All text overlays, in draw order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Surface for DrawList {
    fn draw(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }
}

/// Logical viewport size, whatever the real window is
pub fn layout(_outside_width: u32, _outside_height: u32) -> (u32, u32) {
    (SCREEN_WIDTH as u32, SCREEN_HEIGHT as u32)
}

impl Game {
    /// Issue every draw command for the frame. `now` drives the live score.
    pub fn draw(&self, surface: &mut impl Surface, now: Duration) {
        let assets = self.assets();

        surface.draw(DrawCommand::sprite(assets.background(), Vec2::ZERO, self.bg_scale()));

        // Two ground tiles side by side give a seamless scroll
        let ground = assets.ground();
        let ground_y = self.ground_y();
        let offset = self.ground_offset();
        surface.draw(DrawCommand::sprite(ground, Vec2::new(offset, ground_y), 1.0));
        surface.draw(DrawCommand::sprite(
            ground,
            Vec2::new(offset + SCREEN_WIDTH, ground_y),
            1.0,
        ));

        surface.draw(DrawCommand::sprite(
            self.current_frame(),
            self.cat_position(),
            CAT_SCALE,
        ));

        for obs in self.obstacles() {
            surface.draw(DrawCommand::Sprite {
                sprite: obs.sprite,
                pos: obs.pos,
                scale: obs.scale,
                size: obs.size(),
            });
        }

        for drop in self.rain() {
            surface.draw(DrawCommand::Line {
                from: drop.pos,
                to: drop.tail(),
                color: colors::RAIN,
            });
        }

        if self.is_game_over() {
            surface.draw(DrawCommand::Text {
                text: GAME_OVER_TEXT.to_string(),
                pos: Vec2::new(SCREEN_WIDTH / 2.0 - 150.0, SCREEN_HEIGHT / 2.0),
            });
        }

        surface.draw(DrawCommand::Text {
            text: format!("Score: {}", self.score_at(now)),
            pos: Vec2::new(SCREEN_WIDTH - 100.0, 10.0),
        });
        surface.draw(DrawCommand::Text {
            text: format!("High Score: {}", self.high_score()),
            pos: Vec2::new(SCREEN_WIDTH - 100.0, 25.0),
        });
    }
}
