//! Sprite batching
//!
//! Turns a recorded `DrawList` into GPU-ready vertex data. Consecutive sprites
//! sharing a texture go into one batch; painter's order is preserved by
//! emitting segments in command order.

use std::ops::Range;

use glam::Vec2;

use super::draw::{DrawCommand, DrawList};
use super::vertex::{LineVertex, SpriteVertex, colors};
use crate::sprite::SpriteId;

/// One draw call's worth of vertices
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Textured triangles from `SpriteBatch::sprite_vertices`
    Sprites { sprite: SpriteId, vertices: Range<u32> },
    /// Line list from `SpriteBatch::line_vertices`
    Lines { vertices: Range<u32> },
}

/// Text left for the host's font renderer
#[derive(Debug, Clone, PartialEq)]
pub struct TextItem {
    pub text: String,
    /// Top-left in logical pixels
    pub pos: Vec2,
}

/// Vertex buffers plus the ordered segments that draw them
#[derive(Debug, Default, Clone)]
pub struct SpriteBatch {
    pub sprite_vertices: Vec<SpriteVertex>,
    pub line_vertices: Vec<LineVertex>,
    pub segments: Vec<Segment>,
    pub texts: Vec<TextItem>,
}

impl SpriteBatch {
    /// Build vertex data for `list`, mapping logical pixels in a
    /// `viewport`-sized screen to normalized device coordinates.
    pub fn build(list: &DrawList, viewport: Vec2) -> Self {
        let mut batch = Self::default();
        for command in &list.commands {
            match command {
                DrawCommand::Sprite { sprite, pos, size, .. } => {
                    batch.push_quad(*sprite, *pos, *size, viewport);
                }
                DrawCommand::Line { from, to, color } => {
                    batch.push_line(*from, *to, *color, viewport);
                }
                DrawCommand::Text { text, pos } => batch.texts.push(TextItem {
                    text: text.clone(),
                    pos: *pos,
                }),
            }
        }
        batch
    }

    pub fn draw_calls(&self) -> usize {
        self.segments.len()
    }

    fn push_quad(&mut self, sprite: SpriteId, pos: Vec2, size: Vec2, viewport: Vec2) {
        let start = self.sprite_vertices.len() as u32;
        let tl = to_ndc(pos, viewport);
        let br = to_ndc(pos + size, viewport);
        let c = colors::WHITE;

        // Two triangles, clockwise in screen space
        self.sprite_vertices.extend_from_slice(&[
            SpriteVertex::new(tl.x, tl.y, 0.0, 0.0, c),
            SpriteVertex::new(br.x, tl.y, 1.0, 0.0, c),
            SpriteVertex::new(tl.x, br.y, 0.0, 1.0, c),
            SpriteVertex::new(tl.x, br.y, 0.0, 1.0, c),
            SpriteVertex::new(br.x, tl.y, 1.0, 0.0, c),
            SpriteVertex::new(br.x, br.y, 1.0, 1.0, c),
        ]);
        let end = self.sprite_vertices.len() as u32;

        match self.segments.last_mut() {
            Some(Segment::Sprites { sprite: last, vertices }) if *last == sprite => {
                vertices.end = end;
            }
            _ => self.segments.push(Segment::Sprites {
                sprite,
                vertices: start..end,
            }),
        }
    }

    fn push_line(&mut self, from: Vec2, to: Vec2, color: [f32; 4], viewport: Vec2) {
        let start = self.line_vertices.len() as u32;
        let a = to_ndc(from, viewport);
        let b = to_ndc(to, viewport);
        self.line_vertices.push(LineVertex::new(a.x, a.y, color));
        self.line_vertices.push(LineVertex::new(b.x, b.y, color));
        let end = self.line_vertices.len() as u32;

        match self.segments.last_mut() {
            Some(Segment::Lines { vertices }) => vertices.end = end,
            _ => self.segments.push(Segment::Lines { vertices: start..end }),
        }
    }
}

/// Logical pixels (origin top-left, y down) to NDC (origin center, y up)
#[inline]
pub fn to_ndc(p: Vec2, viewport: Vec2) -> Vec2 {
    Vec2::new(p.x / viewport.x * 2.0 - 1.0, 1.0 - p.y / viewport.y * 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::AudioChannels;
    use crate::consts::*;
    use crate::renderer::draw::Surface;
    use crate::sim::Game;
    use crate::sprite::test_support::scene_assets;
    use std::time::Duration;

    const VIEWPORT: Vec2 = Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT);

    #[test]
    fn test_ndc_corners() {
        assert_eq!(to_ndc(Vec2::ZERO, VIEWPORT), Vec2::new(-1.0, 1.0));
        assert_eq!(to_ndc(VIEWPORT, VIEWPORT), Vec2::new(1.0, -1.0));
        assert_eq!(to_ndc(VIEWPORT / 2.0, VIEWPORT), Vec2::ZERO);
    }

    #[test]
    fn test_same_sprite_merges_into_one_segment() {
        let mut list = DrawList::new();
        for x in [0.0, 100.0, 200.0] {
            list.draw(DrawCommand::Sprite {
                sprite: SpriteId(3),
                pos: Vec2::new(x, 0.0),
                scale: 1.0,
                size: Vec2::splat(10.0),
            });
        }
        let batch = SpriteBatch::build(&list, VIEWPORT);
        assert_eq!(batch.sprite_vertices.len(), 18);
        assert_eq!(
            batch.segments,
            [Segment::Sprites { sprite: SpriteId(3), vertices: 0..18 }]
        );
    }

    #[test]
    fn test_order_is_preserved_across_kinds() {
        let mut list = DrawList::new();
        let quad = |id| DrawCommand::Sprite {
            sprite: SpriteId(id),
            pos: Vec2::ZERO,
            scale: 1.0,
            size: Vec2::ONE,
        };
        let line = DrawCommand::Line {
            from: Vec2::ZERO,
            to: Vec2::ONE,
            color: colors::RAIN,
        };
        list.draw(quad(1));
        list.draw(line.clone());
        list.draw(line);
        list.draw(quad(1));
        list.draw(quad(2));

        let batch = SpriteBatch::build(&list, VIEWPORT);
        assert_eq!(
            batch.segments,
            [
                Segment::Sprites { sprite: SpriteId(1), vertices: 0..6 },
                Segment::Lines { vertices: 0..4 },
                Segment::Sprites { sprite: SpriteId(1), vertices: 6..12 },
                Segment::Sprites { sprite: SpriteId(2), vertices: 12..18 },
            ]
        );
    }

    #[test]
    fn test_full_scene_batches() {
        let game = Game::new(scene_assets(), AudioChannels::silent(), 5, Duration::ZERO);
        let mut list = DrawList::new();
        game.draw(&mut list, Duration::ZERO);
        let batch = SpriteBatch::build(&list, VIEWPORT);

        // bg, ground x2, cat, 2 obstacles
        assert_eq!(batch.sprite_vertices.len(), 6 * 6);
        assert_eq!(batch.line_vertices.len(), RAIN_DROP_COUNT * 2);
        assert_eq!(batch.texts.len(), 2);
        // All rain lands in a single line segment
        assert_eq!(
            batch
                .segments
                .iter()
                .filter(|s| matches!(s, Segment::Lines { .. }))
                .count(),
            1
        );
        // Both ground tiles share one draw call
        assert_eq!(
            batch.segments[1],
            Segment::Sprites { sprite: SpriteId(2), vertices: 6..18 }
        );
        assert!(batch.draw_calls() <= 6);
    }
}
