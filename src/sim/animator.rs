//! Looping sprite-frame animation driven by elapsed time

use std::rc::Rc;
use std::time::Duration;

use crate::sprite::Sprite;

/// Cycles through a fixed frame set, one frame per `frame_delay`
#[derive(Debug, Clone)]
pub struct FrameAnimator {
    frames: Rc<[Sprite]>,
    frame_delay: Duration,
    /// Time accumulated since the last frame advance
    elapsed: Duration,
    index: usize,
}

impl FrameAnimator {
    /// `frames` must not be empty (guaranteed by `SceneAssets`).
    pub fn new(frames: Rc<[Sprite]>, frame_delay: Duration) -> Self {
        debug_assert!(!frames.is_empty(), "animator needs at least one frame");
        debug_assert!(!frame_delay.is_zero(), "frame delay must be positive");
        Self {
            frames,
            frame_delay,
            elapsed: Duration::ZERO,
            index: 0,
        }
    }

    /// Accumulate `delta` and step forward as many frames as it covers.
    /// The remainder carries over to the next call.
    pub fn advance(&mut self, delta: Duration) {
        self.elapsed += delta;
        while self.elapsed >= self.frame_delay {
            self.elapsed -= self.frame_delay;
            self.index = (self.index + 1) % self.frames.len();
        }
    }

    pub fn current_frame(&self) -> &Sprite {
        &self.frames[self.index]
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }
}
