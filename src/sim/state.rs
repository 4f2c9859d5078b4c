//! Game state and core simulation types
//!
//! `Game` is the aggregate root: it owns every entity and the audio handles.
//! Restarting never resets fields one by one; it builds a fresh `Game` and
//! carries over the high score.

use std::time::Duration;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::animator::FrameAnimator;
use super::collision::Aabb;
use super::obstacle::{self, Obstacle};
use super::rain::{self, Raindrop};
use crate::audio::AudioChannels;
use crate::consts::*;
use crate::score_for_elapsed;
use crate::sprite::{SceneAssets, Sprite};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Running, jumping, scoring
    Playing,
    /// Hit an obstacle; scene frozen until restart
    GameOver,
}

/// Notable transitions reported by a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// The cat hit an obstacle
    GameOver { final_score: u64, new_high_score: bool },
    /// A fresh game replaced the finished one
    Restarted { high_score: u64 },
}

/// The cat's vertical motion relative to its resting baseline
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Offset from the baseline (negative = in the air)
    pub offset: f32,
    /// Vertical velocity per tick (negative = rising)
    pub velocity: f32,
    pub jumping: bool,
}

impl Player {
    /// Kick off a jump. Returns false if already airborne.
    pub fn try_jump(&mut self) -> bool {
        if self.jumping {
            return false;
        }
        self.velocity = JUMP_VELOCITY;
        self.jumping = true;
        true
    }

    /// One tick of gravity. Returns true on the tick the cat lands.
    pub fn apply_gravity(&mut self) -> bool {
        if !self.jumping {
            return false;
        }
        self.velocity += GRAVITY;
        self.offset += self.velocity;
        if self.offset >= 0.0 {
            self.offset = 0.0;
            self.velocity = 0.0;
            self.jumping = false;
            return true;
        }
        false
    }
}

/// Complete game state for one play session
#[derive(Debug)]
pub struct Game {
    /// Run seed for reproducibility
    pub(crate) seed: u64,
    pub(crate) rng: Pcg32,
    pub(crate) assets: SceneAssets,
    /// Cover scale for the background image
    pub(crate) bg_scale: f32,
    /// Where the ground strip starts
    pub(crate) ground_y: f32,
    /// Horizontal scroll of the two ground tiles, in (-SCREEN_WIDTH, 0]
    pub(crate) ground_offset: f32,
    /// Cat's resting y (top of the sprite)
    pub(crate) cat_base_y: f32,
    pub(crate) player: Player,
    pub(crate) animator: FrameAnimator,
    pub(crate) obstacles: [Obstacle; OBSTACLE_POOL_SIZE],
    pub(crate) rain: Vec<Raindrop>,
    pub(crate) phase: GamePhase,
    pub(crate) start_time: Duration,
    pub(crate) last_update: Duration,
    /// Frozen at the moment of game over, 0 before
    pub(crate) final_score: u64,
    pub(crate) high_score: u64,
    pub(crate) audio: AudioChannels,
}

impl Game {
    /// Start a new session at time `now`. Audio channels get their volumes and
    /// start looping.
    pub fn new(assets: SceneAssets, mut audio: AudioChannels, seed: u64, now: Duration) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let screen = Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT);

        let bg = assets.background().size();
        let bg_scale = (screen.x / bg.x).max(screen.y / bg.y);

        let ground_y = SCREEN_HEIGHT - assets.ground().height as f32;
        let first_frame_height = assets.cat_frames()[0].height as f32;
        let cat_base_y = ground_y - first_frame_height * CAT_SCALE;

        let obstacles = initial_obstacles(assets.obstacles(), ground_y, &mut rng);
        let rain = rain::spawn_rain(RAIN_DROP_COUNT, screen, &mut rng);
        let animator = FrameAnimator::new(assets.cat_frames().clone(), FRAME_DELAY);

        audio.start_all();
        log::info!(
            "New game (seed {}), {} obstacle sprites",
            seed,
            assets.obstacles().len()
        );

        Self {
            seed,
            rng,
            assets,
            bg_scale,
            ground_y,
            ground_offset: 0.0,
            cat_base_y,
            player: Player::default(),
            animator,
            obstacles,
            rain,
            phase: GamePhase::Playing,
            start_time: now,
            last_update: now,
            final_score: 0,
            high_score: 0,
            audio,
        }
    }

    /// Build the replacement for a finished game: same assets, same audio
    /// handles, fresh everything else, best score carried over.
    pub fn restarted(&mut self, now: Duration) -> Game {
        let high_score = self.high_score.max(self.final_score);
        let seed = self.rng.random();
        let mut next = Game::new(self.assets.clone(), self.audio.take(), seed, now);
        next.high_score = high_score;
        next
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn final_score(&self) -> u64 {
        self.final_score
    }

    pub fn high_score(&self) -> u64 {
        self.high_score
    }

    /// Score to display at `now`: live while playing, frozen after game over
    pub fn score_at(&self, now: Duration) -> u64 {
        match self.phase {
            GamePhase::Playing => score_for_elapsed(now.saturating_sub(self.start_time)),
            GamePhase::GameOver => self.final_score,
        }
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn rain(&self) -> &[Raindrop] {
        &self.rain
    }

    pub fn assets(&self) -> &SceneAssets {
        &self.assets
    }

    pub fn audio(&self) -> &AudioChannels {
        &self.audio
    }

    pub fn bg_scale(&self) -> f32 {
        self.bg_scale
    }

    pub fn ground_y(&self) -> f32 {
        self.ground_y
    }

    pub fn ground_offset(&self) -> f32 {
        self.ground_offset
    }

    pub fn current_frame(&self) -> &Sprite {
        self.animator.current_frame()
    }

    /// Top-left of the drawn cat sprite
    pub fn cat_position(&self) -> Vec2 {
        Vec2::new(CAT_X, self.cat_base_y + self.player.offset)
    }

    /// Cat hitbox for the current frame (narrower than the drawn sprite)
    pub fn player_bounds(&self) -> Aabb {
        let frame = self.animator.current_frame().size();
        let size = Vec2::new(
            frame.x * CAT_SCALE * CAT_HITBOX_WIDTH_FACTOR,
            frame.y * CAT_SCALE,
        );
        Aabb::from_pos_size(self.cat_position(), size)
    }
}

/// First obstacle at the right edge, the second a random gap behind it
fn initial_obstacles(
    sprites: &[Sprite],
    ground_y: f32,
    rng: &mut Pcg32,
) -> [Obstacle; OBSTACLE_POOL_SIZE] {
    let mut x = SCREEN_WIDTH;
    std::array::from_fn(|_| {
        let sprite = obstacle::pick_sprite(sprites, rng);
        let mut obs = Obstacle::spawn(sprite, ground_y, SCREEN_WIDTH);
        obs.pos.x = x;
        x += obstacle::random_gap(rng);
        obs
    })
}
