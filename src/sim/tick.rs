//! Per-frame simulation step
//!
//! The host calls `tick` once per display refresh with the current time and
//! the level-polled input. Continuous motion (rain, animation) uses the
//! wall-clock delta; scrolling and jump physics advance a fixed amount per tick.

use std::time::Duration;

use glam::Vec2;

use super::obstacle;
use super::state::{Game, GameEvent, GamePhase};
use crate::audio::Channel;
use crate::consts::*;
use crate::score_for_elapsed;

/// Input state for a single tick (keys currently held)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Jump (Space)
    pub jump: bool,
    /// Restart after game over (R)
    pub restart: bool,
}

/// Advance the game to time `now`.
///
/// While game over only the restart input is looked at; on restart `game` is
/// replaced by a freshly built instance.
pub fn tick(game: &mut Game, input: &TickInput, now: Duration) -> Option<GameEvent> {
    if game.phase == GamePhase::GameOver {
        if input.restart {
            let next = game.restarted(now);
            *game = next;
            log::info!("Restarted (high score {})", game.high_score);
            return Some(GameEvent::Restarted {
                high_score: game.high_score,
            });
        }
        return None;
    }

    let delta = now.saturating_sub(game.last_update);
    game.last_update = now;

    scroll_ground(game);

    if input.jump && game.player.try_jump() {
        game.audio.pause_if_playing(Channel::Run);
    }
    if game.player.apply_gravity() {
        game.audio.resume_if_paused(Channel::Run);
    }

    obstacle::scroll_pool(
        &mut game.obstacles,
        game.assets.obstacles(),
        OBSTACLE_SPEED,
        game.ground_y,
        SCREEN_WIDTH,
        &mut game.rng,
    );

    game.animator.advance(delta);

    let dt = delta.as_secs_f32();
    let screen = Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT);
    for drop in &mut game.rain {
        drop.fall(dt, screen, &mut game.rng);
    }

    let cat = game.player_bounds();
    if game.obstacles.iter().any(|o| cat.overlaps(&o.bounds())) {
        return Some(enter_game_over(game, now));
    }

    None
}

/// Two ground tiles scroll left and wrap after a full screen width
fn scroll_ground(game: &mut Game) {
    game.ground_offset -= GROUND_SPEED;
    if game.ground_offset < -SCREEN_WIDTH {
        game.ground_offset += SCREEN_WIDTH;
    }
}

fn enter_game_over(game: &mut Game, now: Duration) -> GameEvent {
    game.phase = GamePhase::GameOver;
    game.audio.pause_if_playing(Channel::Run);
    game.audio.pause_if_playing(Channel::Rain);

    game.final_score = score_for_elapsed(now.saturating_sub(game.start_time));
    let new_high_score = game.final_score > game.high_score;
    if new_high_score {
        game.high_score = game.final_score;
    }
    log::info!(
        "Game over: score {}{}",
        game.final_score,
        if new_high_score { " (new high score)" } else { "" }
    );

    GameEvent::GameOver {
        final_score: game.final_score,
        new_high_score,
    }
}
