//! Jumpy Cat entry point
//!
//! Runs the simulation headless: synthetic sprite sizes, logging audio
//! channels and an autopilot on the jump key. Usage: `jumpy-cat [ticks]`.

use std::error::Error;
use std::time::Duration;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use jumpy_cat::assets::{self, AssetError};
use jumpy_cat::audio::{AudioChannel, AudioChannels, Channel};
use jumpy_cat::consts::*;
use jumpy_cat::platform::{Clock, Key, KeyboardState, ManualClock};
use jumpy_cat::renderer::{DrawList, SpriteBatch};
use jumpy_cat::sim::{Game, GameEvent, tick};
use jumpy_cat::{SceneAssets, Settings, Sprite};

/// 60 Hz frame step for the headless clock
const FRAME: Duration = Duration::from_micros(16_667);
const DEFAULT_TICKS: u64 = 3_600;

/// Audio stand-in that only tracks and logs its state
struct LoggingChannel {
    channel: Channel,
    playing: bool,
}

impl AudioChannel for LoggingChannel {
    fn play(&mut self) {
        self.playing = true;
        log::debug!("audio {}: play", self.channel.as_str());
    }

    fn pause(&mut self) {
        self.playing = false;
        log::debug!("audio {}: pause", self.channel.as_str());
    }

    fn is_playing(&self) -> bool {
        self.playing
    }

    fn set_volume(&mut self, volume: f32) {
        log::debug!("audio {}: volume {:.2}", self.channel.as_str(), volume);
    }
}

fn main() {
    env_logger::init();
    log::info!("Jumpy Cat (headless) starting...");

    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let ticks = match std::env::args().nth(1) {
        Some(arg) => arg.parse::<u64>()?,
        None => DEFAULT_TICKS,
    };
    let settings = Settings::load();
    let seed = settings.seed.unwrap_or_else(rand::random);
    let scene = load_scene(&settings, seed)?;
    let audio = load_audio(&settings);

    let clock = ManualClock::new(Duration::ZERO);
    let mut game = Game::new(scene, audio, seed, clock.now());
    let mut keyboard = KeyboardState::new();
    let mut frame = DrawList::new();
    let mut runs = 0u32;

    for _ in 0..ticks {
        clock.advance(FRAME);
        autopilot(&game, &mut keyboard);

        match tick(&mut game, &keyboard.tick_input(), clock.now()) {
            Some(GameEvent::GameOver { final_score, new_high_score }) => {
                runs += 1;
                log::info!(
                    "Run {} ended at {}{}",
                    runs,
                    final_score,
                    if new_high_score { " - new best!" } else { "" }
                );
            }
            Some(GameEvent::Restarted { .. }) => keyboard.release_all(),
            None => {}
        }

        frame.clear();
        game.draw(&mut frame, clock.now());
    }

    let batch = SpriteBatch::build(&frame, Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT));
    log::info!(
        "Last frame: {} commands, {} draw calls, {} sprite vertices",
        frame.len(),
        batch.draw_calls(),
        batch.sprite_vertices.len()
    );
    println!(
        "{} ticks, {} finished runs, high score {}",
        ticks,
        runs,
        game.high_score()
    );
    Ok(())
}

/// Jump when an obstacle is just ahead; restart as soon as the run ends
fn autopilot(game: &Game, keyboard: &mut KeyboardState) {
    if game.is_game_over() {
        keyboard.key_down(Key::R);
        return;
    }
    let cat = game.player_bounds();
    let incoming = game
        .obstacles()
        .iter()
        .any(|o| (40.0..160.0).contains(&(o.pos.x - cat.right())));
    if incoming {
        keyboard.key_down(Key::Space);
    } else {
        keyboard.key_up(Key::Space);
    }
}

/// Headless sprites: real obstacle names when an asset folder exists,
/// fixed sizes since nothing is decoded here
fn load_scene(settings: &Settings, seed: u64) -> Result<SceneAssets, AssetError> {
    let dir = &settings.asset_dir;
    let mut next_id = 0u32;
    let mut sprite = |name: &str, w: u32, h: u32| {
        next_id += 1;
        Sprite::new(next_id, name, w, h)
    };

    let texture = assets::generate_ground_texture(
        SCREEN_WIDTH as u32,
        GROUND_TEXTURE_HEIGHT,
        &mut Pcg32::seed_from_u64(seed),
    );
    log::debug!("Generated {}x{} ground strip", texture.width, texture.height);

    let background = sprite(assets::BACKGROUND_FILE, 1280, 720);
    let ground = sprite("ground", texture.width, texture.height);
    let frames: Vec<Sprite> = (0..6)
        .map(|_| sprite(assets::CAT_ANIMATION_FILE, 320, 240))
        .collect();

    let obstacles: Vec<Sprite> = if dir.is_dir() {
        assets::check_required(dir)?;
        assets::discover_obstacle_files(dir)?
            .iter()
            .filter_map(|p| p.file_name().and_then(|n| n.to_str()))
            .map(|name| sprite(name, 16, 16))
            .collect()
    } else {
        log::warn!(
            "No asset directory at {}, using placeholder sprites",
            dir.display()
        );
        vec![sprite("box.png", 16, 16), sprite("crate.png", 20, 14)]
    };

    SceneAssets::new(background, ground, frames, obstacles)
}

fn load_audio(settings: &Settings) -> AudioChannels {
    let found = if settings.asset_dir.is_dir() {
        assets::probe_audio(&settings.asset_dir)
    } else {
        Vec::new()
    };
    found
        .into_iter()
        .fold(AudioChannels::new(settings.effective_volumes()), |channels, (channel, _)| {
            channels.with(
                channel,
                Box::new(LoggingChannel {
                    channel,
                    playing: false,
                }),
            )
        })
}
