//! Asset boundary
//!
//! Decoding is the host's job. This module covers the rules around it: which
//! files must exist, which files count as obstacles, which audio channels can
//! be loaded, and the procedurally generated ground strip.

use std::path::{Path, PathBuf};

use rand::Rng;
use thiserror::Error;

use crate::audio::Channel;

/// Background image (excluded from obstacles)
pub const BACKGROUND_FILE: &str = "bg.png";
/// Cat run-cycle animation (excluded from obstacles)
pub const CAT_ANIMATION_FILE: &str = "cat.gif";

/// Files that must exist before a game can be built
pub const REQUIRED_FILES: [&str; 2] = [BACKGROUND_FILE, CAT_ANIMATION_FILE];

/// Image extensions accepted as obstacle sprites
const OBSTACLE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Ground strip base grey and noise amplitude
const GROUND_BASE: i32 = 76;
const GROUND_NOISE: i32 = 20;

/// Errors at the asset boundary
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("Missing required asset: {}", .0.display())]
    Missing(PathBuf),

    #[error("Failed to read asset directory {}: {source}", .path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Animation has no frames")]
    NoAnimationFrames,

    #[error("No obstacle sprites found")]
    NoObstacleSprites,
}

/// Fail on the first missing required visual asset
pub fn check_required(dir: &Path) -> Result<(), AssetError> {
    for name in REQUIRED_FILES {
        let path = dir.join(name);
        if !path.is_file() {
            return Err(AssetError::Missing(path));
        }
    }
    Ok(())
}

/// True if `file_name` should be loaded as an obstacle sprite
pub fn is_obstacle_file(file_name: &str) -> bool {
    if file_name == BACKGROUND_FILE || file_name == CAT_ANIMATION_FILE {
        return false;
    }
    Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| OBSTACLE_EXTENSIONS.contains(&ext))
}

/// All obstacle image files in `dir`, sorted by file name
pub fn discover_obstacle_files(dir: &Path) -> Result<Vec<PathBuf>, AssetError> {
    let entries = std::fs::read_dir(dir).map_err(|source| AssetError::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_ok_and(|t| t.is_file()))
        .filter(|entry| entry.file_name().to_str().is_some_and(is_obstacle_file))
        .map(|entry| entry.path())
        .collect();
    files.sort();

    if files.is_empty() {
        log::warn!("No obstacle sprites in {}", dir.display());
        return Err(AssetError::NoObstacleSprites);
    }
    log::info!("Found {} obstacle sprites in {}", files.len(), dir.display());
    Ok(files)
}

/// Audio file backing each looping channel
pub fn audio_file(channel: Channel) -> &'static str {
    match channel {
        Channel::Ambient => "bg.mp3",
        Channel::Run => "running.mp3",
        Channel::Rain => "rain.mp3",
    }
}

/// Which audio files exist. Missing audio is not an error; that channel is
/// left out and stays silent.
pub fn probe_audio(dir: &Path) -> Vec<(Channel, PathBuf)> {
    Channel::ALL
        .into_iter()
        .filter_map(|channel| {
            let path = dir.join(audio_file(channel));
            if path.is_file() {
                log::info!("Found audio asset: {}", path.display());
                Some((channel, path))
            } else {
                log::warn!("Missing audio asset {} - {} channel silent", path.display(), channel.as_str());
                None
            }
        })
        .collect()
}

/// Procedurally generated ground strip (RGBA8, row-major)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroundTexture {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl GroundTexture {
    /// RGBA of one pixel
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = ((y * self.width + x) * 4) as usize;
        [self.pixels[i], self.pixels[i + 1], self.pixels[i + 2], self.pixels[i + 3]]
    }
}

/// Dark grey gravel: base grey with independent per-channel noise
pub fn generate_ground_texture(width: u32, height: u32, rng: &mut impl Rng) -> GroundTexture {
    let mut pixels = Vec::with_capacity((width * height * 4) as usize);
    for _ in 0..width * height {
        for _ in 0..3 {
            let v = GROUND_BASE + rng.random_range(-GROUND_NOISE..=GROUND_NOISE);
            pixels.push(v.clamp(0, 255) as u8);
        }
        pixels.push(255);
    }
    GroundTexture {
        width,
        height,
        pixels,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use std::fs;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"").unwrap();
    }

    #[test]
    fn test_obstacle_file_filter() {
        assert!(is_obstacle_file("box.png"));
        assert!(is_obstacle_file("rock.jpg"));
        assert!(is_obstacle_file("crate.jpeg"));
        assert!(!is_obstacle_file("bg.png"));
        assert!(!is_obstacle_file("cat.gif"));
        assert!(!is_obstacle_file("other.gif"));
        assert!(!is_obstacle_file("bg.mp3"));
        assert!(!is_obstacle_file("README"));
    }

    #[test]
    fn test_discover_skips_excluded_and_dirs() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["bg.png", "cat.gif", "box.png", "a_rock.jpg", "bg.mp3"] {
            touch(dir.path(), name);
        }
        fs::create_dir(dir.path().join("nested.png")).unwrap();

        let files = discover_obstacle_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, ["a_rock.jpg", "box.png"]);
    }

    #[test]
    fn test_discover_empty_is_error() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "bg.png");
        assert!(matches!(
            discover_obstacle_files(dir.path()),
            Err(AssetError::NoObstacleSprites)
        ));
    }

    #[test]
    fn test_discover_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let err = discover_obstacle_files(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, AssetError::ReadDir { .. }));
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn test_check_required() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "bg.png");
        let err = check_required(dir.path()).unwrap_err();
        assert!(matches!(err, AssetError::Missing(ref p) if p.ends_with("cat.gif")));

        touch(dir.path(), "cat.gif");
        assert!(check_required(dir.path()).is_ok());
    }

    #[test]
    fn test_probe_audio_reports_present_only() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "bg.mp3");
        touch(dir.path(), "rain.mp3");
        let found: Vec<Channel> = probe_audio(dir.path()).into_iter().map(|(c, _)| c).collect();
        assert_eq!(found, [Channel::Ambient, Channel::Rain]);
    }

    #[test]
    fn test_ground_texture_noise_bounds() {
        let mut rng = Pcg32::seed_from_u64(11);
        let tex = generate_ground_texture(64, 8, &mut rng);
        assert_eq!(tex.pixels.len(), 64 * 8 * 4);
        for y in 0..8 {
            for x in 0..64 {
                let [r, g, b, a] = tex.pixel(x, y);
                for c in [r, g, b] {
                    assert!((56..=96).contains(&c), "channel {c} out of range");
                }
                assert_eq!(a, 255);
            }
        }
    }

    #[test]
    fn test_ground_texture_is_seeded() {
        let a = generate_ground_texture(16, 4, &mut Pcg32::seed_from_u64(1));
        let b = generate_ground_texture(16, 4, &mut Pcg32::seed_from_u64(1));
        assert_eq!(a, b);
    }
}
