use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_WIDTH: u32 = 500;
pub const DEFAULT_HEIGHT: u32 = 500;
pub const DEFAULT_FPS: u32 = 60;
pub const DEFAULT_CRF: u32 = 18;
pub const DEFAULT_CODEC: &str = "libx264";
pub const DEFAULT_SMOOTHING: f32 = 0.8;
pub const DEFAULT_SHAPES: usize = 20;
pub const DEFAULT_FADE_TIME: f32 = 5.0;
pub const DEFAULT_HELIX_DURATION: f32 = 5.0;
pub const DEFAULT_BASS_THRESHOLD: f32 = 150.0;
pub const DEFAULT_BACKGROUND_INTERVAL: f32 = 10.0;

const CONFIG_FILE: &str = "prismwave.toml";

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub audio: AudioConfig,
    #[serde(default)]
    pub scene: SceneSection,
}

#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default = "default_fps")]
    pub fps: u32,
    #[serde(default = "default_crf")]
    pub crf: u32,
    #[serde(default = "default_codec")]
    pub codec: String,
}

#[derive(Debug, Deserialize)]
pub struct AudioConfig {
    #[serde(default = "default_smoothing")]
    pub smoothing: f32,
}

#[derive(Debug, Deserialize)]
pub struct SceneSection {
    #[serde(default = "default_shapes")]
    pub shapes: usize,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_fade_time")]
    pub fade_time: f32,
    #[serde(default = "default_helix_duration")]
    pub helix_duration: f32,
    #[serde(default = "default_bass_threshold")]
    pub bass_threshold: f32,
    /// Seconds between background recolors
    #[serde(default = "default_background_interval")]
    pub background_interval: f32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            fps: default_fps(),
            crf: default_crf(),
            codec: default_codec(),
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            smoothing: default_smoothing(),
        }
    }
}

impl Default for SceneSection {
    fn default() -> Self {
        Self {
            shapes: default_shapes(),
            seed: None,
            fade_time: default_fade_time(),
            helix_duration: default_helix_duration(),
            bass_threshold: default_bass_threshold(),
            background_interval: default_background_interval(),
        }
    }
}

fn default_width() -> u32 { DEFAULT_WIDTH }
fn default_height() -> u32 { DEFAULT_HEIGHT }
fn default_fps() -> u32 { DEFAULT_FPS }
fn default_crf() -> u32 { DEFAULT_CRF }
fn default_codec() -> String { DEFAULT_CODEC.into() }
fn default_smoothing() -> f32 { DEFAULT_SMOOTHING }
fn default_shapes() -> usize { DEFAULT_SHAPES }
fn default_fade_time() -> f32 { DEFAULT_FADE_TIME }
fn default_helix_duration() -> f32 { DEFAULT_HELIX_DURATION }
fn default_bass_threshold() -> f32 { DEFAULT_BASS_THRESHOLD }
fn default_background_interval() -> f32 { DEFAULT_BACKGROUND_INTERVAL }

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    parse_config(&content).with_context(|| format!("Failed to parse config: {}", path.display()))
}

fn parse_config(content: &str) -> Result<Config> {
    Ok(toml::from_str(content)?)
}

/// Explicit path, else `./prismwave.toml`, else the per-user config file.
pub fn find_config(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    let local = PathBuf::from(CONFIG_FILE);
    if local.exists() {
        return Some(local);
    }
    if let Some(home) = dirs::home_dir() {
        let xdg = home.join(".config").join("prismwave").join("config.toml");
        if xdg.exists() {
            return Some(xdg);
        }
    }
    if let Some(config_dir) = dirs::config_dir() {
        let platform = config_dir.join("prismwave").join("config.toml");
        if platform.exists() {
            return Some(platform);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let cfg = parse_config("").unwrap();
        assert_eq!(cfg.output.width, 500);
        assert_eq!(cfg.output.fps, 60);
        assert_eq!(cfg.scene.shapes, 20);
        assert_eq!(cfg.scene.bass_threshold, 150.0);
        assert!(cfg.scene.seed.is_none());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg = parse_config(
            r#"
            [output]
            fps = 30

            [scene]
            seed = 99
            helix_duration = 2.5
            "#,
        )
        .unwrap();
        assert_eq!(cfg.output.fps, 30);
        assert_eq!(cfg.output.codec, "libx264");
        assert_eq!(cfg.scene.seed, Some(99));
        assert_eq!(cfg.scene.helix_duration, 2.5);
        assert_eq!(cfg.scene.fade_time, 5.0);
        assert_eq!(cfg.audio.smoothing, 0.8);
    }

    #[test]
    fn malformed_file_is_an_error() {
        assert!(parse_config("[scene]\nshapes = \"many\"").is_err());
    }

    #[test]
    fn explicit_path_wins() {
        let path = Path::new("/tmp/custom.toml");
        assert_eq!(find_config(Some(path)), Some(path.to_path_buf()));
    }
}
