use clap::Parser;
use std::path::PathBuf;

use crate::audio::analysis::AnalysisSettings;
use crate::config::{self, Config};
use crate::scene::SceneConfig;

#[derive(Parser, Debug)]
#[command(name = "prismwave", about = "Audio-reactive 3D shape visualizer video generator")]
pub struct Cli {
    /// Input audio file (WAV, MP3, FLAC, OGG)
    pub input: PathBuf,

    /// Output video file
    #[arg(short, long, default_value = "output.mp4")]
    pub output: PathBuf,

    /// Config file (defaults to ./prismwave.toml or the user config dir)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Canvas width in pixels
    #[arg(long, default_value_t = config::DEFAULT_WIDTH)]
    pub width: u32,

    /// Canvas height in pixels
    #[arg(long, default_value_t = config::DEFAULT_HEIGHT)]
    pub height: u32,

    /// Frames per second
    #[arg(long, default_value_t = config::DEFAULT_FPS)]
    pub fps: u32,

    /// Stop after this many seconds of audio
    #[arg(long)]
    pub max_duration: Option<f32>,

    /// Number of shapes in the scene
    #[arg(long, default_value_t = config::DEFAULT_SHAPES)]
    pub shapes: usize,

    /// Seed for shape placement and colors (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Seconds for the shapes to fade fully in or out
    #[arg(long, default_value_t = config::DEFAULT_FADE_TIME)]
    pub fade_time: f32,

    /// Seconds the helix stays visible after a bass hit
    #[arg(long, default_value_t = config::DEFAULT_HELIX_DURATION)]
    pub helix_duration: f32,

    /// Bass energy (0-255) that triggers the helix
    #[arg(long, default_value_t = config::DEFAULT_BASS_THRESHOLD)]
    pub bass_threshold: f32,

    /// Seconds between background color changes
    #[arg(long, default_value_t = config::DEFAULT_BACKGROUND_INTERVAL)]
    pub background_interval: f32,

    /// Spectrum smoothing across frames (0.0-1.0)
    #[arg(long, default_value_t = config::DEFAULT_SMOOTHING)]
    pub smoothing: f32,

    /// H.264 CRF quality (0-51, lower = better). Ignored when --bitrate is set.
    #[arg(long, default_value_t = config::DEFAULT_CRF)]
    pub crf: u32,

    /// Video bitrate (e.g. 2400k, 5M). When set, uses -b:v instead of -crf.
    #[arg(short, long)]
    pub bitrate: Option<String>,

    /// FFmpeg video codec
    #[arg(long, default_value = config::DEFAULT_CODEC)]
    pub codec: String,

    /// FFmpeg pixel format
    #[arg(long, default_value = "yuv420p")]
    pub pix_fmt: String,
}

impl Cli {
    /// Apply file values wherever the command line was left at its default.
    pub fn merge_config(&mut self, cfg: Config) {
        if self.width == config::DEFAULT_WIDTH { self.width = cfg.output.width; }
        if self.height == config::DEFAULT_HEIGHT { self.height = cfg.output.height; }
        if self.fps == config::DEFAULT_FPS { self.fps = cfg.output.fps; }
        if self.crf == config::DEFAULT_CRF { self.crf = cfg.output.crf; }
        if self.codec == config::DEFAULT_CODEC { self.codec = cfg.output.codec; }
        if self.smoothing == config::DEFAULT_SMOOTHING { self.smoothing = cfg.audio.smoothing; }
        if self.shapes == config::DEFAULT_SHAPES { self.shapes = cfg.scene.shapes; }
        if self.seed.is_none() { self.seed = cfg.scene.seed; }
        if self.fade_time == config::DEFAULT_FADE_TIME { self.fade_time = cfg.scene.fade_time; }
        if self.helix_duration == config::DEFAULT_HELIX_DURATION {
            self.helix_duration = cfg.scene.helix_duration;
        }
        if self.bass_threshold == config::DEFAULT_BASS_THRESHOLD {
            self.bass_threshold = cfg.scene.bass_threshold;
        }
        if self.background_interval == config::DEFAULT_BACKGROUND_INTERVAL {
            self.background_interval = cfg.scene.background_interval;
        }
    }

    pub fn scene_config(&self) -> SceneConfig {
        SceneConfig {
            width: self.width as f32,
            height: self.height as f32,
            shape_count: self.shapes,
            fade_in_time: self.fade_time,
            helix_duration: self.helix_duration,
            bass_threshold: self.bass_threshold,
            background_interval_frames: (self.fps as f32 * self.background_interval).round() as u64,
            seed: self.seed,
        }
    }

    pub fn analysis_settings(&self) -> AnalysisSettings {
        AnalysisSettings {
            smoothing: self.smoothing,
            ..Default::default()
        }
    }
}
