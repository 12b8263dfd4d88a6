//! Audio-reactive scene: a fixed population of spheres and cones that swell
//! with the music, fade in and out together, and a helix that flashes up on
//! heavy bass.

pub mod color;
pub mod fade;
pub mod helix;
pub mod shape;
#[cfg(test)]
pub mod testing;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::audio::{AudioFeed, Band};
use crate::render::canvas::Canvas;
use color::Rgb;
use fade::FadeState;
use helix::HelixOverlay;
use shape::{Shape, ShapeInputs};

#[derive(Clone, Debug)]
pub struct SceneConfig {
    pub width: f32,
    pub height: f32,
    pub shape_count: usize,
    /// Seconds for one fade in (or out)
    pub fade_in_time: f32,
    /// Seconds the helix stays up after a trigger
    pub helix_duration: f32,
    /// Bass energy (0-255) above which the helix triggers
    pub bass_threshold: f32,
    /// Background recolors when `frame_count` is a multiple of this
    pub background_interval_frames: u64,
    pub seed: Option<u64>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            width: 500.0,
            height: 500.0,
            shape_count: 20,
            fade_in_time: 5.0,
            helix_duration: 5.0,
            bass_threshold: 150.0,
            background_interval_frames: 600,
            seed: None,
        }
    }
}

/// Timing for one tick.
#[derive(Clone, Copy, Debug)]
pub struct FrameClock {
    /// 1-based count of the frame being drawn
    pub frame_count: u64,
    /// Seconds since the previous frame
    pub delta: f32,
    /// Seconds since the start of playback
    pub elapsed: f32,
}

impl FrameClock {
    /// Clock for the zero-based `frame_index` of a fixed-rate render.
    pub fn at_frame(frame_index: usize, fps: u32) -> Self {
        let fps = fps.max(1) as f32;
        Self {
            frame_count: frame_index as u64 + 1,
            delta: 1.0 / fps,
            elapsed: frame_index as f32 / fps,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub background_changed: bool,
    pub helix_triggered: bool,
    pub helix_drawn: bool,
}

pub struct SceneState {
    pub config: SceneConfig,
    pub shapes: Vec<Shape>,
    pub background: Rgb,
    pub fade: FadeState,
    pub helix: HelixOverlay,
    pub seed: u64,
    rng: ChaCha8Rng,
}

impl SceneState {
    pub fn new(config: SceneConfig) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let fade = FadeState::new(config.fade_in_time);
        let background = Rgb::random(&mut rng);
        let shapes = (0..config.shape_count)
            .map(|_| Shape::random(config.width, config.height, fade.alpha_rate(), &mut rng))
            .collect();

        Self {
            helix: HelixOverlay::new(config.helix_duration),
            config,
            shapes,
            background,
            fade,
            seed,
            rng,
        }
    }

    /// Advance the scene by one frame and draw it onto `canvas`.
    pub fn tick(
        &mut self,
        clock: FrameClock,
        audio: &impl AudioFeed,
        canvas: &mut impl Canvas,
    ) -> TickReport {
        let mut report = TickReport::default();

        let interval = self.config.background_interval_frames;
        if interval > 0 && clock.frame_count % interval == 0 {
            self.background = Rgb::random(&mut self.rng);
            report.background_changed = true;
            log::debug!("Frame {}: background -> {:?}", clock.frame_count, self.background);
        }
        canvas.background(self.background);

        // One bass reading per frame feeds both the cones and the helix trigger
        let inputs = ShapeInputs {
            level: audio.level(),
            spectrum: audio.spectrum(),
            bass: audio.energy(Band::Bass),
            width: self.config.width,
        };
        log::trace!(
            "Frame {}: level={:.3} bass={:.1}",
            clock.frame_count,
            inputs.level,
            inputs.bass
        );

        for shape in &mut self.shapes {
            shape.update(&inputs, &self.fade, clock.delta);
            shape.draw(canvas, self.config.width, self.config.height);
        }

        if self.fade.advance(clock.delta) {
            log::debug!(
                "Frame {}: fading {}",
                clock.frame_count,
                if self.fade.fading_in { "in" } else { "out" }
            );
        }

        if inputs.bass > self.config.bass_threshold {
            self.helix.trigger(clock.elapsed, &mut self.rng);
            report.helix_triggered = true;
        }
        if self.helix.refresh(clock.elapsed) {
            self.helix.draw(canvas);
            report.helix_drawn = true;
        }

        report
    }
}

/// Linear map of `value` from `[in_min, in_max]` onto `[out_min, out_max]`,
/// without clamping. A zero-width input range maps everything to `out_min`.
pub fn remap(value: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    let span = in_max - in_min;
    if span == 0.0 {
        return out_min;
    }
    out_min + (value - in_min) / span * (out_max - out_min)
}
