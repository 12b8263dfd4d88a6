use rayon::prelude::*;
use rustfft::{num_complex::Complex, FftPlanner};

use super::decode::AudioData;
use super::features::{AnalysisSummary, AudioFeed, AudioFrame, Band};

#[derive(Clone, Copy, Debug)]
pub struct AnalysisSettings {
    /// FFT window length in samples; the spectrum has half as many bins
    pub fft_size: usize,
    /// Time constant for cross-frame magnitude smoothing (0.0-1.0)
    pub smoothing: f32,
    pub min_db: f32,
    pub max_db: f32,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            fft_size: 2048,
            smoothing: 0.8,
            min_db: -100.0,
            max_db: -30.0,
        }
    }
}

struct RawFrame {
    magnitudes: Vec<f32>,
    level: f32,
}

pub fn analyze(
    audio: &AudioData,
    fps: u32,
    settings: &AnalysisSettings,
) -> (AnalysisSummary, Vec<AudioFrame>) {
    let duration = audio.duration();
    let total_frames = (duration * fps as f32).ceil() as usize;

    log::info!("Pass 1: Per-frame FFT ({} frames, window {})...", total_frames, settings.fft_size);
    let raw = pass1_per_frame(&audio.samples, audio.sample_rate, fps, total_frames, settings.fft_size);

    log::info!("Pass 2: Smoothing & byte scaling (smoothing={:.2})...", settings.smoothing);
    let frames = pass2_smooth(&raw, audio.sample_rate, fps, settings);

    let peak_level = frames.iter().map(|f| f.level).fold(0.0f32, f32::max);
    let band_means = Band::ALL.map(|band| {
        let total: f32 = frames.iter().map(|f| f.energy(band)).sum();
        total / frames.len().max(1) as f32
    });
    log::info!("Analysis: {} frames, peak level={:.4}", frames.len(), peak_level);

    let summary = AnalysisSummary {
        sample_rate: audio.sample_rate,
        duration,
        peak_level,
        band_means,
    };

    (summary, frames)
}

/// Windowed magnitudes and RMS level for the window ending at each frame's play position.
fn pass1_per_frame(
    samples: &[f32],
    sample_rate: u32,
    fps: u32,
    total_frames: usize,
    fft_size: usize,
) -> Vec<RawFrame> {
    let samples_per_frame = sample_rate as f64 / fps as f64;
    let window = blackman_window(fft_size);
    let half = fft_size / 2;

    (0..total_frames)
        .into_par_iter()
        .map_init(
            || FftPlanner::<f32>::new().plan_fft_forward(fft_size),
            |fft, frame_idx| {
                let end = ((frame_idx as f64 * samples_per_frame) as usize).min(samples.len());
                let block = window_block(samples, end, fft_size);

                let level = (block.iter().map(|s| s * s).sum::<f32>() / fft_size as f32).sqrt();

                let mut buffer: Vec<Complex<f32>> = block
                    .iter()
                    .zip(window.iter())
                    .map(|(&s, &w)| Complex::new(s * w, 0.0))
                    .collect();
                fft.process(&mut buffer);

                let magnitudes = buffer[..half]
                    .iter()
                    .map(|c| c.norm() / fft_size as f32)
                    .collect();

                RawFrame { magnitudes, level }
            },
        )
        .collect()
}

/// The `size` samples ending at `end`, zero-padded before the start of the track.
fn window_block(samples: &[f32], end: usize, size: usize) -> Vec<f32> {
    let start = end.saturating_sub(size);
    let available = &samples[start..end];
    let mut block = vec![0.0f32; size - available.len()];
    block.extend_from_slice(available);
    block
}

fn pass2_smooth(
    raw: &[RawFrame],
    sample_rate: u32,
    fps: u32,
    settings: &AnalysisSettings,
) -> Vec<AudioFrame> {
    let tau = settings.smoothing.clamp(0.0, 1.0);
    let mut smoothed: Vec<f32> = raw
        .first()
        .map(|f| vec![0.0; f.magnitudes.len()])
        .unwrap_or_default();

    raw.iter()
        .enumerate()
        .map(|(i, frame)| {
            for (s, &m) in smoothed.iter_mut().zip(frame.magnitudes.iter()) {
                *s = tau * *s + (1.0 - tau) * m;
            }

            AudioFrame {
                time: i as f32 / fps as f32,
                level: frame.level,
                spectrum: smoothed
                    .iter()
                    .map(|&m| magnitude_to_byte(m, settings.min_db, settings.max_db))
                    .collect(),
                sample_rate,
            }
        })
        .collect()
}

/// Map a linear magnitude onto 0-255 across the `[min_db, max_db]` decibel range.
fn magnitude_to_byte(magnitude: f32, min_db: f32, max_db: f32) -> u8 {
    if magnitude <= 0.0 || max_db <= min_db {
        return 0;
    }
    let db = 20.0 * magnitude.log10();
    let scaled = 255.0 * (db - min_db) / (max_db - min_db);
    scaled.clamp(0.0, 255.0) as u8
}

fn blackman_window(size: usize) -> Vec<f32> {
    let denom = size.max(2) as f32;
    (0..size)
        .map(|i| {
            let x = 2.0 * std::f32::consts::PI * i as f32 / denom;
            0.42 - 0.5 * x.cos() + 0.08 * (2.0 * x).cos()
        })
        .collect()
}
