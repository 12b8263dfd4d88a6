//! Error types for start-up failures.

use std::path::PathBuf;
use thiserror::Error;

/// Reasons the music track cannot be used. Every variant is fatal: without
/// audio there is nothing to drive the scene.
#[derive(Error, Debug)]
pub enum AudioLoadError {
    #[error("Audio file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to open audio file {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported or corrupt audio format: {0}")]
    Format(#[from] symphonia::core::errors::Error),

    #[error("No audio tracks found")]
    NoTrack,

    #[error("Unknown sample rate")]
    UnknownSampleRate,

    #[error("Audio track contains no samples")]
    Empty,
}
