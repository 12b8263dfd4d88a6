//! Deterministic stand-ins for the audio feed and the drawing surface.

use glam::Vec3;

use super::color::Rgb;
use crate::audio::{AudioFeed, Band};
use crate::render::canvas::Canvas;

pub struct ScriptedAudio {
    pub level: f32,
    pub spectrum: Vec<u8>,
    pub bass: f32,
}

impl ScriptedAudio {
    pub fn silent() -> Self {
        Self::with_bass(0.0)
    }

    pub fn with_bass(bass: f32) -> Self {
        Self {
            level: 0.0,
            spectrum: vec![0; 1024],
            bass,
        }
    }
}

impl AudioFeed for ScriptedAudio {
    fn level(&self) -> f32 {
        self.level
    }

    fn spectrum(&self) -> &[u8] {
        &self.spectrum
    }

    fn energy(&self, band: Band) -> f32 {
        match band {
            Band::Bass => self.bass,
            _ => 0.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCall {
    Background(Rgb),
    Push,
    Pop,
    Translate(Vec3),
    RotateX(f32),
    RotateY(f32),
    RotateZ(f32),
    Material(Rgb, f32),
    Sphere(f32),
    Cone(f32, f32),
    Stroke(Rgb),
    Polyline(Vec<Vec3>),
}

#[derive(Default)]
pub struct RecordingCanvas {
    pub calls: Vec<DrawCall>,
}

impl RecordingCanvas {
    pub fn count(&self, pred: impl Fn(&DrawCall) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }
}

impl Canvas for RecordingCanvas {
    fn background(&mut self, color: Rgb) {
        self.calls.push(DrawCall::Background(color));
    }

    fn push(&mut self) {
        self.calls.push(DrawCall::Push);
    }

    fn pop(&mut self) {
        self.calls.push(DrawCall::Pop);
    }

    fn translate(&mut self, offset: Vec3) {
        self.calls.push(DrawCall::Translate(offset));
    }

    fn rotate_x(&mut self, angle: f32) {
        self.calls.push(DrawCall::RotateX(angle));
    }

    fn rotate_y(&mut self, angle: f32) {
        self.calls.push(DrawCall::RotateY(angle));
    }

    fn rotate_z(&mut self, angle: f32) {
        self.calls.push(DrawCall::RotateZ(angle));
    }

    fn ambient_material(&mut self, color: Rgb, alpha: f32) {
        self.calls.push(DrawCall::Material(color, alpha));
    }

    fn sphere(&mut self, radius: f32) {
        self.calls.push(DrawCall::Sphere(radius));
    }

    fn cone(&mut self, radius: f32, height: f32) {
        self.calls.push(DrawCall::Cone(radius, height));
    }

    fn stroke(&mut self, color: Rgb) {
        self.calls.push(DrawCall::Stroke(color));
    }

    fn polyline(&mut self, points: &[Vec3]) {
        self.calls.push(DrawCall::Polyline(points.to_vec()));
    }
}
