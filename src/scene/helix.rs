use glam::Vec3;
use rand::Rng;
use std::f32::consts::TAU;

use super::color::Rgb;
use super::remap;
use crate::render::canvas::Canvas;

pub const LOOPS: usize = 5;
pub const POINTS_PER_LOOP: usize = 100;
pub const RADIUS: f32 = 100.0;
/// Total vertical extent, centered on the origin.
pub const HEIGHT: f32 = 400.0;

/// Bass-triggered helix. Stays up for `duration` seconds after the most
/// recent trigger.
#[derive(Clone, Debug)]
pub struct HelixOverlay {
    pub visible: bool,
    /// Scene time of the latest trigger, in seconds
    pub triggered_at: f32,
    pub color: Rgb,
    pub duration: f32,
}

impl HelixOverlay {
    pub fn new(duration: f32) -> Self {
        Self {
            visible: false,
            triggered_at: 0.0,
            color: Rgb::BLACK,
            duration,
        }
    }

    /// Show the helix from `now` with a fresh color.
    pub fn trigger(&mut self, now: f32, rng: &mut impl Rng) {
        self.visible = true;
        self.triggered_at = now;
        self.color = Rgb::random(rng);
    }

    /// Whether the helix should be drawn at `now`; hides it once expired.
    pub fn refresh(&mut self, now: f32) -> bool {
        if self.visible && now - self.triggered_at < self.duration {
            true
        } else {
            self.visible = false;
            false
        }
    }

    pub fn draw(&self, canvas: &mut impl Canvas) {
        canvas.stroke(self.color);
        canvas.polyline(&helix_points());
    }
}

/// Points along the open helix, coiling around the z axis.
pub fn helix_points() -> Vec<Vec3> {
    let total = (LOOPS * POINTS_PER_LOOP) as f32;
    (0..LOOPS * POINTS_PER_LOOP)
        .map(|i| {
            let i = i as f32;
            let angle = remap(i, 0.0, total, 0.0, TAU * LOOPS as f32);
            let z = remap(i, 0.0, total, -HEIGHT / 2.0, HEIGHT / 2.0);
            Vec3::new(angle.cos() * RADIUS, angle.sin() * RADIUS, z)
        })
        .collect()
}
