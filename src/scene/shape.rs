use glam::Vec3;
use rand::Rng;
use std::f32::consts::TAU;

use super::color::Rgb;
use super::fade::FadeState;
use super::remap;
use crate::render::canvas::Canvas;

/// Size a shape is born with, before the first audio update.
pub const INITIAL_SIZE: f32 = 100.0;
/// Output range for audio-driven sizes.
pub const SIZE_RANGE: (f32, f32) = (50.0, 200.0);
/// Largest per-frame rotation step, in radians.
pub const MAX_ANGLE_SPEED: f32 = 0.05;
/// Depth range for random placement.
pub const DEPTH_RANGE: (f32, f32) = (-400.0, 400.0);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeKind {
    /// Sized by the spectrum bin under its horizontal position
    Sphere,
    /// Sized by bass energy
    Cone,
}

/// Audio readings shared by every shape during one tick.
#[derive(Clone, Copy, Debug)]
pub struct ShapeInputs<'a> {
    pub level: f32,
    pub spectrum: &'a [u8],
    pub bass: f32,
    /// Canvas width, for mapping x onto a spectrum bin
    pub width: f32,
}

#[derive(Clone, Debug)]
pub struct Shape {
    pub kind: ShapeKind,
    /// Canvas coordinates: x in `[0, width)`, y in `[0, height)`
    pub position: Vec3,
    pub size: f32,
    pub angles: Vec3,
    pub angle_speed: f32,
    pub fade_color: Rgb,
    /// Opacity, 0-255
    pub alpha: f32,
    /// Alpha units per second
    pub fade_speed: f32,
}

impl Shape {
    pub fn new(kind: ShapeKind, position: Vec3, fade_speed: f32, rng: &mut impl Rng) -> Self {
        Self {
            kind,
            position,
            size: INITIAL_SIZE,
            angles: Vec3::new(
                rng.gen_range(0.0..TAU),
                rng.gen_range(0.0..TAU),
                rng.gen_range(0.0..TAU),
            ),
            angle_speed: rng.gen_range(-MAX_ANGLE_SPEED..MAX_ANGLE_SPEED),
            fade_color: Rgb::random(rng),
            alpha: 0.0,
            fade_speed,
        }
    }

    /// Random kind at a random spot on a `width × height` canvas.
    pub fn random(width: f32, height: f32, fade_speed: f32, rng: &mut impl Rng) -> Self {
        let kind = if rng.gen_bool(0.5) {
            ShapeKind::Sphere
        } else {
            ShapeKind::Cone
        };
        let position = Vec3::new(
            rng.gen_range(0.0..width.max(f32::EPSILON)),
            rng.gen_range(0.0..height.max(f32::EPSILON)),
            rng.gen_range(DEPTH_RANGE.0..DEPTH_RANGE.1),
        );
        Self::new(kind, position, fade_speed, rng)
    }

    pub fn update(&mut self, inputs: &ShapeInputs, fade: &FadeState, delta: f32) {
        let magnitude = match self.kind {
            ShapeKind::Sphere => {
                spectrum_at(inputs.spectrum, self.position.x, inputs.width) as f32
            }
            ShapeKind::Cone => inputs.bass,
        };
        self.size = remap(magnitude, 0.0, 255.0, SIZE_RANGE.0, SIZE_RANGE.1);

        let step = self.fade_speed * delta;
        self.alpha = if fade.fading_in {
            (self.alpha + step).min(255.0)
        } else {
            (self.alpha - step).max(0.0)
        };

        self.angles += Vec3::splat(self.angle_speed);
    }

    pub fn draw(&self, canvas: &mut impl Canvas, width: f32, height: f32) {
        canvas.push();
        canvas.translate(Vec3::new(
            self.position.x - width / 2.0,
            self.position.y - height / 2.0,
            self.position.z,
        ));
        canvas.rotate_x(self.angles.x);
        canvas.rotate_y(self.angles.y);
        canvas.rotate_z(self.angles.z);
        canvas.ambient_material(self.fade_color, self.alpha);
        match self.kind {
            ShapeKind::Sphere => canvas.sphere(self.size / 2.0),
            ShapeKind::Cone => canvas.cone(self.size / 2.0, self.size),
        }
        canvas.pop();
    }
}

/// Bin index for horizontal position `x` on a canvas `width` wide.
pub fn spectrum_index(x: f32, width: f32, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let last = (len - 1) as f32;
    let mapped = remap(x, 0.0, width, 0.0, last);
    // NaN and negatives land on bin 0
    (mapped.max(0.0) as usize).min(len - 1)
}

fn spectrum_at(spectrum: &[u8], x: f32, width: f32) -> u8 {
    spectrum
        .get(spectrum_index(x, width, spectrum.len()))
        .copied()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::testing::{DrawCall, RecordingCanvas};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn shape(kind: ShapeKind, x: f32) -> Shape {
        Shape {
            kind,
            position: Vec3::new(x, 100.0, -50.0),
            size: INITIAL_SIZE,
            angles: Vec3::ZERO,
            angle_speed: 0.01,
            fade_color: Rgb::new(10, 20, 30),
            alpha: 0.0,
            fade_speed: 51.0,
        }
    }

    fn fade(fading_in: bool) -> FadeState {
        FadeState {
            fading_in,
            timer: 1.0,
            duration: 5.0,
        }
    }

    #[test]
    fn mid_canvas_maps_to_mid_bin() {
        assert_eq!(spectrum_index(250.0, 500.0, 512), 255);
        assert_eq!(spectrum_index(0.0, 500.0, 512), 0);
        assert_eq!(spectrum_index(500.0, 500.0, 512), 511);
    }

    #[test]
    fn index_is_clamped_at_edges() {
        assert_eq!(spectrum_index(-40.0, 500.0, 512), 0);
        assert_eq!(spectrum_index(900.0, 500.0, 512), 511);
        assert_eq!(spectrum_index(10.0, 500.0, 0), 0);
        assert_eq!(spectrum_index(f32::NAN, 500.0, 8), 0);
    }

    #[test]
    fn sphere_size_follows_its_bin() {
        let mut spectrum = vec![0u8; 512];
        spectrum[255] = 255;
        let inputs = ShapeInputs {
            level: 0.2,
            spectrum: &spectrum,
            bass: 0.0,
            width: 500.0,
        };
        let mut s = shape(ShapeKind::Sphere, 250.0);
        s.update(&inputs, &fade(true), 0.1);
        assert_eq!(s.size, 200.0);

        spectrum[255] = 0;
        let inputs = ShapeInputs {
            level: 0.2,
            spectrum: &spectrum,
            bass: 0.0,
            width: 500.0,
        };
        s.update(&inputs, &fade(true), 0.1);
        assert_eq!(s.size, 50.0);
    }

    #[test]
    fn sphere_size_is_monotonic_in_magnitude() {
        let mut s = shape(ShapeKind::Sphere, 0.0);
        let mut previous = f32::MIN;
        for magnitude in 0..=255u8 {
            let spectrum = [magnitude];
            let inputs = ShapeInputs {
                level: 0.0,
                spectrum: &spectrum,
                bass: 0.0,
                width: 500.0,
            };
            s.update(&inputs, &fade(true), 0.0);
            assert!(s.size > previous);
            previous = s.size;
        }
    }

    #[test]
    fn sphere_with_empty_spectrum_shrinks_to_minimum() {
        let inputs = ShapeInputs {
            level: 0.0,
            spectrum: &[],
            bass: 255.0,
            width: 500.0,
        };
        let mut s = shape(ShapeKind::Sphere, 250.0);
        s.update(&inputs, &fade(true), 0.1);
        assert_eq!(s.size, 50.0);
    }

    #[test]
    fn cone_size_follows_bass() {
        let spectrum = [255u8; 16];
        let mut s = shape(ShapeKind::Cone, 250.0);
        for (bass, expected) in [(0.0, 50.0), (127.5, 125.0), (255.0, 200.0)] {
            let inputs = ShapeInputs {
                level: 0.0,
                spectrum: &spectrum,
                bass,
                width: 500.0,
            };
            s.update(&inputs, &fade(false), 0.0);
            assert!((s.size - expected).abs() < 1e-4);
        }
    }

    #[test]
    fn alpha_stays_within_bounds() {
        let inputs = ShapeInputs {
            level: 0.0,
            spectrum: &[],
            bass: 0.0,
            width: 500.0,
        };
        let mut s = shape(ShapeKind::Cone, 10.0);
        for _ in 0..100 {
            s.update(&inputs, &fade(true), 0.5);
            assert!((0.0..=255.0).contains(&s.alpha));
        }
        assert_eq!(s.alpha, 255.0);
        for _ in 0..100 {
            s.update(&inputs, &fade(false), 0.5);
            assert!((0.0..=255.0).contains(&s.alpha));
        }
        assert_eq!(s.alpha, 0.0);
    }

    #[test]
    fn angles_advance_by_fixed_speed() {
        let inputs = ShapeInputs {
            level: 0.0,
            spectrum: &[],
            bass: 0.0,
            width: 500.0,
        };
        let mut s = shape(ShapeKind::Sphere, 10.0);
        s.update(&inputs, &fade(true), 1.0);
        s.update(&inputs, &fade(true), 0.001);
        assert!((s.angles - Vec3::splat(0.02)).abs().max_element() < 1e-6);
    }

    #[test]
    fn draw_centers_and_sizes_the_primitive() {
        let mut canvas = RecordingCanvas::default();
        let mut s = shape(ShapeKind::Cone, 300.0);
        s.size = 80.0;
        s.alpha = 42.0;
        s.draw(&mut canvas, 500.0, 400.0);
        assert_eq!(
            canvas.calls,
            vec![
                DrawCall::Push,
                DrawCall::Translate(Vec3::new(50.0, -100.0, -50.0)),
                DrawCall::RotateX(0.0),
                DrawCall::RotateY(0.0),
                DrawCall::RotateZ(0.0),
                DrawCall::Material(Rgb::new(10, 20, 30), 42.0),
                DrawCall::Cone(40.0, 80.0),
                DrawCall::Pop,
            ]
        );
    }

    #[test]
    fn random_shapes_are_placed_inside_the_volume() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..200 {
            let s = Shape::random(500.0, 400.0, 51.0, &mut rng);
            assert!((0.0..500.0).contains(&s.position.x));
            assert!((0.0..400.0).contains(&s.position.y));
            assert!((-400.0..400.0).contains(&s.position.z));
            assert!((-MAX_ANGLE_SPEED..MAX_ANGLE_SPEED).contains(&s.angle_speed));
            assert_eq!(s.alpha, 0.0);
            assert_eq!(s.size, INITIAL_SIZE);
        }
    }
}
