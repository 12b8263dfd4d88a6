use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Uniformly random color, each channel independent.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::new(rng.gen(), rng.gen(), rng.gen())
    }

    /// Channels normalized to 0.0-1.0 with the given 0-255 alpha.
    pub fn to_rgba(self, alpha: f32) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            (alpha / 255.0).clamp(0.0, 1.0),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_channels_and_alpha() {
        let rgba = Rgb::new(255, 0, 51).to_rgba(127.5);
        assert_eq!(rgba[0], 1.0);
        assert_eq!(rgba[1], 0.0);
        assert!((rgba[2] - 0.2).abs() < 1e-6);
        assert!((rgba[3] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn alpha_outside_range_is_clamped() {
        assert_eq!(Rgb::BLACK.to_rgba(400.0)[3], 1.0);
        assert_eq!(Rgb::BLACK.to_rgba(-3.0)[3], 0.0);
    }
}
