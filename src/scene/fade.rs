/// Shared opacity clock. Every shape reads the same direction, so the whole
/// scene breathes in and out together.
#[derive(Clone, Debug)]
pub struct FadeState {
    pub fading_in: bool,
    /// Seconds, nominally within `[0, duration]`
    pub timer: f32,
    pub duration: f32,
}

impl FadeState {
    pub fn new(duration: f32) -> Self {
        Self {
            fading_in: false,
            timer: 0.0,
            duration,
        }
    }

    /// Alpha units per second needed to cross 0-255 in one fade.
    pub fn alpha_rate(&self) -> f32 {
        if self.duration > 0.0 {
            255.0 / self.duration
        } else {
            f32::INFINITY
        }
    }

    /// Advance by `delta` seconds. Returns true when the direction flipped.
    pub fn advance(&mut self, delta: f32) -> bool {
        if self.fading_in {
            self.timer += delta;
            if self.timer >= self.duration {
                self.fading_in = false;
                return true;
            }
        } else {
            self.timer -= delta;
            if self.timer <= 0.0 {
                self.fading_in = true;
                return true;
            }
        }
        false
    }
}
