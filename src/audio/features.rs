/// Named frequency bands understood by [`AudioFeed::energy`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Band {
    Bass,
    LowMid,
    Mid,
    HighMid,
    Treble,
}

impl Band {
    pub const ALL: [Band; 5] = [Band::Bass, Band::LowMid, Band::Mid, Band::HighMid, Band::Treble];

    pub fn name(self) -> &'static str {
        match self {
            Band::Bass => "bass",
            Band::LowMid => "low_mid",
            Band::Mid => "mid",
            Band::HighMid => "high_mid",
            Band::Treble => "treble",
        }
    }

    /// Frequency range in Hz.
    pub fn range_hz(self) -> (f32, f32) {
        match self {
            Band::Bass => (20.0, 140.0),
            Band::LowMid => (140.0, 400.0),
            Band::Mid => (400.0, 2600.0),
            Band::HighMid => (2600.0, 5200.0),
            Band::Treble => (5200.0, 14000.0),
        }
    }
}

/// Per-frame audio inputs consumed by the scene.
pub trait AudioFeed {
    /// RMS loudness of the current window (linear, 0.0-1.0 for unclipped audio).
    fn level(&self) -> f32;
    /// Frequency magnitudes, one byte per bin (0-255).
    fn spectrum(&self) -> &[u8];
    /// Average spectrum magnitude inside `band` (0-255).
    fn energy(&self, band: Band) -> f32;
}

/// Analysis snapshot for one video frame.
#[derive(Clone, Debug)]
pub struct AudioFrame {
    /// Play position in seconds
    pub time: f32,
    pub level: f32,
    pub spectrum: Vec<u8>,
    pub sample_rate: u32,
}

impl AudioFeed for AudioFrame {
    fn level(&self) -> f32 {
        self.level
    }

    fn spectrum(&self) -> &[u8] {
        &self.spectrum
    }

    fn energy(&self, band: Band) -> f32 {
        band_energy(&self.spectrum, self.sample_rate, band)
    }
}

/// Average of the bins whose indices bracket the band edges (inclusive).
pub fn band_energy(spectrum: &[u8], sample_rate: u32, band: Band) -> f32 {
    if spectrum.is_empty() || sample_rate == 0 {
        return 0.0;
    }

    let nyquist = sample_rate as f32 / 2.0;
    let len = spectrum.len();
    let (low_hz, high_hz) = band.range_hz();
    let to_bin = |hz: f32| ((hz / nyquist * len as f32).round() as usize).min(len - 1);
    let low = to_bin(low_hz);
    let high = to_bin(high_hz);

    let bins = &spectrum[low..=high];
    bins.iter().map(|&b| b as f32).sum::<f32>() / bins.len() as f32
}

#[derive(Clone, Debug)]
pub struct AnalysisSummary {
    pub sample_rate: u32,
    pub duration: f32,
    pub peak_level: f32,
    /// Mean energy per band over the whole track, in `Band::ALL` order
    pub band_means: [f32; 5],
}
