/// Phase counters advanced by a constant step on every rendered frame.
///
/// Steps are per frame, not per second, so motion speed follows the display
/// refresh rate. Each counter drives a different effect so they can move at
/// different relative speeds.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PhaseClock {
    /// Wave phase, consumed by the wave stacks.
    pub wave: f64,
    /// Fabric shimmer band position, in pixels.
    pub shimmer: f64,
    /// Fabric texture drift, in pixels.
    pub texture: f64,
    /// Continuous silk time.
    pub silk: f64,
    frames: u64,
}

pub const WAVE_STEP: f64 = 1.0;
pub const SHIMMER_STEP: f64 = 0.8;
pub const TEXTURE_STEP: f64 = 0.1;
pub const SILK_STEP: f64 = 0.01;

impl PhaseClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self) {
        self.wave += WAVE_STEP;
        self.shimmer += SHIMMER_STEP;
        self.texture += TEXTURE_STEP;
        self.silk += SILK_STEP;
        self.frames += 1;
    }

    /// Number of times [`advance`](Self::advance) has run.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}
