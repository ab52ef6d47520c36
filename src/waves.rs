use crate::canvas::{Canvas2d, Gradient, Paint};
use crate::color::Rgba;
use crate::sections::SectionDivider;
use crate::viewport::ViewportState;

/// Horizontal distance between curve samples.
pub const SAMPLE_STEP: f64 = 2.0;
/// Scales `x * frequency + phase * speed` into radians.
pub const PHASE_SCALE: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveSpec {
    pub baseline_y: f64,
    pub amplitude: f64,
    pub frequency: f64,
    pub phase_speed: f64,
    pub color: Rgba,
    pub opacity: f64,
    /// Inverted waves rise upward and fill to the top edge.
    pub inverted: bool,
}

impl WaveSpec {
    fn direction(&self) -> f64 {
        if self.inverted {
            -1.0
        } else {
            1.0
        }
    }

    /// Curve height at `x` for the given phase.
    pub fn sample(&self, x: f64, phase: f64) -> f64 {
        let angle = (x * self.frequency + phase * self.phase_speed) * PHASE_SCALE;
        self.baseline_y + angle.sin() * self.amplitude * self.direction()
    }
}

/// One layer of a stack, relative to the stack's baseline.
#[derive(Debug, Clone, Copy)]
pub struct WaveLayer {
    pub offset: f64,
    pub amplitude: f64,
    pub frequency: f64,
    pub phase_speed: f64,
    pub color: Rgba,
    pub opacity: f64,
}

/// Back-to-front layers. Amplitude decays and frequency grows with depth.
pub const OCEAN_STACK: [WaveLayer; 3] = [
    WaveLayer {
        offset: 0.0,
        amplitude: 15.0,
        frequency: 0.5,
        phase_speed: 2.0,
        color: Rgba::rgb(0x00, 0xd4, 0xff),
        opacity: 0.15,
    },
    WaveLayer {
        offset: 20.0,
        amplitude: 12.0,
        frequency: 0.6,
        phase_speed: 1.5,
        color: Rgba::rgb(0x00, 0xb8, 0xe6),
        opacity: 0.12,
    },
    WaveLayer {
        offset: 40.0,
        amplitude: 10.0,
        frequency: 0.7,
        phase_speed: 1.0,
        color: Rgba::rgb(0x00, 0x69, 0x94),
        opacity: 0.1,
    },
];

/// Where the fixed variant puts its stack, as a fraction of the height.
pub const FIXED_BASELINE: f64 = 0.7;
/// Vertical slack before an off-screen divider is skipped.
pub const DIVIDER_CULL: f64 = 60.0;

/// Fills the area between the curve and the screen edge it opens toward.
pub fn draw_wave(canvas: &mut dyn Canvas2d, spec: &WaveSpec, phase: f64, width: f64, height: f64) {
    let edge = if spec.inverted { 0.0 } else { height };

    canvas.save();
    canvas.begin_path();
    canvas.move_to(0.0, spec.baseline_y);
    let mut x = 0.0;
    while x <= width {
        canvas.line_to(x, spec.sample(x, phase));
        x += SAMPLE_STEP;
    }
    canvas.line_to(width, edge);
    canvas.line_to(0.0, edge);
    canvas.close_path();

    let crest = spec.baseline_y - spec.amplitude * spec.direction();
    let fade = Gradient::linear(0.0, crest, 0.0, edge)
        .stop(0.0, spec.color.with_alpha_byte(spec.opacity))
        .stop(1.0, spec.color.with_alpha(0.0));
    canvas.fill(&Paint::Gradient(fade));
    canvas.restore();
}

/// Draws [`OCEAN_STACK`] at a screen-space baseline. Inverted stacks grow
/// upward, so their layer offsets are mirrored.
pub fn draw_stack(
    canvas: &mut dyn Canvas2d,
    baseline_y: f64,
    inverted: bool,
    phase: f64,
    width: f64,
    height: f64,
) {
    let sign = if inverted { -1.0 } else { 1.0 };
    for layer in &OCEAN_STACK {
        let spec = WaveSpec {
            baseline_y: baseline_y + layer.offset * sign,
            amplitude: layer.amplitude,
            frequency: layer.frequency,
            phase_speed: layer.phase_speed,
            color: layer.color,
            opacity: layer.opacity,
            inverted,
        };
        draw_wave(canvas, &spec, phase, width, height);
    }
}

/// Divider stacks on screen plus the closing stack at the end of the page.
pub fn draw_document_waves(
    canvas: &mut dyn Canvas2d,
    view: &ViewportState,
    dividers: &[SectionDivider],
    phase: f64,
) {
    for divider in dividers {
        let sy = view.to_screen_y(divider.y);
        if sy < -DIVIDER_CULL || sy > view.height + DIVIDER_CULL {
            continue;
        }
        draw_stack(canvas, sy, divider.inverted, phase, view.width, view.height);
    }

    // Anchored so it sits at the fixed baseline once scrolled to the bottom.
    let end_y = view.document_height - view.height + view.height * FIXED_BASELINE;
    let sy = view.to_screen_y(end_y);
    if sy <= view.height + DIVIDER_CULL {
        draw_stack(canvas, sy, false, phase, view.width, view.height);
    }
}
