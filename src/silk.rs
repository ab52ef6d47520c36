//! Flowing silk overlay: drifting diagonal gradients, wave strokes and a
//! light sweep, all driven by one continuous time value.

use std::f64::consts::PI;

use crate::canvas::{Canvas2d, Gradient, Paint};
use crate::color::Rgba;
use crate::viewport::ViewportState;

const BASE_OPACITY: f64 = 0.15;

const WINE: (u8, u8, u8) = (107, 15, 42);
const GARNET: (u8, u8, u8) = (139, 21, 56);
const CRIMSON: (u8, u8, u8) = (169, 29, 61);
const RUBY: (u8, u8, u8) = (196, 30, 58);

/// `(offset, colour, opacity factor)` per layer, back to front.
const LAYERS: [&[(f64, (u8, u8, u8), f64)]; 4] = [
    &[(0.0, WINE, 1.0), (0.3, GARNET, 0.8), (0.6, CRIMSON, 0.6), (1.0, RUBY, 0.4)],
    &[(0.0, GARNET, 1.0), (0.4, CRIMSON, 0.7), (0.7, RUBY, 0.5), (1.0, WINE, 0.3)],
    &[(0.0, CRIMSON, 1.0), (0.5, RUBY, 0.6), (1.0, GARNET, 0.4)],
    &[(0.0, RUBY, 1.0), (0.6, CRIMSON, 0.5), (1.0, WINE, 0.3)],
];

const STROKE_COUNT: usize = 6;
const STROKE_ALPHA: f64 = 0.08;
const STROKE_COLOR: Rgba = Rgba::rgb(0x8b, 0x15, 0x38);
const STROKE_FREQUENCY: f64 = 0.01;
const STROKE_STEP: f64 = 2.0;

const SWEEP_WIDTH: f64 = 300.0;

pub fn layer_opacity(layer: usize) -> f64 {
    BASE_OPACITY * (1.0 - layer as f64 * 0.2)
}

/// Gradient for one layer at time `t`.
pub fn layer_gradient(layer: usize, t: f64, width: f64, height: f64) -> Gradient {
    let lt = t * (0.3 + layer as f64 * 0.1);
    let off_x = (lt * 0.5).sin() * width * 0.1;
    let off_y = (lt * 0.3).cos() * height * 0.1;
    let opacity = layer_opacity(layer);

    LAYERS[layer].iter().fold(
        Gradient::linear(
            width * 0.2 + off_x,
            height * 0.3 + off_y,
            width * 0.8 + off_x * 1.5,
            height * 0.7 + off_y * 1.5,
        ),
        |g, &(offset, (r, gr, b), factor)| g.stop(offset, Rgba::rgba(r, gr, b, opacity * factor)),
    )
}

/// Left edge of the light sweep.
pub fn sweep_x(t: f64, width: f64) -> f64 {
    (t * 20.0) % (width + 200.0) - 100.0
}

pub fn draw_silk(canvas: &mut dyn Canvas2d, view: &ViewportState, t: f64) {
    let (width, height) = (view.width, view.height);

    for layer in 0..LAYERS.len() {
        let gradient = layer_gradient(layer, t, width, height);
        canvas.fill_rect(0.0, 0.0, width, height, &Paint::Gradient(gradient));
    }

    canvas.save();
    canvas.set_global_alpha(STROKE_ALPHA);
    canvas.set_line_width(1.0);
    for i in 0..STROKE_COUNT {
        let wt = t * 0.4 + i as f64 * PI * 0.3;
        let baseline = height * 0.2 + i as f64 * height * 0.15;
        let amplitude = 30.0 + wt.sin() * 10.0;

        canvas.begin_path();
        let mut x = 0.0;
        while x < width {
            let y = baseline + (x * STROKE_FREQUENCY + wt).sin() * amplitude;
            if x == 0.0 {
                canvas.move_to(x, y);
            } else {
                canvas.line_to(x, y);
            }
            x += STROKE_STEP;
        }
        canvas.stroke(STROKE_COLOR);
    }
    canvas.restore();

    let x = sweep_x(t, width);
    let sweep = Gradient::linear(x, 0.0, x + SWEEP_WIDTH, 0.0)
        .stop(0.0, Rgba::rgba(255, 255, 255, 0.0))
        .stop(0.4, Rgba::rgba(255, 255, 255, 0.03))
        .stop(0.5, Rgba::rgba(255, 255, 255, 0.05))
        .stop(0.6, Rgba::rgba(255, 255, 255, 0.03))
        .stop(1.0, Rgba::rgba(255, 255, 255, 0.0));
    canvas.save();
    canvas.fill_rect(0.0, 0.0, width, height, &Paint::Gradient(sweep));
    canvas.restore();
}
