//! Velvet fabric: a procedural grain tile plus lighting, nap and shimmer.

use std::f64::consts::TAU;

use fastrand::Rng;

use crate::canvas::{Canvas2d, Gradient, Paint, PatternId};
use crate::clock::PhaseClock;
use crate::color::Rgba;
use crate::viewport::ViewportState;

pub const TILE_SIZE: usize = 64;
/// Base colour the grain is darkened from.
pub const GRAIN_BASE: (u8, u8, u8) = (107, 15, 42);
pub const NOISE_MAX: f64 = 0.15;
pub const RIPPLE_FREQUENCY: f64 = 0.3;
pub const RIPPLE_AMPLITUDE: f64 = 0.05;
pub const ALPHA_RANGE: (f64, f64) = (8.0, 18.0);

const TEXTURE_ALPHA: f64 = 0.15;

const NAP_ALPHA: f64 = 0.08;
const NAP_COLOR: Rgba = Rgba::rgb(0x6b, 0x0f, 0x2a);
const NAP_SPACING: f64 = 8.0;
const NAP_STEP: f64 = 4.0;
const NAP_AMPLITUDE: f64 = 2.0;
const NAP_FREQUENCY: f64 = 0.02;

const SHIMMER_WIDTH: f64 = 0.6;

/// Immutable RGBA tile, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct TexturePattern {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl TexturePattern {
    /// Noise plus a diagonal ripple, mapped onto a near-transparent dark red.
    pub fn generate(rng: &mut Rng) -> Self {
        let mut pixels = vec![0u8; TILE_SIZE * TILE_SIZE * 4];
        for y in 0..TILE_SIZE {
            for x in 0..TILE_SIZE {
                let noise = rng.f64() * NOISE_MAX;
                let value = noise + ripple(x, y);
                let i = (y * TILE_SIZE + x) * 4;
                pixels[i..i + 4].copy_from_slice(&grain_rgba(value));
            }
        }
        Self { width: TILE_SIZE, height: TILE_SIZE, pixels }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        let i = (y * self.width + x) * 4;
        [self.pixels[i], self.pixels[i + 1], self.pixels[i + 2], self.pixels[i + 3]]
    }
}

/// Deterministic part of a tile pixel's value.
pub fn ripple(x: usize, y: usize) -> f64 {
    ((x + y) as f64 * RIPPLE_FREQUENCY).sin() * RIPPLE_AMPLITUDE
}

/// Channel formulas for a grain value. Alpha stays within `[8, 18]` even
/// when the ripple pulls the value below zero.
pub fn grain_rgba(value: f64) -> [u8; 4] {
    let (r, g, b) = GRAIN_BASE;
    let shade = |c: u8| (c as f64 * (1.0 - value)).floor().clamp(0.0, 255.0) as u8;
    let alpha = (8.0 + value * 10.0).floor().clamp(ALPHA_RANGE.0, ALPHA_RANGE.1);
    [shade(r), shade(g), shade(b), alpha as u8]
}

pub struct FabricRenderer {
    tile: TexturePattern,
    pattern: Option<PatternId>,
}

impl FabricRenderer {
    pub fn new(rng: &mut Rng) -> Self {
        Self { tile: TexturePattern::generate(rng), pattern: None }
    }

    pub fn tile(&self) -> &TexturePattern {
        &self.tile
    }

    /// Uploads the tile once; later calls are no-ops.
    pub fn prepare(&mut self, canvas: &mut dyn Canvas2d) {
        if self.pattern.is_none() {
            self.pattern = canvas.register_pattern(&self.tile);
        }
    }

    pub fn draw(&self, canvas: &mut dyn Canvas2d, view: &ViewportState, clock: &PhaseClock) {
        draw_depth(canvas, view);
        draw_nap(canvas, view, clock.texture);
        self.draw_texture(canvas, view, clock.texture);
        draw_shimmer(canvas, view, clock.shimmer);
    }

    fn draw_texture(&self, canvas: &mut dyn Canvas2d, view: &ViewportState, offset: f64) {
        let Some(pattern) = self.pattern else {
            return;
        };
        let tile = self.tile.width as f64;
        let shift = offset % tile;
        canvas.save();
        canvas.set_global_alpha(TEXTURE_ALPHA);
        canvas.translate(shift, shift);
        canvas.fill_rect(
            -tile,
            -tile,
            view.width + tile * 2.0,
            view.height + tile * 2.0,
            &Paint::Pattern(pattern),
        );
        canvas.restore();
    }
}

fn draw_depth(canvas: &mut dyn Canvas2d, view: &ViewportState) {
    let cx = view.width * 0.3;
    let cy = view.height * 0.4;
    let radius = view.width.max(view.height) * 0.8;
    let (r, g, b) = GRAIN_BASE;
    let light = Gradient::radial(cx, cy, 0.0, cx, cy, radius)
        .stop(0.0, Rgba::rgba(r, g, b, 0.05))
        .stop(0.5, Rgba::rgba(r, g, b, 0.02))
        .stop(1.0, Rgba::rgba(r, g, b, 0.0));

    canvas.save();
    canvas.fill_rect(0.0, 0.0, view.width, view.height, &Paint::Gradient(light));
    canvas.restore();
}

fn draw_nap(canvas: &mut dyn Canvas2d, view: &ViewportState, texture: f64) {
    let offset = (texture * 0.1) % TAU;

    canvas.save();
    canvas.set_global_alpha(NAP_ALPHA);
    canvas.set_line_width(1.0);
    let mut y = 0.0;
    while y < view.height {
        canvas.begin_path();
        canvas.move_to(0.0, y + (y * NAP_FREQUENCY + offset).sin() * NAP_AMPLITUDE);
        let mut x = 0.0;
        while x < view.width {
            canvas.line_to(x, y + ((x + y) * NAP_FREQUENCY + offset).sin() * NAP_AMPLITUDE);
            x += NAP_STEP;
        }
        canvas.stroke(NAP_COLOR);
        y += NAP_SPACING;
    }
    canvas.restore();
}

/// Left edge of the shimmer band; loops every `width + band` pixels.
pub fn shimmer_x(width: f64, offset: f64) -> f64 {
    let band = width * SHIMMER_WIDTH;
    let period = width + band;
    if period <= 0.0 {
        return 0.0;
    }
    offset % period - band
}

fn draw_shimmer(canvas: &mut dyn Canvas2d, view: &ViewportState, offset: f64) {
    let band = view.width * SHIMMER_WIDTH;
    let x = shimmer_x(view.width, offset);
    let glint = Gradient::linear(x, 0.0, x + band, 0.0)
        .stop(0.0, Rgba::rgba(169, 29, 61, 0.0))
        .stop(0.3, Rgba::rgba(201, 30, 58, 0.12))
        .stop(0.5, Rgba::rgba(255, 255, 255, 0.08))
        .stop(0.7, Rgba::rgba(201, 30, 58, 0.12))
        .stop(1.0, Rgba::rgba(169, 29, 61, 0.0));

    canvas.save();
    canvas.fill_rect(0.0, 0.0, view.width, view.height, &Paint::Gradient(glint));
    canvas.restore();
}
