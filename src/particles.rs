//! Rising bubble field.
//!
//! Particles are stored relative to an anchor: the document scroll offset for
//! [`Anchor::Document`], or zero for [`Anchor::Viewport`]. Either way the
//! on-screen position is `y - anchor`, and that conversion only happens when
//! drawing.

use fastrand::Rng;

use crate::canvas::{Canvas2d, Gradient, Paint};
use crate::color::Rgba;
use crate::viewport::ViewportState;

pub const SIZE_RANGE: (f64, f64) = (2.0, 10.0);
pub const SPEED_RANGE: (f64, f64) = (0.5, 2.0);
pub const OPACITY_RANGE: (f64, f64) = (0.2, 0.6);
pub const DRIFT_RANGE: (f64, f64) = (-0.25, 0.25);

const BUBBLE_CORE: Rgba = Rgba::rgba(255, 255, 255, 0.8);
const BUBBLE_RIM: Rgba = Rgba::rgba(0, 212, 255, 0.3);
const BUBBLE_EDGE: Rgba = Rgba::rgba(0, 212, 255, 0.0);
const BUBBLE_HIGHLIGHT: Rgba = Rgba::rgba(255, 255, 255, 0.6);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub speed: f64,
    pub opacity: f64,
    pub drift: f64,
}

/// Coordinate convention for particle y values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// Document space: the band follows the scroll position.
    Document,
    /// Viewport space: the band is pinned to the window.
    Viewport,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldParams {
    pub anchor: Anchor,
    /// Square pixels of canvas per particle.
    pub density: f64,
    /// Extra depth below the screen that initial spawns may land in.
    pub spawn_margin: f64,
    /// Slack above and below the screen before a particle is recycled. Keep it
    /// at least `spawn_margin` or fresh spawns are recycled straight away.
    pub band_margin: f64,
    /// Slack around the screen before a particle is skipped when drawing.
    pub cull_margin: f64,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            anchor: Anchor::Document,
            density: 20_000.0,
            spawn_margin: 200.0,
            band_margin: 200.0,
            cull_margin: 20.0,
        }
    }
}

/// Number of particles for a canvas area. Empty canvases get none.
pub fn particle_count(area: f64, density: f64) -> usize {
    if !(area > 0.0) || !(density > 0.0) {
        return 0;
    }
    (area / density).floor() as usize
}

pub struct ParticleField {
    params: FieldParams,
    particles: Vec<Particle>,
    rng: Rng,
}

impl ParticleField {
    pub fn new(params: FieldParams, rng: Rng) -> Self {
        Self { params, particles: Vec::new(), rng }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn anchor_y(&self, view: &ViewportState) -> f64 {
        match self.params.anchor {
            Anchor::Document => view.scroll_y,
            Anchor::Viewport => 0.0,
        }
    }

    /// The `(top, bottom)` span particles are kept inside.
    pub fn band(&self, view: &ViewportState) -> (f64, f64) {
        let anchor = self.anchor_y(view);
        (
            anchor - self.params.band_margin,
            anchor + view.height + self.params.band_margin,
        )
    }

    /// Rebuilds the field for new dimensions. Called after every resize, since
    /// the count depends on the canvas area.
    pub fn reset(&mut self, view: &ViewportState) {
        let count = particle_count(view.area(), self.params.density);
        let anchor = self.anchor_y(view);
        let depth = view.height + self.params.spawn_margin;
        self.particles.clear();
        self.particles.reserve(count);
        for _ in 0..count {
            let x = self.rng.f64() * view.width;
            let y = anchor + self.rng.f64() * depth;
            let particle = self.spawn(x, y);
            self.particles.push(particle);
        }
        log::debug!("particle field reset: {count} particles for {}x{}", view.width, view.height);
    }

    pub fn update(&mut self, view: &ViewportState) {
        let (top, bottom) = self.band(view);
        let width = view.width;
        for i in 0..self.particles.len() {
            let mut p = self.particles[i];
            p.y -= p.speed;
            p.x += p.drift;

            if p.y < top {
                let x = self.rng.f64() * width;
                p = self.spawn(x, bottom);
            } else if p.y > bottom {
                // One radius inside the top edge, so the next rise stays in band.
                let x = self.rng.f64() * width;
                p = self.spawn(x, top);
                p.y = top + p.size;
            }

            if p.x < -p.size {
                p.x = width + p.size;
            } else if p.x > width + p.size {
                p.x = -p.size;
            }
            self.particles[i] = p;
        }
    }

    pub fn draw(&self, view: &ViewportState, canvas: &mut dyn Canvas2d) {
        let anchor = self.anchor_y(view);
        let margin = self.params.cull_margin;
        for p in &self.particles {
            let sy = p.y - anchor;
            if sy < -p.size - margin || sy > view.height + p.size + margin {
                continue;
            }
            draw_bubble(canvas, p.x, sy, p.size, p.opacity);
        }
    }

    fn spawn(&mut self, x: f64, y: f64) -> Particle {
        Particle {
            x,
            y,
            size: uniform(&mut self.rng, SIZE_RANGE),
            speed: uniform(&mut self.rng, SPEED_RANGE),
            opacity: uniform(&mut self.rng, OPACITY_RANGE),
            drift: uniform(&mut self.rng, DRIFT_RANGE),
        }
    }
}

fn uniform(rng: &mut Rng, (lo, hi): (f64, f64)) -> f64 {
    lo + rng.f64() * (hi - lo)
}

fn draw_bubble(canvas: &mut dyn Canvas2d, x: f64, y: f64, size: f64, opacity: f64) {
    let hx = x - size * 0.3;
    let hy = y - size * 0.3;

    canvas.save();
    canvas.set_global_alpha(opacity);

    let body = Gradient::radial(hx, hy, 0.0, x, y, size)
        .stop(0.0, BUBBLE_CORE)
        .stop(0.7, BUBBLE_RIM)
        .stop(1.0, BUBBLE_EDGE);
    canvas.begin_path();
    canvas.circle(x, y, size);
    canvas.fill(&Paint::Gradient(body));

    canvas.begin_path();
    canvas.circle(hx, hy, size * 0.3);
    canvas.fill(&Paint::Solid(BUBBLE_HIGHLIGHT));

    canvas.restore();
}
