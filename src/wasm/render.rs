use std::f64::consts::TAU;

use wasm_bindgen::{Clamped, JsCast, JsValue};
use web_sys::{
    window, CanvasGradient, CanvasPattern, CanvasRenderingContext2d, HtmlCanvasElement, ImageData,
};

use crate::canvas::{Canvas2d, Gradient, GradientShape, Paint, PatternId};
use crate::color::Rgba;
use crate::error::{BackdropError, Result};
use crate::fabric::TexturePattern;

/// [`Canvas2d`] over a real `<canvas>` element.
///
/// Context calls that can throw are ignored: a failed decorative draw just
/// leaves that layer out of the frame.
pub struct WebCanvas {
    element: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    patterns: Vec<CanvasPattern>,
}

impl WebCanvas {
    pub fn new(element: HtmlCanvasElement) -> Result<Self> {
        let ctx = context_2d(&element)?;
        Ok(Self { element, ctx, patterns: Vec::new() })
    }

    fn style(&self, paint: &Paint) -> Option<JsValue> {
        match paint {
            Paint::Solid(color) => Some(JsValue::from_str(&color.to_string())),
            Paint::Gradient(gradient) => self.gradient(gradient).map(JsValue::from),
            Paint::Pattern(id) => self.patterns.get(id.0).map(|p| JsValue::from(p.clone())),
        }
    }

    fn gradient(&self, gradient: &Gradient) -> Option<CanvasGradient> {
        let g = match gradient.shape {
            GradientShape::Linear { x0, y0, x1, y1 } => self.ctx.create_linear_gradient(x0, y0, x1, y1),
            GradientShape::Radial { x0, y0, r0, x1, y1, r1 } => {
                self.ctx.create_radial_gradient(x0, y0, r0.max(0.0), x1, y1, r1.max(0.0)).ok()?
            }
        };
        for (offset, color) in &gradient.stops {
            g.add_color_stop(offset.clamp(0.0, 1.0) as f32, &color.to_string()).ok()?;
        }
        Some(g)
    }
}

fn context_2d(element: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d> {
    element
        .get_context("2d")
        .ok()
        .flatten()
        .ok_or(BackdropError::ContextUnavailable)?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| BackdropError::ContextUnavailable)
}

impl Canvas2d for WebCanvas {
    fn set_size(&mut self, width: f64, height: f64) {
        self.element.set_width(width as u32);
        self.element.set_height(height as u32);
    }

    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.ctx.clear_rect(x, y, w, h);
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.ctx.set_global_alpha(alpha);
    }

    fn set_line_width(&mut self, width: f64) {
        self.ctx.set_line_width(width);
    }

    fn translate(&mut self, x: f64, y: f64) {
        let _ = self.ctx.translate(x, y);
    }

    fn begin_path(&mut self) {
        self.ctx.begin_path();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.ctx.move_to(x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.ctx.line_to(x, y);
    }

    fn close_path(&mut self) {
        self.ctx.close_path();
    }

    fn circle(&mut self, x: f64, y: f64, radius: f64) {
        let _ = self.ctx.arc(x, y, radius.max(0.0), 0.0, TAU);
    }

    #[allow(deprecated)]
    fn fill(&mut self, paint: &Paint) {
        if let Some(style) = self.style(paint) {
            self.ctx.set_fill_style(&style);
            self.ctx.fill();
        }
    }

    #[allow(deprecated)]
    fn stroke(&mut self, color: Rgba) {
        self.ctx.set_stroke_style(&JsValue::from_str(&color.to_string()));
        self.ctx.stroke();
    }

    #[allow(deprecated)]
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, paint: &Paint) {
        if let Some(style) = self.style(paint) {
            self.ctx.set_fill_style(&style);
            self.ctx.fill_rect(x, y, w, h);
        }
    }

    fn register_pattern(&mut self, tile: &TexturePattern) -> Option<PatternId> {
        match build_pattern(&self.ctx, tile) {
            Ok(pattern) => {
                self.patterns.push(pattern);
                Some(PatternId(self.patterns.len() - 1))
            }
            Err(err) => {
                log::debug!("texture pattern unavailable: {err}");
                None
            }
        }
    }
}

/// Paints the tile into a scratch canvas and wraps it as a repeating pattern.
fn build_pattern(ctx: &CanvasRenderingContext2d, tile: &TexturePattern) -> Result<CanvasPattern> {
    let document = window()
        .ok_or(BackdropError::NoWindow)?
        .document()
        .ok_or(BackdropError::NoDocument)?;
    let scratch: HtmlCanvasElement = document
        .create_element("canvas")?
        .dyn_into()
        .map_err(|_| BackdropError::NotACanvas("pattern scratch".into()))?;
    scratch.set_width(tile.width() as u32);
    scratch.set_height(tile.height() as u32);

    let image = ImageData::new_with_u8_clamped_array_and_sh(
        Clamped(tile.pixels()),
        tile.width() as u32,
        tile.height() as u32,
    )?;
    context_2d(&scratch)?.put_image_data(&image, 0.0, 0.0)?;

    ctx.create_pattern_with_html_canvas_element(&scratch, "repeat")?
        .ok_or(BackdropError::ContextUnavailable)
}
