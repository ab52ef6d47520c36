//! Drawing surface abstraction.
//!
//! Renderers only talk to [`Canvas2d`]. In the browser it is backed by a
//! `CanvasRenderingContext2d`; in tests by [`RecordingCanvas`], which keeps
//! every command so output can be compared frame against frame.

use crate::color::Rgba;
use crate::fabric::TexturePattern;

/// Handle for a tile registered with [`Canvas2d::register_pattern`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GradientShape {
    Linear { x0: f64, y0: f64, x1: f64, y1: f64 },
    Radial { x0: f64, y0: f64, r0: f64, x1: f64, y1: f64, r1: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Gradient {
    pub shape: GradientShape,
    pub stops: Vec<(f64, Rgba)>,
}

impl Gradient {
    pub fn linear(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { shape: GradientShape::Linear { x0, y0, x1, y1 }, stops: Vec::new() }
    }

    pub fn radial(x0: f64, y0: f64, r0: f64, x1: f64, y1: f64, r1: f64) -> Self {
        Self { shape: GradientShape::Radial { x0, y0, r0, x1, y1, r1 }, stops: Vec::new() }
    }

    pub fn stop(mut self, offset: f64, color: Rgba) -> Self {
        self.stops.push((offset, color));
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Rgba),
    Gradient(Gradient),
    Pattern(PatternId),
}

/// The subset of the 2D context API the backdrops draw with.
pub trait Canvas2d {
    /// Resizes the backing store. This clears it.
    fn set_size(&mut self, width: f64, height: f64);
    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64);
    fn save(&mut self);
    fn restore(&mut self);
    fn set_global_alpha(&mut self, alpha: f64);
    fn set_line_width(&mut self, width: f64);
    fn translate(&mut self, x: f64, y: f64);
    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn close_path(&mut self);
    /// Adds a full circle to the current path.
    fn circle(&mut self, x: f64, y: f64, radius: f64);
    fn fill(&mut self, paint: &Paint);
    fn stroke(&mut self, color: Rgba);
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, paint: &Paint);
    /// Uploads a repeating tile. `None` when the surface cannot hold patterns.
    fn register_pattern(&mut self, tile: &TexturePattern) -> Option<PatternId>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    SetSize(f64, f64),
    ClearRect(f64, f64, f64, f64),
    Save,
    Restore,
    GlobalAlpha(f64),
    LineWidth(f64),
    Translate(f64, f64),
    BeginPath,
    MoveTo(f64, f64),
    LineTo(f64, f64),
    ClosePath,
    Circle(f64, f64, f64),
    Fill(Paint),
    Stroke(Rgba),
    FillRect(f64, f64, f64, f64, Paint),
    RegisterPattern(usize, usize),
}

impl DrawCommand {
    /// Whether the command puts pixels on the surface.
    pub fn is_draw(&self) -> bool {
        matches!(self, Self::Fill(_) | Self::Stroke(_) | Self::FillRect(..))
    }
}

/// In-memory surface that records commands instead of rasterising them.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    pub commands: Vec<DrawCommand>,
    patterns: usize,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn draw_count(&self) -> usize {
        self.commands.iter().filter(|c| c.is_draw()).count()
    }
}

impl Canvas2d for RecordingCanvas {
    fn set_size(&mut self, width: f64, height: f64) {
        self.commands.push(DrawCommand::SetSize(width, height));
    }

    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.commands.push(DrawCommand::ClearRect(x, y, w, h));
    }

    fn save(&mut self) {
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.commands.push(DrawCommand::Restore);
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.commands.push(DrawCommand::GlobalAlpha(alpha));
    }

    fn set_line_width(&mut self, width: f64) {
        self.commands.push(DrawCommand::LineWidth(width));
    }

    fn translate(&mut self, x: f64, y: f64) {
        self.commands.push(DrawCommand::Translate(x, y));
    }

    fn begin_path(&mut self) {
        self.commands.push(DrawCommand::BeginPath);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.commands.push(DrawCommand::MoveTo(x, y));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.commands.push(DrawCommand::LineTo(x, y));
    }

    fn close_path(&mut self) {
        self.commands.push(DrawCommand::ClosePath);
    }

    fn circle(&mut self, x: f64, y: f64, radius: f64) {
        self.commands.push(DrawCommand::Circle(x, y, radius));
    }

    fn fill(&mut self, paint: &Paint) {
        self.commands.push(DrawCommand::Fill(paint.clone()));
    }

    fn stroke(&mut self, color: Rgba) {
        self.commands.push(DrawCommand::Stroke(color));
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, paint: &Paint) {
        self.commands.push(DrawCommand::FillRect(x, y, w, h, paint.clone()));
    }

    fn register_pattern(&mut self, tile: &TexturePattern) -> Option<PatternId> {
        self.commands.push(DrawCommand::RegisterPattern(tile.width(), tile.height()));
        let id = PatternId(self.patterns);
        self.patterns += 1;
        Some(id)
    }
}
