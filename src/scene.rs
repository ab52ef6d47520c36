use fastrand::Rng;

use crate::canvas::Canvas2d;
use crate::clock::PhaseClock;
use crate::config::{BackdropConfig, Kind};
use crate::fabric::FabricRenderer;
use crate::particles::ParticleField;
use crate::sections::SectionDivider;
use crate::silk::draw_silk;
use crate::viewport::ViewportState;
use crate::waves::{draw_document_waves, draw_stack, FIXED_BASELINE};

/// Everything a scene reads during one frame. Built once per frame.
pub struct Frame<'a> {
    pub clock: &'a PhaseClock,
    pub view: &'a ViewportState,
    pub dividers: &'a [SectionDivider],
}

pub trait Scene {
    /// One-time setup against the surface, before the first resize.
    fn prepare(&mut self, _canvas: &mut dyn Canvas2d) {}

    /// Rebuild size-dependent state.
    fn resize(&mut self, _view: &ViewportState) {}

    /// Advance simulation state and draw. The canvas is already cleared.
    fn frame(&mut self, frame: &Frame<'_>, canvas: &mut dyn Canvas2d);

    /// Live particle count, for scenes that have any.
    fn population(&self) -> usize {
        0
    }
}

pub fn build_scene(kind: Kind, config: &BackdropConfig, rng: &mut Rng) -> Box<dyn Scene> {
    match kind {
        Kind::Waves | Kind::FixedWaves => {
            let params = config.field_params(kind.anchor());
            let field = ParticleField::new(params, Rng::with_seed(rng.u64(..)));
            Box::new(WavesScene { field, follow_document: kind == Kind::Waves })
        }
        Kind::Fabric => Box::new(FabricScene { fabric: FabricRenderer::new(rng) }),
        Kind::Silk => Box::new(SilkScene),
    }
}

pub struct WavesScene {
    field: ParticleField,
    follow_document: bool,
}

impl Scene for WavesScene {
    fn resize(&mut self, view: &ViewportState) {
        self.field.reset(view);
    }

    fn frame(&mut self, frame: &Frame<'_>, canvas: &mut dyn Canvas2d) {
        let view = frame.view;
        let phase = frame.clock.wave;
        if self.follow_document {
            draw_document_waves(canvas, view, frame.dividers, phase);
        } else {
            let baseline = view.height * FIXED_BASELINE;
            draw_stack(canvas, baseline, false, phase, view.width, view.height);
        }

        self.field.update(view);
        self.field.draw(view, canvas);
    }

    fn population(&self) -> usize {
        self.field.len()
    }
}

pub struct FabricScene {
    fabric: FabricRenderer,
}

impl Scene for FabricScene {
    fn prepare(&mut self, canvas: &mut dyn Canvas2d) {
        self.fabric.prepare(canvas);
    }

    fn frame(&mut self, frame: &Frame<'_>, canvas: &mut dyn Canvas2d) {
        self.fabric.draw(canvas, frame.view, frame.clock);
    }
}

pub struct SilkScene;

impl Scene for SilkScene {
    fn frame(&mut self, frame: &Frame<'_>, canvas: &mut dyn Canvas2d) {
        draw_silk(canvas, frame.view, frame.clock.silk);
    }
}
