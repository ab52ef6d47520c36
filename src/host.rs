//! Per-canvas driver.
//!
//! The host owns everything one backdrop needs and reacts to the page through
//! plain method calls. The browser layer turns DOM events into those calls;
//! tests make them directly with fake signals.

use fastrand::Rng;

use crate::canvas::Canvas2d;
use crate::clock::PhaseClock;
use crate::config::{BackdropConfig, Kind};
use crate::scene::{build_scene, Frame, Scene};
use crate::sections::{RegionSource, SectionBoundaryLocator, SectionDivider};
use crate::theme::{PaletteChange, PaletteTrigger, PaletteWatch};
use crate::viewport::{ViewportSource, ViewportTracker};
use crate::visibility::VisibilityGate;

/// Identifier of a pending frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHandle(pub i32);

/// Requests and cancels frame callbacks, `requestAnimationFrame` style.
pub trait FrameScheduler {
    fn request(&mut self) -> Option<FrameHandle>;
    fn cancel(&mut self, handle: FrameHandle);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostState {
    Idle,
    Running,
    TornDown,
}

pub struct AnimationHost<C, F, V> {
    kind: Kind,
    scene: Box<dyn Scene>,
    canvas: C,
    scheduler: F,
    viewport: ViewportTracker<V>,
    regions: Option<Box<dyn RegionSource>>,
    sections: SectionBoundaryLocator,
    clock: PhaseClock,
    visibility: VisibilityGate,
    palette: Option<PaletteWatch>,
    handle: Option<FrameHandle>,
    state: HostState,
}

impl<C, F, V> AnimationHost<C, F, V>
where
    C: Canvas2d,
    F: FrameScheduler,
    V: ViewportSource,
{
    pub fn new(
        kind: Kind,
        config: &BackdropConfig,
        canvas: C,
        scheduler: F,
        viewport: V,
        visibility: VisibilityGate,
        mut rng: Rng,
    ) -> Self {
        let palette = kind
            .is_palette_gated()
            .then(|| PaletteWatch::new(config.gated_palette.clone()));
        Self {
            kind,
            scene: build_scene(kind, config, &mut rng),
            canvas,
            scheduler,
            viewport: ViewportTracker::new(viewport),
            regions: None,
            sections: SectionBoundaryLocator::new(config.section_height_threshold),
            clock: PhaseClock::new(),
            visibility,
            palette,
            handle: None,
            state: HostState::Idle,
        }
    }

    /// Supplies the page regions divider detection reads from.
    pub fn with_regions(mut self, regions: Box<dyn RegionSource>) -> Self {
        self.regions = Some(regions);
        self
    }

    pub fn mount(&mut self) {
        if self.state != HostState::Idle {
            return;
        }
        self.state = HostState::Running;
        self.scene.prepare(&mut self.canvas);
        self.apply_size(true);
        if self.palette_allows() {
            self.schedule();
        }
        log::debug!("{} backdrop mounted", self.kind);
    }

    /// Runs one frame. Always re-arms the next one first, so there is exactly
    /// one callback pending however the rest of the frame goes.
    pub fn on_frame(&mut self) {
        if self.state != HostState::Running {
            return;
        }
        self.handle = None;
        if !self.palette_allows() {
            return;
        }
        self.schedule();
        if !self.visibility.is_active() {
            return;
        }

        self.clock.advance();
        let view = self.viewport.snapshot();
        if view.is_empty() {
            return;
        }

        let dividers: &[SectionDivider] = match &self.regions {
            Some(source) if self.kind.uses_sections() => self.sections.refresh(source.as_ref()),
            _ => &[],
        };
        self.canvas.clear_rect(0.0, 0.0, view.width, view.height);
        let frame = Frame { clock: &self.clock, view: &view, dividers };
        self.scene.frame(&frame, &mut self.canvas);
    }

    pub fn on_resize(&mut self) {
        if self.state == HostState::Running {
            self.apply_size(false);
        }
    }

    pub fn on_scroll(&mut self) {
        if self.state == HostState::Running {
            self.sections.mark_dirty();
        }
    }

    /// Periodic re-measure of the page sections.
    pub fn on_section_timer(&mut self) {
        if self.state == HostState::Running {
            self.sections.mark_dirty();
        }
    }

    pub fn on_visibility_change(&mut self, page_hidden: bool) {
        if self.state == HostState::Running {
            self.visibility.on_visibility_change(page_hidden);
        }
    }

    pub fn on_blur(&mut self) {
        if self.state == HostState::Running {
            self.visibility.on_blur();
        }
    }

    pub fn on_focus(&mut self) {
        if self.state == HostState::Running {
            self.visibility.on_focus();
        }
    }

    /// Feeds a palette reading. Starts the loop when the gated palette
    /// becomes active and stops it, clearing the canvas, when it goes away.
    pub fn on_palette(&mut self, palette: &str, trigger: PaletteTrigger) -> Option<PaletteChange> {
        if self.state != HostState::Running {
            return None;
        }
        let change = self.palette.as_mut()?.observe(palette, trigger)?;
        log::debug!(
            "{} backdrop palette `{}` via {:?} (active: {})",
            self.kind,
            change.palette,
            change.trigger,
            change.active
        );
        if change.active {
            if self.handle.is_none() {
                self.apply_size(false);
                self.schedule();
            }
        } else {
            self.cancel();
            let (w, h) = (self.viewport.width(), self.viewport.height());
            self.canvas.clear_rect(0.0, 0.0, w, h);
        }
        Some(change)
    }

    /// Cancels the pending frame. Safe to call more than once.
    pub fn teardown(&mut self) {
        if self.state == HostState::TornDown {
            return;
        }
        self.cancel();
        self.state = HostState::TornDown;
        log::debug!("{} backdrop torn down", self.kind);
    }

    pub fn state(&self) -> HostState {
        self.state
    }

    pub fn is_scheduled(&self) -> bool {
        self.handle.is_some()
    }

    pub fn clock(&self) -> &PhaseClock {
        &self.clock
    }

    pub fn scene(&self) -> &dyn Scene {
        self.scene.as_ref()
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn visibility(&self) -> &VisibilityGate {
        &self.visibility
    }

    pub fn dividers(&self) -> &[SectionDivider] {
        self.sections.dividers()
    }

    fn palette_allows(&self) -> bool {
        self.palette.as_ref().map_or(true, PaletteWatch::is_active)
    }

    /// Resizes the surface and rebuilds the scene, but only when the size
    /// actually changed unless `force` is set.
    fn apply_size(&mut self, force: bool) {
        if !self.viewport.resize() && !force {
            return;
        }
        let view = self.viewport.snapshot();
        self.canvas.set_size(view.width, view.height);
        self.scene.resize(&view);
    }

    fn schedule(&mut self) {
        if self.handle.is_none() {
            self.handle = self.scheduler.request();
        }
    }

    fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.scheduler.cancel(handle);
        }
    }
}
