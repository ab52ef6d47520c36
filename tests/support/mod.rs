#![allow(dead_code)]

use std::cell::Cell;
use std::rc::Rc;

use backdrop_wasm::canvas::RecordingCanvas;
use backdrop_wasm::sections::{Region, RegionSource};
use backdrop_wasm::viewport::{ViewportSource, ViewportState};
use backdrop_wasm::visibility::VisibilityGate;
use backdrop_wasm::{AnimationHost, BackdropConfig, FrameHandle, FrameScheduler, Kind};

/// Page geometry the test can change while a host holds it.
#[derive(Clone)]
pub struct FakeViewport(pub Rc<Cell<ViewportState>>);

impl FakeViewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self(Rc::new(Cell::new(ViewportState {
            width,
            height,
            scroll_y: 0.0,
            document_height: height * 4.0,
        })))
    }

    pub fn set_size(&self, width: f64, height: f64) {
        let mut s = self.0.get();
        s.width = width;
        s.height = height;
        self.0.set(s);
    }

    pub fn set_scroll(&self, scroll_y: f64) {
        let mut s = self.0.get();
        s.scroll_y = scroll_y;
        self.0.set(s);
    }
}

impl ViewportSource for FakeViewport {
    fn size(&self) -> (f64, f64) {
        let s = self.0.get();
        (s.width, s.height)
    }

    fn scroll_y(&self) -> f64 {
        self.0.get().scroll_y
    }

    fn document_height(&self) -> f64 {
        self.0.get().document_height
    }
}

/// Counts outstanding frame requests, like a spy on `requestAnimationFrame`.
#[derive(Clone, Default)]
pub struct FrameSpy {
    pub outstanding: Rc<Cell<i32>>,
    pub requested: Rc<Cell<u32>>,
}

impl FrameSpy {
    /// The browser invoking the pending callback consumes it.
    pub fn fire(&self) {
        if self.outstanding.get() > 0 {
            self.outstanding.set(self.outstanding.get() - 1);
        }
    }
}

pub struct FakeScheduler {
    spy: FrameSpy,
    next: i32,
}

impl FakeScheduler {
    pub fn new(spy: FrameSpy) -> Self {
        Self { spy, next: 0 }
    }
}

impl FrameScheduler for FakeScheduler {
    fn request(&mut self) -> Option<FrameHandle> {
        self.next += 1;
        self.spy.outstanding.set(self.spy.outstanding.get() + 1);
        self.spy.requested.set(self.spy.requested.get() + 1);
        Some(FrameHandle(self.next))
    }

    fn cancel(&mut self, _handle: FrameHandle) {
        self.spy.outstanding.set(self.spy.outstanding.get() - 1);
    }
}

pub struct StaticRegions(pub Vec<Region>);

impl RegionSource for StaticRegions {
    fn regions(&self) -> Vec<Region> {
        self.0.clone()
    }
}

pub fn region(top: f64, height: f64, background: &str) -> Region {
    Region { top, height, background: background.to_string() }
}

pub type TestHost = AnimationHost<RecordingCanvas, FakeScheduler, FakeViewport>;

pub fn host(kind: Kind, viewport: &FakeViewport, spy: &FrameSpy) -> TestHost {
    AnimationHost::new(
        kind,
        &BackdropConfig::default(),
        RecordingCanvas::new(),
        FakeScheduler::new(spy.clone()),
        viewport.clone(),
        VisibilityGate::always_active(),
        fastrand::Rng::with_seed(7),
    )
}

/// One browser frame: the pending callback fires and the host runs.
pub fn tick(host: &mut TestHost, spy: &FrameSpy) {
    spy.fire();
    host.on_frame();
}
