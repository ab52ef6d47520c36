use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use fastrand::Rng;
use wasm_bindgen::prelude::*;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{window, Element, Event, EventTarget, HtmlCanvasElement, MutationObserver, MutationObserverInit, Window};

use super::dom::{apply_overrides, initial_visibility, read_palette, DomRegions, DomViewport};
use super::render::WebCanvas;
use crate::config::{BackdropConfig, Kind};
use crate::error::{BackdropError, Result};
use crate::host::{AnimationHost, FrameHandle, FrameScheduler, HostState};
use crate::theme::PaletteTrigger;

type WebHost = AnimationHost<WebCanvas, RafScheduler, DomViewport>;

// `FrameSlot` holds the animation-frame closure so the scheduler can keep
// handing it back to `request_animation_frame`. It is filled after the host
// exists, since the closure needs a reference to the host.
type FrameSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

thread_local! {
    static AUTOMOUNTED: RefCell<Vec<Backdrop>> = RefCell::new(Vec::new());
    static LIVE_REGISTRATIONS: Cell<usize> = const { Cell::new(0) };
}

pub struct RafScheduler {
    window: Window,
    callback: FrameSlot,
}

impl FrameScheduler for RafScheduler {
    fn request(&mut self) -> Option<FrameHandle> {
        let slot = self.callback.borrow();
        let callback = slot.as_ref()?;
        self.window
            .request_animation_frame(callback.as_ref().unchecked_ref())
            .ok()
            .map(FrameHandle)
    }

    fn cancel(&mut self, handle: FrameHandle) {
        let _ = self.window.cancel_animation_frame(handle.0);
    }
}

/// A listener, interval or observer that is released when dropped.
enum Registration {
    Listener {
        target: EventTarget,
        event: &'static str,
        callback: Closure<dyn FnMut(Event)>,
    },
    Interval {
        window: Window,
        id: i32,
        _callback: Closure<dyn FnMut()>,
    },
    Observer {
        observer: MutationObserver,
        _callback: Closure<dyn FnMut(js_sys::Array, MutationObserver)>,
    },
}

impl Registration {
    fn listen(target: &EventTarget, event: &'static str, mut f: impl FnMut() + 'static) -> Result<Self> {
        let callback = Closure::wrap(Box::new(move |_: Event| f()) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        Ok(Self::Listener { target: target.clone(), event, callback }.counted())
    }

    fn every(window: &Window, ms: i32, f: impl FnMut() + 'static) -> Result<Self> {
        let callback = Closure::wrap(Box::new(f) as Box<dyn FnMut()>);
        let id = window.set_interval_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            ms,
        )?;
        Ok(Self::Interval { window: window.clone(), id, _callback: callback }.counted())
    }

    fn on_attribute(target: &Element, attribute: &str, mut f: impl FnMut() + 'static) -> Result<Self> {
        let callback = Closure::wrap(
            Box::new(move |_: js_sys::Array, _: MutationObserver| f())
                as Box<dyn FnMut(js_sys::Array, MutationObserver)>,
        );
        let observer = MutationObserver::new(callback.as_ref().unchecked_ref())?;
        let init = MutationObserverInit::new();
        init.set_attributes(true);
        init.set_attribute_filter(&js_sys::Array::of1(&JsValue::from_str(attribute)));
        observer.observe_with_options(target, &init)?;
        Ok(Self::Observer { observer, _callback: callback }.counted())
    }

    fn counted(self) -> Self {
        LIVE_REGISTRATIONS.with(|n| n.set(n.get() + 1));
        self
    }
}

impl Drop for Registration {
    fn drop(&mut self) {
        match self {
            Self::Listener { target, event, callback } => {
                let _ = target.remove_event_listener_with_callback(event, callback.as_ref().unchecked_ref());
            }
            Self::Interval { window, id, .. } => window.clear_interval_with_handle(*id),
            Self::Observer { observer, .. } => observer.disconnect(),
        }
        LIVE_REGISTRATIONS.with(|n| n.set(n.get().saturating_sub(1)));
    }
}

/// A running host plus every browser resource wired to it.
struct Mounted {
    host: Rc<RefCell<WebHost>>,
    frame: FrameSlot,
    registrations: Vec<Registration>,
}

impl Drop for Mounted {
    fn drop(&mut self) {
        if let Ok(mut host) = self.host.try_borrow_mut() {
            host.teardown();
        }
        self.registrations.clear();
        self.frame.borrow_mut().take();
    }
}

/// Wraps a host call for use in an event callback. Holds the host weakly and
/// skips the call if the host is gone or already borrowed.
fn on_host(host: &Rc<RefCell<WebHost>>, mut f: impl FnMut(&mut WebHost) + 'static) -> impl FnMut() + 'static {
    let host: Weak<RefCell<WebHost>> = Rc::downgrade(host);
    move || {
        if let Some(host) = host.upgrade() {
            if let Ok(mut host) = host.try_borrow_mut() {
                f(&mut host);
            }
        }
    }
}

/// Handle to a mounted backdrop. Dropping it (or calling `teardown`) removes
/// every listener, interval and observer and cancels the pending frame.
#[wasm_bindgen]
pub struct Backdrop {
    kind: Kind,
    inner: Option<Mounted>,
}

#[wasm_bindgen]
impl Backdrop {
    pub fn teardown(&mut self) {
        if self.inner.take().is_some() {
            log::debug!("{} backdrop released", self.kind);
        }
    }

    pub fn is_running(&self) -> bool {
        self.inner
            .as_ref()
            .and_then(|m| m.host.try_borrow().ok().map(|h| h.state() == HostState::Running))
            .unwrap_or(false)
    }

    /// Whether a frame callback is pending. Gated backdrops stop asking for
    /// frames while their palette is inactive.
    pub fn is_animating(&self) -> bool {
        self.inner
            .as_ref()
            .and_then(|m| m.host.try_borrow().ok().map(|h| h.is_scheduled()))
            .unwrap_or(false)
    }

    pub fn kind(&self) -> String {
        self.kind.to_string()
    }
}

/// Listeners, intervals and observers currently held by mounted backdrops.
#[wasm_bindgen]
pub fn live_registrations() -> usize {
    LIVE_REGISTRATIONS.with(Cell::get)
}

/// Mounts a backdrop of `kind` on the canvas with id `canvas_id`. Returns
/// nothing when the canvas or its 2d context is unavailable.
#[wasm_bindgen]
pub fn mount_backdrop(canvas_id: &str, kind: &str) -> Option<Backdrop> {
    let mounted = kind
        .parse::<Kind>()
        .and_then(|kind| find_canvas(canvas_id).and_then(|canvas| mount_canvas(canvas, kind)));
    match mounted {
        Ok(backdrop) => Some(backdrop),
        Err(err) => {
            log::debug!("backdrop on `{canvas_id}` not mounted: {err}");
            None
        }
    }
}

/// Tears down everything [`mount_all`] started.
#[wasm_bindgen]
pub fn unmount_all() {
    let released = AUTOMOUNTED.with(|list| std::mem::take(&mut *list.borrow_mut()));
    log::debug!("released {} auto-mounted backdrops", released.len());
}

/// Mounts every `canvas[data-backdrop]` on the page.
pub fn mount_all() -> std::result::Result<usize, JsValue> {
    let document = window()
        .ok_or("no window")?
        .document()
        .ok_or("no document")?;
    let nodes = document.query_selector_all("canvas[data-backdrop]")?;

    let mut count = 0;
    for i in 0..nodes.length() {
        let Some(canvas) = nodes.item(i).and_then(|n| n.dyn_into::<HtmlCanvasElement>().ok()) else {
            continue;
        };
        let kind = canvas.get_attribute("data-backdrop").unwrap_or_default();
        match kind.parse::<Kind>().and_then(|kind| mount_canvas(canvas, kind)) {
            Ok(backdrop) => {
                AUTOMOUNTED.with(|list| list.borrow_mut().push(backdrop));
                count += 1;
            }
            Err(err) => log::debug!("skipping canvas: {err}"),
        }
    }
    Ok(count)
}

fn find_canvas(id: &str) -> Result<HtmlCanvasElement> {
    let document = window()
        .ok_or(BackdropError::NoWindow)?
        .document()
        .ok_or(BackdropError::NoDocument)?;
    document
        .get_element_by_id(id)
        .ok_or_else(|| BackdropError::CanvasNotFound(id.to_string()))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| BackdropError::NotACanvas(id.to_string()))
}

fn mount_canvas(canvas: HtmlCanvasElement, kind: Kind) -> Result<Backdrop> {
    let window = window().ok_or(BackdropError::NoWindow)?;
    let document = window.document().ok_or(BackdropError::NoDocument)?;

    let mut config = BackdropConfig::default();
    apply_overrides(&canvas, &mut config);
    let config = Rc::new(config);

    let surface = WebCanvas::new(canvas.clone())?;
    let frame: FrameSlot = Rc::new(RefCell::new(None));
    let scheduler = RafScheduler { window: window.clone(), callback: frame.clone() };
    let viewport = DomViewport::new(window.clone(), canvas, kind.sizing());
    let mut host = AnimationHost::new(
        kind,
        &config,
        surface,
        scheduler,
        viewport,
        initial_visibility(&document),
        Rng::new(),
    );
    if kind.uses_sections() {
        host = host.with_regions(Box::new(DomRegions::new(window.clone(), config.section_selector.clone())));
    }
    let host = Rc::new(RefCell::new(host));
    *frame.borrow_mut() = Some(Closure::wrap(Box::new(on_host(&host, |h| h.on_frame())) as Box<dyn FnMut()>));

    // From here on, dropping `mounted` on an error path releases whatever was
    // registered so far.
    let mut mounted = Mounted { host: host.clone(), frame, registrations: Vec::new() };
    let regs = &mut mounted.registrations;

    regs.push(Registration::listen(&window, "resize", on_host(&host, |h| h.on_resize()))?);
    regs.push(Registration::listen(&window, "blur", on_host(&host, |h| h.on_blur()))?);
    regs.push(Registration::listen(&window, "focus", on_host(&host, |h| h.on_focus()))?);
    {
        let doc = document.clone();
        regs.push(Registration::listen(
            &document,
            "visibilitychange",
            on_host(&host, move |h| h.on_visibility_change(doc.hidden())),
        )?);
    }

    if kind.uses_sections() {
        regs.push(Registration::listen(&window, "scroll", on_host(&host, |h| h.on_scroll()))?);
        regs.push(Registration::every(
            &window,
            config.section_rescan_ms,
            on_host(&host, |h| h.on_section_timer()),
        )?);
    }

    if kind.is_palette_gated() {
        let root = document.document_element().ok_or(BackdropError::NoDocument)?;
        let check = |trigger: PaletteTrigger| {
            let (window, config) = (window.clone(), config.clone());
            on_host(&host, move |h| {
                h.on_palette(&read_palette(&window, &config), trigger);
            })
        };
        regs.push(Registration::on_attribute(&root, &config.theme_attribute, check(PaletteTrigger::Mutation))?);
        regs.push(Registration::listen(&window, "storage", check(PaletteTrigger::Storage))?);
        regs.push(Registration::every(&window, config.palette_poll_ms, check(PaletteTrigger::Poll))?);
    }

    {
        let mut host = host.borrow_mut();
        host.mount();
        host.on_palette(&read_palette(&window, &config), PaletteTrigger::Initial);
    }
    log::debug!("{kind} backdrop wired with {} registrations", mounted.registrations.len());

    Ok(Backdrop { kind, inner: Some(mounted) })
}
