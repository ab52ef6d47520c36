use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlCanvasElement, Window};

use crate::config::BackdropConfig;
use crate::sections::{Region, RegionSource};
use crate::theme::resolve_palette;
use crate::viewport::{Sizing, ViewportSource};
use crate::visibility::VisibilityGate;

/// Settings a canvas may override through `data-*` attributes.
const OVERRIDES: [&str; 6] = [
    "density",
    "section-threshold",
    "section-selector",
    "palette",
    "poll-ms",
    "rescan-ms",
];

pub struct DomViewport {
    window: Window,
    canvas: HtmlCanvasElement,
    sizing: Sizing,
}

impl DomViewport {
    pub fn new(window: Window, canvas: HtmlCanvasElement, sizing: Sizing) -> Self {
        Self { window, canvas, sizing }
    }
}

fn as_f64(value: Result<JsValue, JsValue>) -> f64 {
    value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
}

impl ViewportSource for DomViewport {
    fn size(&self) -> (f64, f64) {
        match self.sizing {
            Sizing::Window => (
                as_f64(self.window.inner_width()),
                as_f64(self.window.inner_height()),
            ),
            Sizing::Container => match self.canvas.parent_element() {
                Some(parent) => {
                    let rect = parent.get_bounding_client_rect();
                    (rect.width(), rect.height())
                }
                None => (0.0, 0.0),
            },
        }
    }

    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn document_height(&self) -> f64 {
        self.window
            .document()
            .and_then(|d| d.document_element())
            .map(|root| root.scroll_height() as f64)
            .unwrap_or(0.0)
    }
}

/// Page regions matched by a CSS selector, measured in document space.
pub struct DomRegions {
    window: Window,
    selector: String,
}

impl DomRegions {
    pub fn new(window: Window, selector: String) -> Self {
        Self { window, selector }
    }

    fn measure(&self, element: &Element, scroll_y: f64) -> Region {
        let rect = element.get_bounding_client_rect();
        let background = self
            .window
            .get_computed_style(element)
            .ok()
            .flatten()
            .and_then(|style| style.get_property_value("background-color").ok())
            .unwrap_or_default();
        Region { top: rect.top() + scroll_y, height: rect.height(), background }
    }
}

impl RegionSource for DomRegions {
    fn regions(&self) -> Vec<Region> {
        let Some(document) = self.window.document() else {
            return Vec::new();
        };
        let Ok(nodes) = document.query_selector_all(&self.selector) else {
            log::debug!("section selector `{}` rejected", self.selector);
            return Vec::new();
        };
        let scroll_y = self.window.scroll_y().unwrap_or(0.0);
        (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .map(|element| self.measure(&element, scroll_y))
            .collect()
    }
}

/// The palette id other components published, or the default.
pub fn read_palette(window: &Window, config: &BackdropConfig) -> String {
    let attribute = window
        .document()
        .and_then(|d| d.document_element())
        .and_then(|root| root.get_attribute(&config.theme_attribute));
    let stored = window
        .local_storage()
        .ok()
        .flatten()
        .and_then(|storage| storage.get_item(&config.theme_storage_key).ok().flatten());
    resolve_palette(attribute, stored)
}

pub fn initial_visibility(document: &Document) -> VisibilityGate {
    VisibilityGate::new(document.hidden(), document.has_focus().unwrap_or(true))
}

/// Applies `data-density="..."` and friends from the canvas element.
pub fn apply_overrides(canvas: &HtmlCanvasElement, config: &mut BackdropConfig) {
    for key in OVERRIDES {
        if let Some(value) = canvas.get_attribute(&format!("data-{key}")) {
            if let Err(err) = config.set(key, &value) {
                log::warn!("ignoring canvas override: {err}");
            }
        }
    }
}
