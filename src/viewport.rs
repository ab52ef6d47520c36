/// Where the canvas takes its size from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sizing {
    /// The browser window's inner size.
    Window,
    /// The bounding box of the canvas' parent element.
    Container,
}

/// Live geometry signals. Implementations read the page fresh on every call.
pub trait ViewportSource {
    /// Current `(width, height)` for the configured [`Sizing`].
    fn size(&self) -> (f64, f64);
    fn scroll_y(&self) -> f64;
    fn document_height(&self) -> f64;
}

/// One frame's view of the page. Every renderer in a frame reads the same one.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ViewportState {
    pub width: f64,
    pub height: f64,
    pub scroll_y: f64,
    pub document_height: f64,
}

impl ViewportState {
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    pub fn area(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.width * self.height
        }
    }

    /// Document-space y to viewport-space y.
    pub fn to_screen_y(&self, document_y: f64) -> f64 {
        document_y - self.scroll_y
    }
}

pub struct ViewportTracker<S> {
    source: S,
    width: f64,
    height: f64,
}

impl<S: ViewportSource> ViewportTracker<S> {
    pub fn new(source: S) -> Self {
        let mut tracker = Self { source, width: 0.0, height: 0.0 };
        tracker.resize();
        tracker
    }

    /// Re-reads the size. Returns `true` when it changed, in which case
    /// anything sized from the old dimensions has to be rebuilt.
    pub fn resize(&mut self) -> bool {
        let (w, h) = self.source.size();
        // Backing stores are whole pixels.
        let (w, h) = (sanitize(w).floor(), sanitize(h).floor());
        let changed = w != self.width || h != self.height;
        self.width = w;
        self.height = h;
        changed
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Scroll offset read from the page, never cached.
    pub fn current_scroll_y(&self) -> f64 {
        sanitize(self.source.scroll_y())
    }

    pub fn snapshot(&self) -> ViewportState {
        ViewportState {
            width: self.width,
            height: self.height,
            scroll_y: self.current_scroll_y(),
            document_height: sanitize(self.source.document_height()).max(self.height),
        }
    }
}

fn sanitize(v: f64) -> f64 {
    if v.is_finite() {
        v.max(0.0)
    } else {
        0.0
    }
}
