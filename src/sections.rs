//! Page section boundaries where a wave divider is drawn.

/// A top-level layout block as measured on the page.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    /// Top edge in document space.
    pub top: f64,
    pub height: f64,
    /// Computed background colour, compared verbatim.
    pub background: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionDivider {
    /// Document-space y of the boundary.
    pub y: f64,
    pub inverted: bool,
}

pub trait RegionSource {
    fn regions(&self) -> Vec<Region>;
}

pub const DEFAULT_HEIGHT_THRESHOLD: f64 = 200.0;

#[derive(Debug)]
pub struct SectionBoundaryLocator {
    threshold: f64,
    dividers: Vec<SectionDivider>,
    dirty: bool,
}

impl SectionBoundaryLocator {
    pub fn new(threshold: f64) -> Self {
        Self { threshold, dividers: Vec::new(), dirty: true }
    }

    /// Replaces the divider list from a fresh set of regions.
    pub fn locate(&mut self, regions: &[Region]) -> &[SectionDivider] {
        let mut ordered: Vec<&Region> = regions.iter().collect();
        ordered.sort_by(|a, b| a.top.total_cmp(&b.top));

        self.dividers = ordered
            .windows(2)
            .enumerate()
            .filter_map(|(i, pair)| {
                let (prev, region) = (pair[0], pair[1]);
                let index = i + 1;
                let differs = region.background != prev.background;
                (differs || region.height > self.threshold).then_some(SectionDivider {
                    y: region.top,
                    inverted: index % 2 == 0,
                })
            })
            .collect();
        self.dirty = false;
        &self.dividers
    }

    /// Flags the list as stale; the next [`refresh`](Self::refresh) re-queries.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Re-locates only when marked dirty, so the page is measured at most
    /// once per frame no matter how many scroll events arrived.
    pub fn refresh(&mut self, source: &dyn RegionSource) -> &[SectionDivider] {
        if self.dirty {
            let regions = source.regions();
            self.locate(&regions);
        }
        &self.dividers
    }

    pub fn dividers(&self) -> &[SectionDivider] {
        &self.dividers
    }
}

impl Default for SectionBoundaryLocator {
    fn default() -> Self {
        Self::new(DEFAULT_HEIGHT_THRESHOLD)
    }
}
