//! Active palette tracking.
//!
//! The palette id is published by other parts of the page through a document
//! attribute, with a persisted storage entry as fallback. Several delivery
//! paths report it (attribute mutations, storage events from other tabs and
//! a slow poll) and all of them feed [`PaletteWatch::observe`], which drops
//! repeats so the host only reacts to real changes.

pub const DEFAULT_PALETTE: &str = "default";

/// How a palette reading reached the watch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteTrigger {
    Initial,
    Mutation,
    Storage,
    Poll,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteChange {
    pub palette: String,
    pub active: bool,
    pub trigger: PaletteTrigger,
}

/// Attribute first, then storage, then [`DEFAULT_PALETTE`]. Empty values
/// count as absent.
pub fn resolve_palette(attribute: Option<String>, stored: Option<String>) -> String {
    attribute
        .filter(|v| !v.is_empty())
        .or_else(|| stored.filter(|v| !v.is_empty()))
        .unwrap_or_else(|| DEFAULT_PALETTE.to_string())
}

#[derive(Debug, Clone)]
pub struct PaletteWatch {
    target: String,
    current: Option<String>,
}

impl PaletteWatch {
    /// Watches for `target`. Nothing is active until the first observation.
    pub fn new(target: impl Into<String>) -> Self {
        Self { target: target.into(), current: None }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn is_active(&self) -> bool {
        self.current.as_deref() == Some(self.target.as_str())
    }

    /// Records a reading. Returns `None` if it matches the previous one.
    pub fn observe(&mut self, palette: &str, trigger: PaletteTrigger) -> Option<PaletteChange> {
        if self.current.as_deref() == Some(palette) {
            return None;
        }
        self.current = Some(palette.to_string());
        Some(PaletteChange {
            palette: palette.to_string(),
            active: self.is_active(),
            trigger,
        })
    }
}
