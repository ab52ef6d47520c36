use std::fmt;
use std::str::FromStr;

use crate::error::{BackdropError, Result};
use crate::particles::{Anchor, FieldParams};
use crate::viewport::Sizing;

/// The backdrop variants a canvas can host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// Bubbles and section dividers that follow the document scroll.
    Waves,
    /// Bubbles and one wave stack pinned to the window.
    FixedWaves,
    /// Velvet texture, shown only under the gated palette.
    Fabric,
    /// Silk overlay sized to its container, shown only under the gated palette.
    Silk,
}

impl Kind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Waves => "waves",
            Kind::FixedWaves => "fixed-waves",
            Kind::Fabric => "fabric",
            Kind::Silk => "silk",
        }
    }

    pub fn sizing(&self) -> Sizing {
        match self {
            Kind::Silk => Sizing::Container,
            _ => Sizing::Window,
        }
    }

    /// Whether the backdrop only runs while a particular palette is active.
    pub fn is_palette_gated(&self) -> bool {
        matches!(self, Kind::Fabric | Kind::Silk)
    }

    pub fn uses_sections(&self) -> bool {
        matches!(self, Kind::Waves)
    }

    pub fn anchor(&self) -> Anchor {
        match self {
            Kind::FixedWaves => Anchor::Viewport,
            _ => Anchor::Document,
        }
    }
}

impl FromStr for Kind {
    type Err = BackdropError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "waves" | "ocean" => Ok(Kind::Waves),
            "fixed-waves" | "fixed" => Ok(Kind::FixedWaves),
            "fabric" | "velvet" => Ok(Kind::Fabric),
            "silk" => Ok(Kind::Silk),
            _ => Err(BackdropError::UnknownKind(s.to_string())),
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tunables shared by every backdrop.
#[derive(Debug, Clone, PartialEq)]
pub struct BackdropConfig {
    /// Square pixels per bubble.
    pub particle_density: f64,
    pub spawn_margin: f64,
    pub band_margin: f64,
    pub cull_margin: f64,
    /// Regions taller than this always get a divider.
    pub section_height_threshold: f64,
    pub section_selector: String,
    pub section_rescan_ms: i32,
    pub palette_poll_ms: i32,
    pub theme_attribute: String,
    pub theme_storage_key: String,
    /// Palette the gated backdrops render under.
    pub gated_palette: String,
}

impl Default for BackdropConfig {
    fn default() -> Self {
        let field = FieldParams::default();
        Self {
            particle_density: field.density,
            spawn_margin: field.spawn_margin,
            band_margin: field.band_margin,
            cull_margin: field.cull_margin,
            section_height_threshold: crate::sections::DEFAULT_HEIGHT_THRESHOLD,
            section_selector: "section, [data-section]".to_string(),
            section_rescan_ms: 1000,
            palette_poll_ms: 100,
            theme_attribute: "data-color-theme".to_string(),
            theme_storage_key: "colorTheme".to_string(),
            gated_palette: "velvet".to_string(),
        }
    }
}

impl BackdropConfig {
    pub fn field_params(&self, anchor: Anchor) -> FieldParams {
        FieldParams {
            anchor,
            density: self.particle_density,
            spawn_margin: self.spawn_margin,
            band_margin: self.band_margin,
            cull_margin: self.cull_margin,
        }
    }

    /// Applies one `data-*` style override, e.g. `("density", "30000")`.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let invalid = || BackdropError::InvalidSetting {
            key: key.to_string(),
            value: value.to_string(),
        };
        let positive = || -> Result<f64> {
            value.trim().parse::<f64>().ok().filter(|v| *v > 0.0).ok_or_else(invalid)
        };
        let millis = || -> Result<i32> {
            value.trim().parse::<i32>().ok().filter(|v| *v >= 1).ok_or_else(invalid)
        };
        match key {
            "density" => self.particle_density = positive()?,
            "section-threshold" => self.section_height_threshold = positive()?,
            "section-selector" if !value.trim().is_empty() => {
                self.section_selector = value.trim().to_string()
            }
            "palette" if !value.trim().is_empty() => self.gated_palette = value.trim().to_string(),
            "poll-ms" => self.palette_poll_ms = millis()?,
            "rescan-ms" => self.section_rescan_ms = millis()?,
            _ => return Err(invalid()),
        }
        Ok(())
    }
}
