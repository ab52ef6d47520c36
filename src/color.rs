use std::fmt;

/// 8-bit RGB with a floating point alpha, the same shape as a CSS `rgba()`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub const fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }

    /// Alpha quantised to a byte, as a `#rrggbbaa` suffix would carry it.
    pub fn with_alpha_byte(self, opacity: f64) -> Self {
        let byte = (opacity.clamp(0.0, 1.0) * 255.0).floor();
        self.with_alpha(byte / 255.0)
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alpha_byte_matches_hex_suffix() {
        // 0.15 * 255 = 38.25 -> 0x26
        let c = Rgba::rgb(0, 212, 255).with_alpha_byte(0.15);
        assert_eq!(c.a, 38.0 / 255.0);
        assert_eq!(c.to_string(), format!("rgba(0, 212, 255, {})", 38.0 / 255.0));
    }
}
