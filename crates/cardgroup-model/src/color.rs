//! HSL colors for card faces and group chrome.

use std::fmt;

/// Saturation shared by both palettes, in percent.
pub const DEFAULT_SATURATION: u8 = 70;
/// Lightness of group backgrounds, in percent.
pub const PASTEL_LIGHTNESS: u8 = 90;
/// Lightness of item faces, in percent.
pub const VIVID_LIGHTNESS: u8 = 60;
/// Background used for groups that were never given one.
pub const NEUTRAL_BACKGROUND: &str = "#f8f9fa";

/// A CSS `hsl()` color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hsl {
    /// Hue in degrees, always below 360.
    pub hue: u16,
    /// Saturation in percent.
    pub saturation: u8,
    /// Lightness in percent.
    pub lightness: u8,
}

impl Hsl {
    #[must_use]
    pub const fn new(hue: u16, saturation: u8, lightness: u8) -> Self {
        Self {
            hue: hue % 360,
            saturation,
            lightness,
        }
    }

    /// Render as a CSS color string.
    #[must_use]
    pub fn to_css(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsl({}, {}%, {}%)",
            self.hue, self.saturation, self.lightness
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_css() {
        let group = Hsl::new(210, DEFAULT_SATURATION, PASTEL_LIGHTNESS);
        let item = Hsl::new(15, DEFAULT_SATURATION, VIVID_LIGHTNESS);
        assert_eq!(group.to_css(), "hsl(210, 70%, 90%)");
        assert_eq!(item.to_css(), "hsl(15, 70%, 60%)");
    }

    #[test]
    fn hue_wraps() {
        assert_eq!(Hsl::new(370, 50, 50).hue, 10);
    }
}
