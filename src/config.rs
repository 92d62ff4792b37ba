//! Tunables for the bounding-box and text estimators

use crate::defaults;

/// Knobs shared by every geometry estimate.
///
/// `GeometryConfig::default()` reproduces the behaviour the emulated DOM
/// methods use when called without a config.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryConfig {
    /// Font size used when nothing on the element resolves one
    pub default_font_size: f64,
    /// Line height as a multiple of the font size
    pub line_height_factor: f64,
    /// Fixed width of wrapped multi-line text
    pub wrap_width: f64,
    /// Advance ratio for characters outside the width table
    pub fallback_char_ratio: f64,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            default_font_size: defaults::FONT_SIZE,
            line_height_factor: defaults::LINE_HEIGHT_FACTOR,
            wrap_width: defaults::WRAP_WIDTH,
            fallback_char_ratio: defaults::FALLBACK_CHAR_RATIO,
        }
    }
}

impl GeometryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_font_size(mut self, size: f64) -> Self {
        self.default_font_size = size;
        self
    }

    pub fn with_line_height_factor(mut self, factor: f64) -> Self {
        self.line_height_factor = factor;
        self
    }

    pub fn with_wrap_width(mut self, width: f64) -> Self {
        self.wrap_width = width;
        self
    }

    pub fn with_fallback_char_ratio(mut self, ratio: f64) -> Self {
        self.fallback_char_ratio = ratio;
        self
    }

    /// Height of one line of text at `font_size`
    pub fn line_height(&self, font_size: f64) -> f64 {
        font_size * self.line_height_factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_constants() {
        let cfg = GeometryConfig::default();
        assert_eq!(cfg.default_font_size, 12.0);
        assert_eq!(cfg.line_height_factor, 1.2);
        assert_eq!(cfg.wrap_width, 200.0);
        assert_eq!(cfg.fallback_char_ratio, 0.6);
    }

    #[test]
    fn builders_override_single_fields() {
        let cfg = GeometryConfig::new().with_wrap_width(320.0).with_default_font_size(16.0);
        assert_eq!(cfg.wrap_width, 320.0);
        assert_eq!(cfg.default_font_size, 16.0);
        assert_eq!(cfg.line_height_factor, 1.2);
        assert!((cfg.line_height(10.0) - 12.0).abs() < 1e-12);
    }
}
