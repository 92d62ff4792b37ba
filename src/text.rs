//! Text width estimation from per-character advance widths.
//!
//! No shaping happens here: no kerning, ligatures or bidi. The estimate is
//! good enough to size labels for layout spacing.

use crate::config::GeometryConfig;
use crate::dom::Element;
use crate::parse::parse_number;

/// Advance widths of printable ASCII (`' '..='~'`) in thousandths of an em,
/// taken from Helvetica/Arial metrics.
#[rustfmt::skip]
pub const ADVANCE_WIDTHS: [u16; 95] = [
     278,  278,  355,  556,  556,  889,  667,  191,
     333,  333,  389,  584,  278,  333,  278,  278,
     556,  556,  556,  556,  556,  556,  556,  556,
     556,  556,  278,  278,  584,  584,  584,  556,
    1015,  667,  667,  722,  722,  667,  611,  778,
     722,  278,  500,  667,  556,  833,  722,  778,
     667,  778,  722,  667,  611,  722,  667,  944,
     667,  667,  611,  278,  278,  278,  469,  556,
     333,  556,  556,  500,  556,  556,  278,  556,
     556,  222,  222,  500,  222,  833,  556,  556,
     556,  556,  333,  500,  278,  556,  500,  722,
     500,  500,  500,  334,  260,  334,  584,
];

/// Advance width of `c` as a fraction of the font size, `fallback` for
/// characters outside the table.
pub fn char_ratio(c: char, fallback: f64) -> f64 {
    if (' '..='~').contains(&c) {
        ADVANCE_WIDTHS[(c as usize) - 0x20] as f64 / 1000.0
    } else {
        fallback
    }
}

/// Estimated rendered width of `text` at `font_size` px
pub fn measure_text(text: &str, font_size: f64) -> f64 {
    measure_text_with(text, font_size, &GeometryConfig::default())
}

pub fn measure_text_with(text: &str, font_size: f64, config: &GeometryConfig) -> f64 {
    text.chars()
        .map(|c| char_ratio(c, config.fallback_char_ratio) * font_size)
        .sum()
}

/// `font-size:<n>px` from an inline `style` attribute
pub fn inline_style_font_size(style: &str) -> Option<f64> {
    style.split(';').find_map(|decl| {
        let (key, value) = decl.split_once(':')?;
        if !key.trim().eq_ignore_ascii_case("font-size") {
            return None;
        }
        value.trim().strip_suffix("px")?.trim().parse::<f64>().ok()
    })
}

/// Font size of `el`: inline style, then the `font-size` attribute, then
/// the configured default.
pub fn resolve_font_size(el: &Element) -> f64 {
    resolve_font_size_with(el, &GeometryConfig::default())
}

pub fn resolve_font_size_with(el: &Element, config: &GeometryConfig) -> f64 {
    el.get_attribute("style")
        .and_then(inline_style_font_size)
        .or_else(|| el.get_attribute("font-size").and_then(parse_number))
        .unwrap_or(config.default_font_size)
}
