//! Default sizes and tolerances used when an element does not say otherwise

/// Font size in px when neither inline style nor `font-size` attribute set one
pub const FONT_SIZE: f64 = 12.0;

/// Line box height as a multiple of the font size
pub const LINE_HEIGHT_FACTOR: f64 = 1.2;

/// Width reported for multi-line (`tspan`-wrapped) text, which is laid out
/// as a table cell of fixed width
pub const WRAP_WIDTH: f64 = 200.0;

/// Advance ratio for characters missing from the width table
pub const FALLBACK_CHAR_RATIO: f64 = 0.6;

/// Determinants smaller than this are treated as singular
pub const SINGULAR_EPSILON: f64 = 1e-10;

/// Coefficients smaller than this are written out as `0`
pub const DISPLAY_EPSILON: f64 = 1e-12;
