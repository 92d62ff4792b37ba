//! Tag-dispatched bounding-box estimation.
//!
//! Each supported tag maps to one [`ShapeKind`] variant holding a unit rule
//! type. A rule reads the element's attributes and returns a box; containers
//! recurse into their children. Nothing here renders or caches anything.

use enum_dispatch::enum_dispatch;

use crate::config::GeometryConfig;
use crate::dom::Element;
use crate::log::{debug, trace};
use crate::parse::{pair_up, parse_number, parse_point_list, scan_numbers};
use crate::text::{measure_text_with, resolve_font_size_with};

/// Axis-aligned box in user units. All zero is the "nothing here" sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub const ZERO: BoundingBox = BoundingBox {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Extents of `points`; zero box when there are none
    pub fn from_points(points: &[(f64, f64)]) -> Self {
        let mut extents = Extents::new();
        for &(x, y) in points {
            extents.expand_point(x, y);
        }
        extents.to_box()
    }

    /// Both dimensions are zero, regardless of position
    pub fn is_empty(&self) -> bool {
        self.width == 0.0 && self.height == 0.0
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Smallest box covering both
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        BoundingBox::new(
            x,
            y,
            self.right().max(other.right()) - x,
            self.bottom().max(other.bottom()) - y,
        )
    }
}

/// Running min/max accumulator
#[derive(Debug, Clone, Copy)]
struct Extents {
    min: (f64, f64),
    max: (f64, f64),
}

impl Extents {
    fn new() -> Self {
        Self {
            min: (f64::MAX, f64::MAX),
            max: (f64::MIN, f64::MIN),
        }
    }

    /// Never expanded
    fn is_unset(&self) -> bool {
        self.min.0 > self.max.0 || self.min.1 > self.max.1
    }

    fn expand_point(&mut self, x: f64, y: f64) {
        self.min.0 = self.min.0.min(x);
        self.min.1 = self.min.1.min(y);
        self.max.0 = self.max.0.max(x);
        self.max.1 = self.max.1.max(y);
    }

    fn to_box(self) -> BoundingBox {
        if self.is_unset() {
            return BoundingBox::ZERO;
        }
        BoundingBox::new(
            self.min.0,
            self.min.1,
            self.max.0 - self.min.0,
            self.max.1 - self.min.1,
        )
    }
}

/// Numeric attribute, 0 when missing or unparseable
fn num_attr(el: &Element, name: &str) -> f64 {
    el.get_attribute(name).and_then(parse_number).unwrap_or(0.0)
}

/// One bounding-box formula
#[enum_dispatch]
pub trait BBoxRule {
    fn bbox(&self, el: &Element, config: &GeometryConfig) -> BoundingBox;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RectRule;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CircleRule;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EllipseRule;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineRule;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PolygonRule;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PolylineRule;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PathRule;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextRule;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TspanRule;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GroupRule;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SvgRule;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnknownRule;

/// Shape kind of an element, picked from its tag
#[enum_dispatch(BBoxRule)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Rect(RectRule),
    Circle(CircleRule),
    Ellipse(EllipseRule),
    Line(LineRule),
    Polygon(PolygonRule),
    Polyline(PolylineRule),
    Path(PathRule),
    Text(TextRule),
    Tspan(TspanRule),
    Group(GroupRule),
    Svg(SvgRule),
    Unknown(UnknownRule),
}

impl ShapeKind {
    /// Case-insensitive tag lookup; anything unsupported is `Unknown`
    pub fn from_tag(tag: &str) -> Self {
        match tag.to_ascii_lowercase().as_str() {
            "rect" => RectRule.into(),
            "circle" => CircleRule.into(),
            "ellipse" => EllipseRule.into(),
            "line" => LineRule.into(),
            "polygon" => PolygonRule.into(),
            "polyline" => PolylineRule.into(),
            "path" => PathRule.into(),
            "text" => TextRule.into(),
            "tspan" => TspanRule.into(),
            "g" => GroupRule.into(),
            "svg" => SvgRule.into(),
            _ => UnknownRule.into(),
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(self, ShapeKind::Group(_) | ShapeKind::Svg(_))
    }
}

impl BBoxRule for RectRule {
    fn bbox(&self, el: &Element, _config: &GeometryConfig) -> BoundingBox {
        BoundingBox::new(
            num_attr(el, "x"),
            num_attr(el, "y"),
            num_attr(el, "width"),
            num_attr(el, "height"),
        )
    }
}

impl BBoxRule for CircleRule {
    fn bbox(&self, el: &Element, _config: &GeometryConfig) -> BoundingBox {
        let r = num_attr(el, "r");
        BoundingBox::new(num_attr(el, "cx") - r, num_attr(el, "cy") - r, 2.0 * r, 2.0 * r)
    }
}

impl BBoxRule for EllipseRule {
    fn bbox(&self, el: &Element, _config: &GeometryConfig) -> BoundingBox {
        let rx = num_attr(el, "rx");
        let ry = num_attr(el, "ry");
        BoundingBox::new(
            num_attr(el, "cx") - rx,
            num_attr(el, "cy") - ry,
            2.0 * rx,
            2.0 * ry,
        )
    }
}

impl BBoxRule for LineRule {
    fn bbox(&self, el: &Element, _config: &GeometryConfig) -> BoundingBox {
        let (x1, y1) = (num_attr(el, "x1"), num_attr(el, "y1"));
        let (x2, y2) = (num_attr(el, "x2"), num_attr(el, "y2"));
        BoundingBox::new(x1.min(x2), y1.min(y2), (x2 - x1).abs(), (y2 - y1).abs())
    }
}

fn points_bbox(el: &Element) -> BoundingBox {
    let points = el
        .get_attribute("points")
        .and_then(parse_point_list)
        .unwrap_or_default();
    BoundingBox::from_points(&points)
}

impl BBoxRule for PolygonRule {
    fn bbox(&self, el: &Element, _config: &GeometryConfig) -> BoundingBox {
        points_bbox(el)
    }
}

impl BBoxRule for PolylineRule {
    fn bbox(&self, el: &Element, _config: &GeometryConfig) -> BoundingBox {
        points_bbox(el)
    }
}

/// Every number in `d` is treated as a coordinate, pairwise, whatever the
/// command. Arcs, relative commands and curve control points are not
/// interpreted, so the box can be loose or off for those.
impl BBoxRule for PathRule {
    fn bbox(&self, el: &Element, _config: &GeometryConfig) -> BoundingBox {
        let numbers = el.get_attribute("d").map(scan_numbers).unwrap_or_default();
        BoundingBox::from_points(&pair_up(&numbers))
    }
}

fn text_bbox(el: &Element, config: &GeometryConfig) -> BoundingBox {
    let font_size = resolve_font_size_with(el, config);
    let x = num_attr(el, "x");
    let y = num_attr(el, "y") - font_size;

    let lines = el.query_selector_all("tspan").len();
    if lines > 1 {
        trace!(lines, "wrapped text box");
        let height = lines as f64 * config.line_height(font_size);
        return BoundingBox::new(x, y, config.wrap_width, height);
    }

    let width = measure_text_with(&el.text_content(), font_size, config);
    BoundingBox::new(x, y, width, config.line_height(font_size))
}

impl BBoxRule for TextRule {
    fn bbox(&self, el: &Element, config: &GeometryConfig) -> BoundingBox {
        text_bbox(el, config)
    }
}

impl BBoxRule for TspanRule {
    fn bbox(&self, el: &Element, config: &GeometryConfig) -> BoundingBox {
        text_bbox(el, config)
    }
}

/// Union of the non-empty child element boxes
fn children_bbox(el: &Element, config: &GeometryConfig) -> BoundingBox {
    el.children()
        .map(|child| child.get_bbox_with(config))
        .filter(|b| !b.is_empty())
        .reduce(|acc, b| acc.union(&b))
        .unwrap_or(BoundingBox::ZERO)
}

impl BBoxRule for GroupRule {
    fn bbox(&self, el: &Element, config: &GeometryConfig) -> BoundingBox {
        children_bbox(el, config)
    }
}

impl BBoxRule for SvgRule {
    fn bbox(&self, el: &Element, config: &GeometryConfig) -> BoundingBox {
        children_bbox(el, config)
    }
}

impl BBoxRule for UnknownRule {
    fn bbox(&self, _el: &Element, _config: &GeometryConfig) -> BoundingBox {
        debug!(tag = _el.tag_name(), "no bbox rule for tag");
        BoundingBox::ZERO
    }
}
