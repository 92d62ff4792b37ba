//! Headless SVG geometry.
//!
//! Emulates the part of the SVG DOM geometry API a diagramming library
//! expects on every element (`getBBox`, `getComputedTextLength`,
//! `getScreenCTM`, `createSVGMatrix`, `createSVGTransform` and the live
//! `transform` list) without a rendering engine.
//!
//! ```
//! use svgshim::{Document, TransformItem};
//!
//! let mut doc = Document::parse(
//!     r#"<svg><g id="node"><rect width="100" height="50"/></g></svg>"#,
//! )?;
//! let node = doc.get_element_by_id_mut("node").unwrap();
//! assert_eq!(node.get_bbox().width, 100.0);
//!
//! node.transform().base_val().append_item(TransformItem::translate(5.0, 5.0));
//! assert_eq!(node.get_attribute("transform"), Some("translate(5, 5)"));
//! # Ok::<(), svgshim::ParseError>(())
//! ```

pub mod bbox;
pub mod config;
pub mod defaults;
pub mod dom;
pub mod errors;
pub mod log;
pub mod matrix;
pub mod parse;
pub mod text;
pub mod transform;

pub use bbox::{BBoxRule, BoundingBox, ShapeKind};
pub use config::GeometryConfig;
pub use dom::{Attributes, Document, Element, Node};
pub use errors::{ParseError, Result, SourceContext};
pub use matrix::{AffineMatrix, create_svg_matrix};
pub use text::{measure_text, measure_text_with};
pub use transform::{
    AnimatedTransformList, TransformItem, TransformKind, TransformList, TransformListMut,
    create_svg_transform, create_svg_transform_from_matrix,
};
