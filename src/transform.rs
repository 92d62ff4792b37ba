//! Live transform lists, the headless stand-in for `SVGTransformList`.
//!
//! A [`TransformList`] belongs to exactly one [`Element`](crate::dom::Element)
//! and is created the first time the element's `transform` is touched. All
//! mutation goes through [`TransformListMut`], which borrows both the list and
//! the element's attributes and rewrites the `transform` attribute after every
//! call, so the list and the raw attribute never disagree.

use std::fmt;

use crate::dom::Attributes;
use crate::log::{debug, trace};
use crate::matrix::AffineMatrix;
use crate::parse::{TransformFn, parse_transform_list};

/// `SVGTransform.type`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransformKind {
    #[default]
    Unknown,
    Matrix,
    Translate,
    Scale,
    Rotate,
}

impl TransformKind {
    /// Numeric code used by the DOM (`SVG_TRANSFORM_*`)
    pub fn code(self) -> u16 {
        match self {
            TransformKind::Unknown => 0,
            TransformKind::Matrix => 1,
            TransformKind::Translate => 2,
            TransformKind::Scale => 3,
            TransformKind::Rotate => 4,
        }
    }
}

/// One entry of a transform list.
///
/// The owned matrix is authoritative; `angle` and `center` only record how
/// a rotation was built.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TransformItem {
    kind: TransformKind,
    matrix: AffineMatrix,
    angle: f64,
    center: (f64, f64),
}

impl TransformItem {
    /// Identity item of kind `Matrix`, as `createSVGTransform()` returns
    pub fn new() -> Self {
        Self::from_matrix(AffineMatrix::IDENTITY)
    }

    pub fn from_matrix(matrix: AffineMatrix) -> Self {
        let mut item = Self::default();
        item.set_matrix(matrix);
        item
    }

    pub fn translate(tx: f64, ty: f64) -> Self {
        let mut item = Self::default();
        item.set_translate(tx, ty);
        item
    }

    pub fn scale(sx: f64, sy: f64) -> Self {
        let mut item = Self::default();
        item.set_scale(sx, sy);
        item
    }

    pub fn rotate(angle: f64, cx: f64, cy: f64) -> Self {
        let mut item = Self::default();
        item.set_rotate(angle, cx, cy);
        item
    }

    pub fn kind(&self) -> TransformKind {
        self.kind
    }

    pub fn matrix(&self) -> AffineMatrix {
        self.matrix
    }

    /// Rotation angle in degrees; 0 unless the item is a rotation
    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn center(&self) -> (f64, f64) {
        self.center
    }

    pub fn set_translate(&mut self, tx: f64, ty: f64) {
        self.kind = TransformKind::Translate;
        self.matrix = AffineMatrix::translation(tx, ty);
        self.angle = 0.0;
        self.center = (0.0, 0.0);
    }

    pub fn set_scale(&mut self, sx: f64, sy: f64) {
        self.kind = TransformKind::Scale;
        self.matrix = AffineMatrix::scaling(sx, sy);
        self.angle = 0.0;
        self.center = (0.0, 0.0);
    }

    /// Rotate by `angle` degrees about `(cx, cy)`
    pub fn set_rotate(&mut self, angle: f64, cx: f64, cy: f64) {
        self.kind = TransformKind::Rotate;
        self.matrix = AffineMatrix::translation(cx, cy)
            .rotate(angle)
            .translate(-cx, -cy);
        self.angle = angle;
        self.center = (cx, cy);
    }

    pub fn set_matrix(&mut self, matrix: AffineMatrix) {
        self.kind = TransformKind::Matrix;
        self.matrix = matrix;
        self.angle = 0.0;
        self.center = (0.0, 0.0);
    }

    fn from_fn(f: TransformFn) -> Self {
        match f {
            TransformFn::Matrix(coeffs) => Self::from_matrix(AffineMatrix::from_array(coeffs)),
            TransformFn::Translate(tx, ty) => Self::translate(tx, ty),
            TransformFn::Scale(sx, sy) => Self::scale(sx, sy),
            TransformFn::Rotate(angle, center) => {
                let (cx, cy) = center.unwrap_or((0.0, 0.0));
                Self::rotate(angle, cx, cy)
            }
            TransformFn::SkewX(angle) => Self::from_matrix(AffineMatrix::skewing_x(angle)),
            TransformFn::SkewY(angle) => Self::from_matrix(AffineMatrix::skewing_y(angle)),
        }
    }
}

impl fmt::Display for TransformItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.matrix, f)
    }
}

/// Unattached identity transform
pub fn create_svg_transform() -> TransformItem {
    TransformItem::new()
}

pub fn create_svg_transform_from_matrix(matrix: AffineMatrix) -> TransformItem {
    TransformItem::from_matrix(matrix)
}

/// Ordered transform items of one element
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransformList {
    items: Vec<TransformItem>,
}

impl TransformList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a list from an existing `transform` attribute value.
    ///
    /// An unparseable value yields an empty list.
    pub fn from_attribute(value: Option<&str>) -> Self {
        let Some(value) = value else {
            return Self::new();
        };
        match parse_transform_list(value) {
            Some(fns) => Self {
                items: fns.into_iter().map(TransformItem::from_fn).collect(),
            },
            None => {
                debug!(value, "ignoring invalid transform attribute");
                Self::new()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TransformItem> {
        self.items.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TransformItem> {
        self.items.iter()
    }

    /// All items composed left to right
    pub fn matrix(&self) -> AffineMatrix {
        self.items
            .iter()
            .fold(AffineMatrix::IDENTITY, |acc, item| acc.multiply(item.matrix))
    }

    /// Attribute value for the current items, `None` when empty
    pub fn serialize(&self) -> Option<String> {
        if self.items.is_empty() {
            return None;
        }
        let parts: Vec<String> = self.items.iter().map(|item| item.to_string()).collect();
        Some(parts.join(" "))
    }
}

/// Mutable view of an element's transform list.
///
/// Every mutating method rewrites the element's `transform` attribute before
/// returning.
#[derive(Debug)]
pub struct TransformListMut<'a> {
    list: &'a mut TransformList,
    attributes: &'a mut Attributes,
}

impl<'a> TransformListMut<'a> {
    pub(crate) fn new(list: &'a mut TransformList, attributes: &'a mut Attributes) -> Self {
        Self { list, attributes }
    }

    fn sync(&mut self) {
        match self.list.serialize() {
            Some(value) => {
                trace!(%value, "transform attribute synced");
                self.attributes.set("transform", value);
            }
            None => {
                trace!("transform attribute removed");
                self.attributes.remove("transform");
            }
        }
    }

    pub fn number_of_items(&self) -> usize {
        self.list.len()
    }

    pub fn get_item(&self, index: usize) -> Option<&TransformItem> {
        self.list.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TransformItem> {
        self.list.iter()
    }

    pub fn matrix(&self) -> AffineMatrix {
        self.list.matrix()
    }

    pub fn as_list(&self) -> &TransformList {
        self.list
    }

    /// Edit one item in place (the `getItem(i).setTranslate(..)` pattern).
    /// Returns `None` when `index` is out of range.
    pub fn with_item_mut<R>(
        &mut self,
        index: usize,
        f: impl FnOnce(&mut TransformItem) -> R,
    ) -> Option<R> {
        let item = self.list.items.get_mut(index)?;
        let out = f(item);
        self.sync();
        Some(out)
    }

    /// Replace the whole list with `item`
    pub fn initialize(&mut self, item: TransformItem) -> TransformItem {
        self.list.items.clear();
        self.list.items.push(item);
        self.sync();
        item
    }

    /// Insert before `index`; an index past the end appends
    pub fn insert_item_before(&mut self, item: TransformItem, index: usize) -> TransformItem {
        let index = index.min(self.list.items.len());
        self.list.items.insert(index, item);
        self.sync();
        item
    }

    pub fn replace_item(&mut self, item: TransformItem, index: usize) -> Option<TransformItem> {
        let slot = self.list.items.get_mut(index)?;
        *slot = item;
        self.sync();
        Some(item)
    }

    /// Remove and return the item at `index`
    pub fn remove_item(&mut self, index: usize) -> Option<TransformItem> {
        if index >= self.list.items.len() {
            return None;
        }
        let removed = self.list.items.remove(index);
        self.sync();
        Some(removed)
    }

    pub fn append_item(&mut self, item: TransformItem) -> TransformItem {
        self.list.items.push(item);
        self.sync();
        item
    }

    /// Empty the list and drop the attribute
    pub fn clear(&mut self) {
        self.list.items.clear();
        self.sync();
    }

    /// Fold every item into a single `Matrix` item and return it.
    /// `None` when the list is empty.
    pub fn consolidate(&mut self) -> Option<TransformItem> {
        if self.list.is_empty() {
            return None;
        }
        let item = TransformItem::from_matrix(self.list.matrix());
        self.initialize(item);
        Some(item)
    }

    pub fn create_svg_transform_from_matrix(&self, matrix: AffineMatrix) -> TransformItem {
        create_svg_transform_from_matrix(matrix)
    }
}

/// `element.transform`: `base_val` and `anim_val` are the same live list
#[derive(Debug)]
pub struct AnimatedTransformList<'a> {
    list: TransformListMut<'a>,
}

impl<'a> AnimatedTransformList<'a> {
    pub(crate) fn new(list: TransformListMut<'a>) -> Self {
        Self { list }
    }

    pub fn base_val(&mut self) -> &mut TransformListMut<'a> {
        &mut self.list
    }

    /// No animation runs headlessly, so this is `base_val`
    pub fn anim_val(&mut self) -> &mut TransformListMut<'a> {
        &mut self.list
    }

    pub fn into_base_val(self) -> TransformListMut<'a> {
        self.list
    }
}
