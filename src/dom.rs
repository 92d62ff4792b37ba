//! A minimal element tree standing in for the host DOM.
//!
//! Only the surface the geometry layer needs is modelled: tag names,
//! attributes, child nodes, text content and simple selector queries. On top
//! of that each [`Element`] exposes the emulated SVG geometry methods.

use crate::bbox::{BBoxRule, BoundingBox, ShapeKind};
use crate::config::GeometryConfig;
use crate::errors::{ParseError, Result, SourceContext};
use crate::log::debug;
use crate::matrix::AffineMatrix;
use crate::text::{measure_text_with, resolve_font_size_with};
use crate::transform::{
    AnimatedTransformList, TransformItem, TransformList, TransformListMut,
    create_svg_transform, create_svg_transform_from_matrix,
};

/// Ordered attribute map of one element
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes {
    entries: Vec<(String, String)>,
}

impl Attributes {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        let idx = self.entries.iter().position(|(k, _)| k == name)?;
        Some(self.entries.remove(idx).1)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A child of an element
#[derive(Debug, Clone)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        }
    }

    /// Text nodes have no tag
    pub fn tag_name(&self) -> Option<&str> {
        self.as_element().map(Element::tag_name)
    }

    pub fn text_content(&self) -> String {
        match self {
            Node::Element(el) => el.text_content(),
            Node::Text(text) => text.clone(),
        }
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Text(text.to_string())
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Node::Text(text)
    }
}

/// An element with its attributes, children and (once touched) its
/// transform list.
#[derive(Debug, Clone)]
pub struct Element {
    tag: String,
    attributes: Attributes,
    children: Vec<Node>,
    transform: Option<TransformList>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Attributes::default(),
            children: Vec::new(),
            transform: None,
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.append_child(child);
        self
    }

    pub fn tag_name(&self) -> &str {
        &self.tag
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name)
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains(name)
    }

    /// Set an attribute. Writing `transform` re-seeds an existing transform
    /// list from the new value.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if name == "transform" {
            if let Some(list) = self.transform.as_mut() {
                *list = TransformList::from_attribute(Some(&value));
            }
        }
        self.attributes.set(name, value);
    }

    /// Remove an attribute. Removing `transform` empties an existing
    /// transform list.
    pub fn remove_attribute(&mut self, name: &str) -> Option<String> {
        if name == "transform" {
            if let Some(list) = self.transform.as_mut() {
                *list = TransformList::new();
            }
        }
        self.attributes.remove(name)
    }

    pub fn child_nodes(&self) -> &[Node] {
        &self.children
    }

    pub fn child_nodes_mut(&mut self) -> &mut Vec<Node> {
        &mut self.children
    }

    pub fn append_child(&mut self, child: impl Into<Node>) {
        self.children.push(child.into());
    }

    /// Element children, skipping text nodes
    pub fn children(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// Concatenated text of every descendant text node
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                Node::Text(text) => out.push_str(text),
                Node::Element(el) => el.collect_text(out),
            }
        }
    }

    /// Descendants (not `self`) matching `selector`, in document order.
    ///
    /// Supported: comma-separated compounds of a type or `*`, `#id` and
    /// `.class` parts, e.g. `tspan`, `rect.node, #edge`.
    pub fn query_selector_all(&self, selector: &str) -> Vec<&Element> {
        let compounds: Vec<Compound> = selector.split(',').filter_map(Compound::parse).collect();
        let mut out = Vec::new();
        if compounds.is_empty() {
            debug!(selector, "unsupported selector");
            return out;
        }
        self.collect_matching(&compounds, &mut out);
        out
    }

    pub fn query_selector(&self, selector: &str) -> Option<&Element> {
        self.query_selector_all(selector).into_iter().next()
    }

    fn collect_matching<'a>(&'a self, compounds: &[Compound], out: &mut Vec<&'a Element>) {
        for child in self.children() {
            if compounds.iter().any(|c| c.matches(child)) {
                out.push(child);
            }
            child.collect_matching(compounds, out);
        }
    }

    /// `self` or the first descendant with the given `id`
    pub fn get_element_by_id(&self, id: &str) -> Option<&Element> {
        if self.get_attribute("id") == Some(id) {
            return Some(self);
        }
        self.children().find_map(|child| child.get_element_by_id(id))
    }

    pub fn get_element_by_id_mut(&mut self, id: &str) -> Option<&mut Element> {
        if self.get_attribute("id") == Some(id) {
            return Some(self);
        }
        self.children
            .iter_mut()
            .filter_map(Node::as_element_mut)
            .find_map(|child| child.get_element_by_id_mut(id))
    }

    pub fn shape_kind(&self) -> ShapeKind {
        ShapeKind::from_tag(&self.tag)
    }

    /// `getBBox()` with the default configuration
    pub fn get_bbox(&self) -> BoundingBox {
        self.get_bbox_with(&GeometryConfig::default())
    }

    pub fn get_bbox_with(&self, config: &GeometryConfig) -> BoundingBox {
        self.shape_kind().bbox(self, config)
    }

    /// `getComputedTextLength()`; 0 for anything but `text` and `tspan`
    pub fn get_computed_text_length(&self) -> f64 {
        self.get_computed_text_length_with(&GeometryConfig::default())
    }

    pub fn get_computed_text_length_with(&self, config: &GeometryConfig) -> f64 {
        match self.shape_kind() {
            ShapeKind::Text(_) | ShapeKind::Tspan(_) => {
                let font_size = resolve_font_size_with(self, config);
                measure_text_with(&self.text_content(), font_size, config)
            }
            _ => 0.0,
        }
    }

    /// There is no screen; always the identity
    pub fn get_screen_ctm(&self) -> AffineMatrix {
        AffineMatrix::IDENTITY
    }

    pub fn create_svg_matrix(&self) -> AffineMatrix {
        AffineMatrix::IDENTITY
    }

    pub fn create_svg_transform(&self) -> TransformItem {
        create_svg_transform()
    }

    pub fn create_svg_transform_from_matrix(&self, matrix: AffineMatrix) -> TransformItem {
        create_svg_transform_from_matrix(matrix)
    }

    /// The live `element.transform`, creating the list on first access
    pub fn transform(&mut self) -> AnimatedTransformList<'_> {
        AnimatedTransformList::new(self.transform_list_mut())
    }

    /// Shorthand for `transform().base_val()`
    pub fn transform_list_mut(&mut self) -> TransformListMut<'_> {
        if self.transform.is_none() {
            debug!(tag = %self.tag, "creating transform list");
        }
        let Self {
            attributes,
            transform,
            ..
        } = self;
        let list =
            transform.get_or_insert_with(|| TransformList::from_attribute(attributes.get("transform")));
        TransformListMut::new(list, attributes)
    }

    /// The transform list if it has been created
    pub fn transform_list(&self) -> Option<&TransformList> {
        self.transform.as_ref()
    }
}

/// One compound selector: `tag#id.class`
#[derive(Debug, Default)]
struct Compound<'s> {
    tag: Option<&'s str>,
    id: Option<&'s str>,
    classes: Vec<&'s str>,
}

impl<'s> Compound<'s> {
    fn parse(raw: &'s str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() || raw.contains(|c: char| c.is_whitespace() || "[]>+~:".contains(c)) {
            return None;
        }
        let mut compound = Compound::default();
        let type_end = raw.find(['#', '.']).unwrap_or(raw.len());
        match &raw[..type_end] {
            "" | "*" => {}
            tag => compound.tag = Some(tag),
        }
        let mut rest = &raw[type_end..];
        while !rest.is_empty() {
            let marker = rest.as_bytes()[0];
            let body = &rest[1..];
            let end = body.find(['#', '.']).unwrap_or(body.len());
            let name = &body[..end];
            if name.is_empty() {
                return None;
            }
            if marker == b'#' {
                compound.id = Some(name);
            } else {
                compound.classes.push(name);
            }
            rest = &body[end..];
        }
        Some(compound)
    }

    fn matches(&self, el: &Element) -> bool {
        if self.tag.is_some_and(|tag| !el.tag_name().eq_ignore_ascii_case(tag)) {
            return false;
        }
        if self.id.is_some_and(|id| el.get_attribute("id") != Some(id)) {
            return false;
        }
        let class_attr = el.get_attribute("class").unwrap_or("");
        self.classes
            .iter()
            .all(|want| class_attr.split_whitespace().any(|have| have == *want))
    }
}

/// A parsed element tree
#[derive(Debug, Clone)]
pub struct Document {
    root: Element,
}

impl Document {
    pub fn new(root: Element) -> Self {
        Self { root }
    }

    /// Build a tree from SVG markup. Namespaces are dropped; tags and
    /// attributes keep their local names.
    pub fn parse(markup: &str) -> Result<Self> {
        Self::parse_named("<markup>", markup)
    }

    pub fn parse_named(name: &str, markup: &str) -> Result<Self> {
        let options = roxmltree::ParsingOptions {
            allow_dtd: true,
            ..Default::default()
        };
        let xml = roxmltree::Document::parse_with_options(markup, options).map_err(|err| {
            let ctx = SourceContext::new(name, markup);
            ParseError::from_xml(&ctx, &err)
        })?;
        Ok(Self {
            root: convert_element(xml.root_element()),
        })
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Element {
        &mut self.root
    }

    pub fn into_root(self) -> Element {
        self.root
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<&Element> {
        self.root.get_element_by_id(id)
    }

    pub fn get_element_by_id_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.root.get_element_by_id_mut(id)
    }

    pub fn query_selector_all(&self, selector: &str) -> Vec<&Element> {
        self.root.query_selector_all(selector)
    }
}

fn convert_element(node: roxmltree::Node<'_, '_>) -> Element {
    let mut el = Element::new(node.tag_name().name());
    for attr in node.attributes() {
        el.attributes.set(attr.name(), attr.value());
    }
    for child in node.children() {
        if child.is_element() {
            el.children.push(Node::Element(convert_element(child)));
        } else if let Some(text) = child.text().filter(|_| child.is_text()) {
            el.children.push(Node::Text(text.to_string()));
        }
    }
    el
}
