use std::collections::BTreeMap;
use std::fmt;

use crate::foundation::core::{Affine, Point, Rect};
use crate::paint::apply::{Paint, PaintChannel};
use crate::scene::measure;

/// Stable handle of a scene element (its id).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct ElementId(pub String);

impl ElementId {
    /// Create an id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the id string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Element type, as far as animation needs to distinguish it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// `<path>`.
    Path,
    /// `<rect>`.
    Rect,
    /// `<circle>`.
    Circle,
    /// `<ellipse>`.
    Ellipse,
    /// `<line>`.
    Line,
    /// `<polyline>`.
    Polyline,
    /// `<polygon>`.
    Polygon,
    /// `<text>`.
    Text,
    /// `<image>`.
    Image,
    /// `<g>`, `<svg>`, `<filter>` and other containers.
    Group,
    /// Anything else, by tag name.
    Other(String),
}

impl ElementKind {
    /// Classify a tag name.
    pub fn from_tag(tag: &str) -> Self {
        match tag.to_ascii_lowercase().as_str() {
            "path" => Self::Path,
            "rect" => Self::Rect,
            "circle" => Self::Circle,
            "ellipse" => Self::Ellipse,
            "line" => Self::Line,
            "polyline" => Self::Polyline,
            "polygon" => Self::Polygon,
            "text" => Self::Text,
            "image" => Self::Image,
            "g" | "svg" | "filter" | "defs" | "symbol" => Self::Group,
            other => Self::Other(other.to_owned()),
        }
    }
}

/// Pre-animation copy of an element's transform and attributes.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    /// Transform at capture time.
    pub transform: Affine,
    /// Attributes at capture time.
    pub attributes: BTreeMap<String, String>,
}

impl Snapshot {
    /// Capture `el` from `scene`.
    pub fn capture<S: Scene + ?Sized>(scene: &S, el: &ElementId) -> Self {
        Self {
            transform: scene.transform(el),
            attributes: scene.attributes(el),
        }
    }

    /// Put `el` back into the captured state, dropping attributes added since.
    pub fn restore<S: Scene + ?Sized>(&self, scene: &mut S, el: &ElementId) {
        scene.set_transform(el, self.transform);
        for name in scene.attributes(el).into_keys() {
            if !self.attributes.contains_key(&name) {
                scene.set_attr(el, &name, None);
            }
        }
        for (name, value) in &self.attributes {
            scene.set_attr(el, name, Some(value.clone()));
        }
    }
}

/// Capability of the vector-element layer the timeline animates.
///
/// Bounding boxes are in the element's local (untransformed) space. Setters on unknown
/// elements are ignored.
pub trait Scene {
    /// Elements matching `selector`, in document order.
    fn select(&self, selector: &str) -> Vec<ElementId>;

    /// First descendant of `root` matching `selector`.
    fn find_within(&self, root: &ElementId, selector: &str) -> Option<ElementId>;

    /// Element type, `None` for unknown elements.
    fn kind(&self, el: &ElementId) -> Option<ElementKind>;

    /// Local-space bounding box.
    fn bbox(&self, el: &ElementId) -> Option<Rect>;

    /// Composed transform (identity for unknown elements).
    fn transform(&self, el: &ElementId) -> Affine;

    /// Replace the composed transform.
    fn set_transform(&mut self, el: &ElementId, transform: Affine);

    /// Attribute value.
    fn attr(&self, el: &ElementId, name: &str) -> Option<String>;

    /// Set (`Some`) or remove (`None`) an attribute.
    fn set_attr(&mut self, el: &ElementId, name: &str, value: Option<String>);

    /// All attributes.
    fn attributes(&self, el: &ElementId) -> BTreeMap<String, String>;

    /// Resize the element's geometry to `width` x `height`.
    fn set_size(&mut self, el: &ElementId, width: f64, height: f64);

    /// Set the font size of a text element.
    fn set_font_size(&mut self, el: &ElementId, size: f64) {
        self.set_attr(el, "font-size", Some(size.to_string()));
    }

    /// Write a fill or stroke paint.
    fn set_paint(&mut self, el: &ElementId, channel: PaintChannel, paint: Paint);

    /// Total outline length; closed-form for basic shapes, arc length for paths.
    fn total_length(&self, el: &ElementId) -> Option<f64> {
        let kind = self.kind(el)?;
        measure::total_length(&kind, &|name| self.attr(el, name))
    }

    /// Point at arc length `len` along the outline, in local space.
    fn point_at_length(&self, el: &ElementId, len: f64) -> Option<Point> {
        let kind = self.kind(el)?;
        measure::point_at_length(&kind, &|name| self.attr(el, name), len)
    }
}
