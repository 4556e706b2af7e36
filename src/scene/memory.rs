use std::collections::BTreeMap;

use crate::foundation::core::{Affine, BezPath, Point, Rect, format_number};
use crate::paint::apply::{GradientPaint, Paint, PaintChannel};
use crate::scene::element::{ElementId, ElementKind, Scene};
use crate::scene::measure::{self, parse_points};

/// One element of a [`MemoryScene`], also used as its builder.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneNode {
    /// Element id.
    pub id: ElementId,
    /// Tag name (`rect`, `path`, ...).
    pub tag: String,
    /// Class names.
    pub classes: Vec<String>,
    /// Parent element, if nested.
    pub parent: Option<ElementId>,
    /// Composed transform.
    pub transform: Affine,
    /// Attributes.
    pub attributes: BTreeMap<String, String>,
}

impl SceneNode {
    /// Start a node with tag `tag` and id `id`.
    pub fn new(tag: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            id: ElementId::new(id),
            tag: tag.into(),
            classes: Vec::new(),
            parent: None,
            transform: Affine::IDENTITY,
            attributes: BTreeMap::new(),
        }
    }

    /// Set an attribute.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Add a class.
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Nest under `parent`.
    pub fn child_of(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(ElementId::new(parent));
        self
    }

    /// Set the initial transform.
    pub fn transform(mut self, transform: Affine) -> Self {
        self.transform = transform;
        self
    }
}

/// Headless [`Scene`] keeping elements, attributes and registered gradients in memory.
///
/// Selectors support `#id`, `.class`, `tag`, compounds such as `rect.tile` and comma lists.
#[derive(Clone, Debug, Default)]
pub struct MemoryScene {
    nodes: Vec<SceneNode>,
    gradients: BTreeMap<String, GradientPaint>,
}

impl MemoryScene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `node`, replacing any element with the same id.
    pub fn insert(&mut self, node: SceneNode) -> ElementId {
        let id = node.id.clone();
        match self.nodes.iter_mut().find(|n| n.id == id) {
            Some(existing) => *existing = node,
            None => self.nodes.push(node),
        }
        id
    }

    /// Remove an element (its children stay, detached).
    pub fn remove(&mut self, id: &ElementId) -> Option<SceneNode> {
        let idx = self.nodes.iter().position(|n| &n.id == id)?;
        Some(self.nodes.remove(idx))
    }

    /// Borrow an element.
    pub fn node(&self, id: &ElementId) -> Option<&SceneNode> {
        self.nodes.iter().find(|n| &n.id == id)
    }

    /// Registered gradient by id.
    pub fn gradient(&self, id: &str) -> Option<&GradientPaint> {
        self.gradients.get(id)
    }

    fn node_mut(&mut self, id: &ElementId) -> Option<&mut SceneNode> {
        self.nodes.iter_mut().find(|n| &n.id == id)
    }

    fn is_descendant(&self, node: &SceneNode, root: &ElementId) -> bool {
        let mut cur = node.parent.clone();
        // Parent chains are bounded by the node count even if a cycle slipped in.
        for _ in 0..self.nodes.len() {
            match cur {
                Some(ref p) if p == root => return true,
                Some(p) => cur = self.node(&p).and_then(|n| n.parent.clone()),
                None => return false,
            }
        }
        false
    }

    fn group_bbox(&self, id: &ElementId, depth: usize) -> Option<Rect> {
        if depth > self.nodes.len() {
            return None;
        }
        self.nodes
            .iter()
            .filter(|n| n.parent.as_ref() == Some(id))
            .filter_map(|child| {
                let local = match ElementKind::from_tag(&child.tag) {
                    ElementKind::Group => self.group_bbox(&child.id, depth + 1),
                    kind => measure::bounding_box(&kind, &|name| {
                        child.attributes.get(name).cloned()
                    }),
                }?;
                Some(child.transform.transform_rect_bbox(local))
            })
            .reduce(|a, b| a.union(b))
    }
}

#[derive(Debug, Default)]
struct SimpleSelector<'a> {
    tag: Option<&'a str>,
    id: Option<&'a str>,
    classes: Vec<&'a str>,
}

impl<'a> SimpleSelector<'a> {
    fn parse(s: &'a str) -> Self {
        let mut sel = Self::default();
        let mut rest = s.trim();
        let take = |r: &'a str| -> (&'a str, &'a str) {
            let end = r.find(['#', '.']).unwrap_or(r.len());
            (&r[..end], &r[end..])
        };
        let (tag, tail) = take(rest);
        if !tag.is_empty() && tag != "*" {
            sel.tag = Some(tag);
        }
        rest = tail;
        while let Some(c) = rest.chars().next() {
            let (name, tail) = take(&rest[1..]);
            match c {
                '#' => sel.id = Some(name),
                _ => sel.classes.push(name),
            }
            rest = tail;
        }
        sel
    }

    fn matches(&self, node: &SceneNode) -> bool {
        self.tag.is_none_or(|t| node.tag.eq_ignore_ascii_case(t))
            && self.id.is_none_or(|id| node.id.as_str() == id)
            && self
                .classes
                .iter()
                .all(|c| node.classes.iter().any(|nc| nc == c))
    }
}

fn matches_any(selector: &str, node: &SceneNode) -> bool {
    selector
        .split(',')
        .filter(|s| !s.trim().is_empty())
        .any(|s| SimpleSelector::parse(s).matches(node))
}

fn scaled_about(origin: Point, sx: f64, sy: f64) -> Affine {
    Affine::translate(origin.to_vec2())
        * Affine::scale_non_uniform(sx, sy)
        * Affine::translate(-origin.to_vec2())
}

fn ratio(new: f64, old: f64) -> f64 {
    if old.abs() < f64::EPSILON { 1.0 } else { new / old }
}

impl Scene for MemoryScene {
    fn select(&self, selector: &str) -> Vec<ElementId> {
        self.nodes
            .iter()
            .filter(|n| matches_any(selector, n))
            .map(|n| n.id.clone())
            .collect()
    }

    fn find_within(&self, root: &ElementId, selector: &str) -> Option<ElementId> {
        self.nodes
            .iter()
            .find(|n| self.is_descendant(n, root) && matches_any(selector, n))
            .map(|n| n.id.clone())
    }

    fn kind(&self, el: &ElementId) -> Option<ElementKind> {
        self.node(el).map(|n| ElementKind::from_tag(&n.tag))
    }

    fn bbox(&self, el: &ElementId) -> Option<Rect> {
        let node = self.node(el)?;
        match ElementKind::from_tag(&node.tag) {
            ElementKind::Group => self.group_bbox(el, 0),
            kind => measure::bounding_box(&kind, &|name| node.attributes.get(name).cloned()),
        }
    }

    fn transform(&self, el: &ElementId) -> Affine {
        self.node(el).map_or(Affine::IDENTITY, |n| n.transform)
    }

    fn set_transform(&mut self, el: &ElementId, transform: Affine) {
        if let Some(n) = self.node_mut(el) {
            n.transform = transform;
        }
    }

    fn attr(&self, el: &ElementId, name: &str) -> Option<String> {
        self.node(el)?.attributes.get(name).cloned()
    }

    fn set_attr(&mut self, el: &ElementId, name: &str, value: Option<String>) {
        let Some(n) = self.node_mut(el) else {
            return;
        };
        match value {
            Some(v) => {
                n.attributes.insert(name.to_owned(), v);
            }
            None => {
                n.attributes.remove(name);
            }
        }
    }

    fn attributes(&self, el: &ElementId) -> BTreeMap<String, String> {
        self.node(el).map(|n| n.attributes.clone()).unwrap_or_default()
    }

    fn set_size(&mut self, el: &ElementId, width: f64, height: f64) {
        let Some(kind) = self.kind(el) else {
            return;
        };
        let old = self.bbox(el).unwrap_or(Rect::ZERO);
        let scale = scaled_about(
            old.origin(),
            ratio(width, old.width()),
            ratio(height, old.height()),
        );
        let set = |scene: &mut Self, name: &str, v: f64| {
            scene.set_attr(el, name, Some(format_number(v)));
        };
        match kind {
            ElementKind::Rect | ElementKind::Image => {
                set(self, "width", width);
                set(self, "height", height);
            }
            ElementKind::Circle => set(self, "r", width / 2.0),
            ElementKind::Ellipse => {
                set(self, "rx", width / 2.0);
                set(self, "ry", height / 2.0);
            }
            ElementKind::Text => self.set_font_size(el, height),
            ElementKind::Path => {
                let Some(mut path) = self
                    .attr(el, "d")
                    .and_then(|d| BezPath::from_svg(&d).ok())
                else {
                    return;
                };
                path.apply_affine(scale);
                self.set_attr(el, "d", Some(path.to_svg()));
            }
            ElementKind::Line => {
                let num = |s: &Self, n: &str| {
                    s.attr(el, n)
                        .as_deref()
                        .and_then(measure::parse_number)
                        .unwrap_or(0.0)
                };
                let p1 = scale * Point::new(num(self, "x1"), num(self, "y1"));
                let p2 = scale * Point::new(num(self, "x2"), num(self, "y2"));
                set(self, "x1", p1.x);
                set(self, "y1", p1.y);
                set(self, "x2", p2.x);
                set(self, "y2", p2.y);
            }
            ElementKind::Polyline | ElementKind::Polygon => {
                let Some(points) = self.attr(el, "points") else {
                    return;
                };
                let out = parse_points(&points)
                    .into_iter()
                    .map(|p| {
                        let p = scale * p;
                        format!("{},{}", format_number(p.x), format_number(p.y))
                    })
                    .collect::<Vec<_>>()
                    .join(" ");
                self.set_attr(el, "points", Some(out));
            }
            ElementKind::Group | ElementKind::Other(_) => {}
        }
    }

    fn set_paint(&mut self, el: &ElementId, channel: PaintChannel, paint: Paint) {
        let value = match paint {
            Paint::Solid(s) => s,
            Paint::Gradient(g) => {
                let reference = format!("url(#{})", g.id);
                self.gradients.insert(g.id.clone(), g);
                reference
            }
        };
        self.set_attr(el, channel.as_str(), Some(value));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/memory.rs"]
mod tests;
