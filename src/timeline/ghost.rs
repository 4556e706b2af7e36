//! Per-target shadow state: transform components, cached bbox and anchor.

use std::collections::BTreeMap;

use crate::foundation::core::{Affine, Anchor, Point, Rect};
use crate::foundation::transform::TransformParts;
use crate::scene::element::{ElementId, Scene};

/// Transform and bounding-box state accumulated across frames without re-measuring.
///
/// The composed transform is
/// `T(translate) * T(L0 * p) * L * T(-p)` where `L` is the current rotate/shear/scale part,
/// `L0` the one captured at creation and `p` the anchor point in local space. At the captured
/// components this reproduces the original matrix, and scale/rotate pivot on the anchor.
#[derive(Clone, Debug, PartialEq)]
pub struct Ghost {
    /// Current transform components.
    pub parts: TransformParts,
    /// Cached local-space bounding box.
    pub bbox: Rect,
    /// Transform origin as bbox fractions.
    pub anchor: Anchor,
    /// Whether scale or size is animated on this target.
    pub resizes: bool,
    base_linear: Affine,
    written: BTreeMap<String, String>,
}

impl Ghost {
    /// Capture `el` from `scene`.
    pub fn new<S: Scene + ?Sized>(scene: &S, el: &ElementId, anchor: Anchor) -> Self {
        let mut ghost = Self {
            parts: TransformParts::default(),
            bbox: scene.bbox(el).unwrap_or(Rect::ZERO),
            anchor,
            resizes: false,
            base_linear: Affine::IDENTITY,
            written: BTreeMap::new(),
        };
        ghost.set_matrix(scene.transform(el));
        ghost
    }

    /// Replace the whole transform; it becomes the new pivot baseline.
    pub fn set_matrix(&mut self, m: Affine) {
        self.parts = TransformParts::decompose(m);
        let [a, b, c, d, _, _] = m.as_coeffs();
        self.base_linear = Affine::new([a, b, c, d, 0.0, 0.0]);
    }

    /// Anchor point in local space.
    pub fn origin(&self) -> Point {
        self.anchor.resolve(self.bbox)
    }

    /// Compose the current components into a matrix.
    pub fn matrix(&self) -> Affine {
        let p = self.origin().to_vec2();
        let linear = TransformParts {
            translate_x: 0.0,
            translate_y: 0.0,
            ..self.parts
        }
        .compose();
        let pivot = self.base_linear * self.origin();
        Affine::translate((
            self.parts.translate_x + pivot.x,
            self.parts.translate_y + pivot.y,
        )) * linear
            * Affine::translate(-p)
    }

    /// Remember the value written for a geometry property; `true` when it changed.
    pub fn note_write(&mut self, property: &str, value: &str) -> bool {
        match self.written.get(property) {
            Some(prev) if prev == value => false,
            _ => {
                self.written.insert(property.to_owned(), value.to_owned());
                true
            }
        }
    }

    /// Re-measure the bounding box.
    pub fn refresh_bbox<S: Scene + ?Sized>(&mut self, scene: &S, el: &ElementId) {
        if let Some(b) = scene.bbox(el) {
            self.bbox = b;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/ghost.rs"]
mod tests;
