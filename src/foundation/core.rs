pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// Playback direction of the timeline clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum Direction {
    /// Elapsed time increases.
    #[default]
    Forward,
    /// Elapsed time decreases.
    Backward,
}

impl Direction {
    /// Sign applied to frame deltas (`+1` or `-1`).
    pub fn sign(self) -> f64 {
        match self {
            Self::Forward => 1.0,
            Self::Backward => -1.0,
        }
    }

    /// Map a signed integer direction (`>= 0` forward) onto a [`Direction`].
    pub fn from_sign(sign: i32) -> Self {
        if sign < 0 {
            Self::Backward
        } else {
            Self::Forward
        }
    }
}

/// Fractional bounding-box coordinates used as the origin of scale/rotate transforms.
///
/// `(0.5, 0.5)` is the box center; `(0, 0)` the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Anchor {
    /// Horizontal fraction of the bbox width.
    pub x: f64,
    /// Vertical fraction of the bbox height.
    pub y: f64,
}

impl Anchor {
    /// Box center.
    pub const CENTER: Self = Self { x: 0.5, y: 0.5 };

    /// Create an anchor from fractional coordinates.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Resolve this anchor against a bounding box in the element's local space.
    pub fn resolve(self, bbox: Rect) -> Point {
        Point::new(
            bbox.x0 + bbox.width() * self.x,
            bbox.y0 + bbox.height() * self.y,
        )
    }
}

impl Default for Anchor {
    fn default() -> Self {
        Self::CENTER
    }
}

/// Format a number for attribute output, rounded to six decimals without trailing zeros.
pub fn format_number(v: f64) -> String {
    let r = (v * 1e6).round() / 1e6 + 0.0;
    format!("{r}")
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
