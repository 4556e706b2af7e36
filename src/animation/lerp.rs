use crate::foundation::core::{Anchor, Point};

/// Linear interpolation between two values of the same shape.
pub trait Lerp: Sized {
    /// Interpolate from `a` (at `t = 0`) to `b` (at `t = 1`).
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Point {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a.lerp(*b, t)
    }
}

impl Lerp for Anchor {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Anchor::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }
}

impl<T: Lerp> Lerp for Vec<T> {
    /// Pairwise interpolation; extra trailing elements of the longer side are dropped.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a.iter().zip(b.iter()).map(|(x, y)| T::lerp(x, y, t)).collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/lerp.rs"]
mod tests;
