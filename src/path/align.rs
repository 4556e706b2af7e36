//! Cyclic alignment of point sequences.

use crate::foundation::core::Point;

/// Sum of squared distances between `a[i]` and `b[(i + shift) % n]`.
pub fn rotation_cost(a: &[Point], b: &[Point], shift: usize) -> f64 {
    let n = a.len().min(b.len());
    if n == 0 {
        return 0.0;
    }
    (0..n)
        .map(|i| {
            let p = b[(i + shift) % n];
            let dx = a[i].x - p.x;
            let dy = a[i].y - p.y;
            dx * dx + dy * dy
        })
        .sum()
}

/// Shift in `[0, n)` minimizing [`rotation_cost`]; ties keep the smallest shift.
///
/// Brute force, `O(n^2)`. Sequences are expected to have equal length; only the common
/// prefix is compared otherwise.
pub fn best_rotation(a: &[Point], b: &[Point]) -> usize {
    let n = a.len().min(b.len());
    let mut best_shift = 0;
    let mut best_score = f64::INFINITY;
    for shift in 0..n {
        let score = rotation_cost(a, b, shift);
        if score < best_score {
            best_score = score;
            best_shift = shift;
        }
    }
    best_shift
}

/// Rotate `b` left by `shift` positions.
pub fn rotate_left<T: Clone>(b: &[T], shift: usize) -> Vec<T> {
    if b.is_empty() {
        return Vec::new();
    }
    let shift = shift % b.len();
    b[shift..].iter().chain(b[..shift].iter()).cloned().collect()
}

/// Rotation of `b` that best matches `a`, together with the chosen shift.
pub fn align_by_rotation(a: &[Point], b: &[Point]) -> (Vec<Point>, usize) {
    let shift = best_rotation(a, b);
    (rotate_left(b, shift), shift)
}

#[cfg(test)]
#[path = "../../tests/unit/path/align.rs"]
mod tests;
