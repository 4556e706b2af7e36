//! Cubic Bezier evaluation shared by easing curves and path geometry.

use crate::foundation::core::Point;

/// Evaluate the scalar cubic Bezier polynomial with control values `p0..p3` at `t`.
///
/// `t` outside `[0, 1]` extrapolates the polynomial.
pub fn cubic(p0: f64, p1: f64, p2: f64, p3: f64, t: f64) -> f64 {
    let mt = 1.0 - t;
    mt * mt * mt * p0 + 3.0 * mt * mt * t * p1 + 3.0 * mt * t * t * p2 + t * t * t * p3
}

/// Evaluate a 2D cubic segment at `t`.
pub fn cubic_point(p0: Point, p1: Point, p2: Point, p3: Point, t: f64) -> Point {
    Point::new(
        cubic(p0.x, p1.x, p2.x, p3.x, t),
        cubic(p0.y, p1.y, p2.y, p3.y, t),
    )
}

/// Result of splitting a cubic segment at one parameter (De Casteljau).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubicSplit {
    /// New outgoing control point of the segment start.
    pub start_out: Point,
    /// Incoming control point of the split point.
    pub mid_in: Point,
    /// The on-curve split point.
    pub mid: Point,
    /// Outgoing control point of the split point.
    pub mid_out: Point,
    /// New incoming control point of the segment end.
    pub end_in: Point,
}

/// Split the cubic `p0, p1, p2, p3` at `t`.
///
/// The two halves are `p0, start_out, mid_in, mid` and `mid, mid_out, end_in, p3`.
pub fn split_cubic(p0: Point, p1: Point, p2: Point, p3: Point, t: f64) -> CubicSplit {
    let b0 = p0.lerp(p1, t);
    let b1 = p1.lerp(p2, t);
    let b2 = p2.lerp(p3, t);
    let b01 = b0.lerp(b1, t);
    let b12 = b1.lerp(b2, t);
    let mid = b01.lerp(b12, t);
    CubicSplit {
        start_out: b0,
        mid_in: b01,
        mid,
        mid_out: b12,
        end_in: b2,
    }
}

/// Map progress `x` through the easing curve `[x1, y1, x2, y2]` (endpoints fixed at 0 and 1).
///
/// Solves `bx(u) = x` for the curve parameter and returns `by(u)`, which may leave `[0, 1]`
/// for overshooting curves.
pub fn ease_curve(x: f64, curve: [f64; 4]) -> f64 {
    let [x1, y1, x2, y2] = curve;
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }
    if x1 == y1 && x2 == y2 {
        return x;
    }

    fn derivative(a1: f64, a2: f64, t: f64) -> f64 {
        let omt = 1.0 - t;
        3.0 * omt * omt * a1 + 6.0 * omt * t * (a2 - a1) + 3.0 * t * t * (1.0 - a2)
    }

    // Newton-Raphson, then bisection to settle flat regions.
    let mut u = x;
    for _ in 0..8 {
        let x_u = cubic(0.0, x1, x2, 1.0, u) - x;
        let d = derivative(x1, x2, u);
        if d.abs() < 1e-7 {
            break;
        }
        u = (u - x_u / d).clamp(0.0, 1.0);
    }

    let mut lo = 0.0;
    let mut hi = 1.0;
    for _ in 0..8 {
        if cubic(0.0, x1, x2, 1.0, u) < x {
            lo = u;
        } else {
            hi = u;
        }
        u = 0.5 * (lo + hi);
    }

    cubic(0.0, y1, y2, 1.0, u)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/bezier.rs"]
mod tests;
