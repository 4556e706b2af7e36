//! Arc-length sampling of outlines.

use kurbo::{ParamCurve, ParamCurveArclen, PathSeg};

use crate::foundation::core::{BezPath, Point};
use crate::path::outline::PathOutline;

/// Arc-length accuracy used for kurbo measurement.
pub const ARCLEN_ACCURACY: f64 = 1e-3;

/// Path measurement capability ("total length" and "point at length").
pub trait PathMeasure {
    /// Total arc length.
    fn total_length(&self) -> f64;

    /// Point at arc length `len`, clamped into `[0, total_length]`.
    fn point_at_length(&self, len: f64) -> Point;
}

/// kurbo-backed measurement of a path with per-segment lengths cached up front.
#[derive(Clone, Debug)]
pub struct BezMeasure {
    segments: Vec<(PathSeg, f64)>,
    start: Point,
    total: f64,
}

impl BezMeasure {
    /// Measure a kurbo path.
    pub fn new(path: &BezPath) -> Self {
        let segments: Vec<(PathSeg, f64)> = path
            .segments()
            .map(|seg| (seg, seg.arclen(ARCLEN_ACCURACY)))
            .collect();
        let total = segments.iter().map(|(_, l)| l).sum();
        let start = path
            .segments()
            .next()
            .map(|s| s.eval(0.0))
            .unwrap_or(Point::ZERO);
        Self {
            segments,
            start,
            total,
        }
    }

    /// Measure an outline.
    pub fn from_outline(outline: &PathOutline) -> Self {
        let mut m = Self::new(&outline.to_bezpath());
        if m.segments.is_empty() {
            m.start = outline.start;
        }
        m
    }
}

impl PathMeasure for BezMeasure {
    fn total_length(&self) -> f64 {
        self.total
    }

    fn point_at_length(&self, len: f64) -> Point {
        let Some((last, _)) = self.segments.last() else {
            return self.start;
        };
        let mut remaining = len.clamp(0.0, self.total);
        for (seg, seg_len) in &self.segments {
            if remaining <= *seg_len {
                if *seg_len <= 0.0 {
                    return seg.eval(0.0);
                }
                let t = seg.inv_arclen(remaining, ARCLEN_ACCURACY);
                return seg.eval(t);
            }
            remaining -= seg_len;
        }
        last.eval(1.0)
    }
}

/// Sample `segments + 1` points at equal arc-length intervals.
pub fn sample(measure: &impl PathMeasure, segments: usize) -> Vec<Point> {
    let len = measure.total_length();
    if segments == 0 {
        return vec![measure.point_at_length(0.0)];
    }
    (0..=segments)
        .map(|i| measure.point_at_length((i as f64 / segments as f64) * len))
        .collect()
}

/// Linearly resample `points` to exactly `target_count` points at equal fractional indices.
pub fn resample(points: &[Point], target_count: usize) -> Vec<Point> {
    if points.is_empty() || target_count == 0 {
        return Vec::new();
    }
    if target_count == 1 {
        return vec![points[0]];
    }
    let last = points.len() - 1;
    (0..target_count)
        .map(|i| {
            let idx = (i as f64 / (target_count - 1) as f64) * last as f64;
            let i0 = idx.floor() as usize;
            let i1 = (i0 + 1).min(last);
            let alpha = idx - i0 as f64;
            points[i0].lerp(points[i1], alpha)
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/path/sampler.rs"]
mod tests;
