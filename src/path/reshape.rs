//! Point-count equalization for outlines that differ by one inserted on-curve point.

use crate::animation::bezier::{cubic_point, split_cubic};
use crate::foundation::core::Point;
use crate::foundation::error::TweenlineResult;
use crate::path::outline::{CubicCommand, PathOutline};

/// Absolute per-axis tolerance used to match endpoints between the two outlines.
pub const ENDPOINT_TOLERANCE: f64 = 1e-3;
/// Parametric sample steps per cubic segment when locating the inserted point.
pub const STEPS_PER_SEGMENT: usize = 150;

/// A control handle; `owner` indexes the endpoint it belongs to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Handle {
    /// Handle position.
    pub pos: Point,
    /// Index of the owning endpoint in its arena.
    pub owner: usize,
}

/// An on-curve point with its incoming (`cp0`) and outgoing (`cp1`) handles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControlPoint {
    /// On-curve position.
    pub pos: Point,
    /// Incoming handle (second control point of the cubic ending here).
    pub cp0: Handle,
    /// Outgoing handle (first control point of the cubic starting here).
    pub cp1: Handle,
}

/// Arena of control points. Handles refer to their owner by index, never by reference.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointArena {
    points: Vec<ControlPoint>,
}

impl PointArena {
    /// Build the arena from an outline: the move point plus one point per cubic.
    pub fn from_outline(outline: &PathOutline) -> Self {
        let mut points = Vec::with_capacity(outline.cubic_count() + 1);
        let start = outline.start;
        points.push(ControlPoint {
            pos: start,
            cp0: Handle { pos: start, owner: 0 },
            cp1: Handle { pos: start, owner: 0 },
        });
        for (i, c) in outline.cubics.iter().enumerate() {
            points[i].cp1.pos = c.c1;
            let owner = i + 1;
            points.push(ControlPoint {
                pos: c.end,
                cp0: Handle { pos: c.c2, owner },
                cp1: Handle { pos: c.end, owner },
            });
        }
        Self { points }
    }

    /// Number of endpoints.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the arena holds no endpoint.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Endpoints in outline order.
    pub fn points(&self) -> &[ControlPoint] {
        &self.points
    }

    /// Endpoint owning `handle`.
    pub fn owner(&self, handle: &Handle) -> Option<&ControlPoint> {
        self.points.get(handle.owner)
    }

    /// Insert `point` at `index`, renumbering handle owners.
    pub fn insert(&mut self, index: usize, point: ControlPoint) {
        self.points.insert(index, point);
        for (i, p) in self.points.iter_mut().enumerate() {
            p.cp0.owner = i;
            p.cp1.owner = i;
        }
    }

    /// Render back into an outline; each cubic runs from `prev.cp1` to `next.cp0`.
    pub fn to_outline(&self, closed: bool) -> Option<PathOutline> {
        let (first, _) = self.points.split_first()?;
        let mut out = PathOutline::new(first.pos);
        out.closed = closed;
        for pair in self.points.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            out.cubics.push(CubicCommand {
                c1: prev.cp1.pos,
                c2: next.cp0.pos,
                end: next.pos,
            });
        }
        Some(out)
    }
}

/// Where a point was synthesized by [`reshape`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InsertedPoint {
    /// `0` when the first outline was reshaped, `1` for the second.
    pub outline: usize,
    /// Point index (move point = 0) of the synthesized point.
    pub index: usize,
    /// Parameter at which the reshaped segment was split.
    pub t: f64,
    /// The synthesized on-curve point.
    pub pos: Point,
}

/// Outcome of [`reshape`]: both outlines in input order.
#[derive(Clone, Debug, PartialEq)]
pub struct Reshaped {
    /// First input outline, possibly with a synthesized point.
    pub first: PathOutline,
    /// Second input outline, possibly with a synthesized point.
    pub second: PathOutline,
    /// The synthesized point, if any.
    pub inserted: Option<InsertedPoint>,
}

impl Reshaped {
    fn unchanged(a: &PathOutline, b: &PathOutline) -> Self {
        Self {
            first: a.clone(),
            second: b.clone(),
            inserted: None,
        }
    }
}

fn same_endpoint(a: Point, b: Point) -> bool {
    (a.x - b.x).abs() < ENDPOINT_TOLERANCE && (a.y - b.y).abs() < ENDPOINT_TOLERANCE
}

/// First point of `longer` without a positional match in `shorter`.
fn find_added_point(shorter: &PointArena, longer: &PointArena) -> Option<usize> {
    longer.points().iter().position(|candidate| {
        !shorter
            .points()
            .iter()
            .any(|p| same_endpoint(p.pos, candidate.pos))
    })
}

/// Relative position of point `mid` between points `prev` and `next` of `arena`.
///
/// Samples the segments in between at [`STEPS_PER_SEGMENT`], picks the sample closest to
/// the middle point and normalizes its index over the sample run.
fn relative_position(arena: &PointArena, prev: usize, mid: usize, next: usize) -> f64 {
    let pts = arena.points();
    let target = pts[mid].pos;
    let mut samples = Vec::with_capacity((next - prev) * STEPS_PER_SEGMENT + 1);
    for seg in prev..next {
        let (a, b) = (&pts[seg], &pts[seg + 1]);
        for s in 0..STEPS_PER_SEGMENT {
            let t = s as f64 / STEPS_PER_SEGMENT as f64;
            samples.push(cubic_point(a.pos, a.cp1.pos, b.cp0.pos, b.pos, t));
        }
    }
    samples.push(pts[next].pos);

    let closest = samples
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.distance(target).total_cmp(&b.distance(target)))
        .map(|(i, _)| i)
        .unwrap_or(0);
    closest as f64 / (samples.len() - 1).max(1) as f64
}

/// Equalize the point counts of two outlines that differ by exactly one on-curve point.
///
/// The longer outline is kept as is. Its first point without a match in the shorter outline
/// is located relative to its two neighbors, and the corresponding segment of the shorter
/// outline is split at the same relative position. Outlines that do not differ by exactly
/// one point, or whose extra point has no neighbor on both sides, are returned unchanged.
#[tracing::instrument(skip(a, b), fields(a_points = a.cubic_count() + 1, b_points = b.cubic_count() + 1))]
pub fn reshape(a: &PathOutline, b: &PathOutline) -> Reshaped {
    if a.cubic_count().abs_diff(b.cubic_count()) != 1 {
        return Reshaped::unchanged(a, b);
    }
    let reshaped_index = if b.cubic_count() > a.cubic_count() { 0 } else { 1 };
    let (shorter_outline, longer_outline) = if reshaped_index == 0 { (a, b) } else { (b, a) };
    let mut shorter = PointArena::from_outline(shorter_outline);
    let longer = PointArena::from_outline(longer_outline);

    let Some(insert) = find_added_point(&shorter, &longer) else {
        return Reshaped::unchanged(a, b);
    };
    if insert == 0 || insert >= shorter.len() || insert + 1 >= longer.len() {
        tracing::debug!(insert, "added point has no segment to split");
        return Reshaped::unchanged(a, b);
    }

    let t = relative_position(&longer, insert - 1, insert, insert + 1);
    let (start, end) = (shorter.points()[insert - 1], shorter.points()[insert]);
    let split = split_cubic(start.pos, start.cp1.pos, end.cp0.pos, end.pos, t);

    shorter.insert(
        insert,
        ControlPoint {
            pos: split.mid,
            cp0: Handle { pos: split.mid_in, owner: insert },
            cp1: Handle { pos: split.mid_out, owner: insert },
        },
    );
    shorter.points[insert - 1].cp1.pos = split.start_out;
    shorter.points[insert + 1].cp0.pos = split.end_in;

    let Some(rebuilt) = shorter.to_outline(shorter_outline.closed) else {
        return Reshaped::unchanged(a, b);
    };
    tracing::debug!(insert, t, "inserted split point");
    let inserted = Some(InsertedPoint {
        outline: reshaped_index,
        index: insert,
        t,
        pos: split.mid,
    });
    if reshaped_index == 0 {
        Reshaped {
            first: rebuilt,
            second: b.clone(),
            inserted,
        }
    } else {
        Reshaped {
            first: a.clone(),
            second: rebuilt,
            inserted,
        }
    }
}

/// Parse two outline strings and [`reshape`] them.
pub fn reshape_str(a: &str, b: &str) -> TweenlineResult<Reshaped> {
    let a = PathOutline::parse(a)?;
    let b = PathOutline::parse(b)?;
    Ok(reshape(&a, &b))
}

#[cfg(test)]
#[path = "../../tests/unit/path/reshape.rs"]
mod tests;
