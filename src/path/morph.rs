//! Interpolatable representations of two outlines.

use crate::animation::lerp::Lerp;
use crate::foundation::core::Point;
use crate::foundation::error::TweenlineResult;
use crate::path::align::{align_by_rotation, best_rotation, rotate_left};
use crate::path::outline::{CubicCommand, PathOutline};
use crate::path::sampler::{BezMeasure, resample, sample};

/// Default sample resolution of the resampling fallback.
pub const DEFAULT_SEGMENTS: usize = 220;

/// Options for [`build_morph`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MorphOptions {
    /// Number of arc-length intervals sampled when cubic counts differ.
    pub segments: usize,
}

impl Default for MorphOptions {
    fn default() -> Self {
        Self {
            segments: DEFAULT_SEGMENTS,
        }
    }
}

/// A prepared morph between two outlines, evaluated with [`PathMorph::at`].
#[derive(Clone, Debug, PartialEq)]
pub enum PathMorph {
    /// Equal cubic counts: every coordinate is interpolated against a rotated copy of the
    /// destination, keeping the outlines' own structure.
    Exact {
        /// Source outline.
        from: PathOutline,
        /// Destination with its cubic groups rotated by `shift` (move point untouched).
        to: PathOutline,
        /// Cubic-group rotation applied to the destination.
        shift: usize,
    },
    /// Differing cubic counts: both outlines sampled by arc length, destination samples
    /// aligned, and a smooth outline fitted through the interpolated samples.
    Resampled {
        /// Source samples.
        from: Vec<Point>,
        /// Aligned destination samples.
        to: Vec<Point>,
        /// Close flag of the source and destination outlines.
        closed: (bool, bool),
    },
}

impl PathMorph {
    /// Outline at progress `t` (`0` = source, `1` = destination).
    pub fn at(&self, t: f64) -> PathOutline {
        match self {
            Self::Exact { from, to, .. } => {
                let mut out = PathOutline {
                    start: from.start.lerp(to.start, t),
                    cubics: Vec::<CubicCommand>::lerp(&from.cubics, &to.cubics, t),
                    closed: from.closed,
                };
                if t >= 1.0 {
                    out.closed = to.closed;
                }
                out
            }
            Self::Resampled { from, to, closed } => {
                let pts = Vec::<Point>::lerp(from, to, t);
                let mut out = PathOutline::through_points(&pts)
                    .unwrap_or_else(|| PathOutline::new(Point::ZERO));
                out.closed = if t >= 1.0 { closed.1 } else { closed.0 };
                out
            }
        }
    }

    /// Whether the structure-preserving strategy was chosen.
    pub fn is_exact(&self) -> bool {
        matches!(self, Self::Exact { .. })
    }
}

impl Lerp for CubicCommand {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            c1: a.c1.lerp(b.c1, t),
            c2: a.c2.lerp(b.c2, t),
            end: a.end.lerp(b.end, t),
        }
    }
}

/// Prepare a morph from `a` to `b`.
///
/// Equal cubic counts keep both structures exactly (up to a cyclic re-indexing of `b`);
/// otherwise both outlines are resampled, which approximates both shapes.
#[tracing::instrument(skip(a, b), fields(from_cubics = a.cubic_count(), to_cubics = b.cubic_count()))]
pub fn build_morph(
    a: &PathOutline,
    b: &PathOutline,
    opts: MorphOptions,
) -> PathMorph {
    if a.cubic_count() == b.cubic_count() {
        let shift = best_rotation(&a.endpoints(), &b.endpoints());
        let to = PathOutline {
            start: b.start,
            cubics: rotate_left(&b.cubics, shift),
            closed: b.closed,
        };
        return PathMorph::Exact {
            from: a.clone(),
            to,
            shift,
        };
    }

    let segments = opts.segments.max(1);
    let from = sample(&BezMeasure::from_outline(a), segments);
    let mut to = sample(&BezMeasure::from_outline(b), segments);
    if to.len() != from.len() {
        to = resample(&to, from.len());
    }
    let (to, shift) = align_by_rotation(&from, &to);
    tracing::debug!(shift, samples = from.len(), "resampled morph");
    PathMorph::Resampled {
        from,
        to,
        closed: (a.closed, b.closed),
    }
}

/// Parse two outline strings and prepare a morph between them.
pub fn morph_between(from: &str, to: &str, opts: MorphOptions) -> TweenlineResult<PathMorph> {
    let a = PathOutline::parse(from)?;
    let b = PathOutline::parse(to)?;
    Ok(build_morph(&a, &b, opts))
}

#[cfg(test)]
#[path = "../../tests/unit/path/morph.rs"]
mod tests;
