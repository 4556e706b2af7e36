//! Move + cubic outlines and their compact textual form (`M x y C x1 y1 x2 y2 x y …`).

use std::fmt;
use std::str::FromStr;

use kurbo::{PathEl, Shape};

use crate::foundation::core::{BezPath, Point, Rect, Vec2};
use crate::foundation::error::{TweenlineError, TweenlineResult};

/// One cubic drawing command: two control points and an endpoint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubicCommand {
    /// First control point.
    pub c1: Point,
    /// Second control point.
    pub c2: Point,
    /// On-curve endpoint.
    pub end: Point,
}

/// A vector outline: one move command followed by cubic commands.
///
/// The first command is always a move and every later command is a cubic; an optional
/// trailing close flag is carried through round-trips but takes no part in morphing.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PathOutline {
    /// Move-to point.
    pub start: Point,
    /// Cubic commands in drawing order.
    pub cubics: Vec<CubicCommand>,
    /// Whether the textual form ends with `Z`.
    pub closed: bool,
}

impl PathOutline {
    /// Outline made of a single move command.
    pub fn new(start: Point) -> Self {
        Self {
            start,
            cubics: Vec::new(),
            closed: false,
        }
    }

    /// Parse the compact textual form: one move, then cubics, optionally closed.
    ///
    /// Relative commands, implicit repeats and any separators kurbo accepts are fine as long as
    /// the result has that shape.
    pub fn parse(d: &str) -> TweenlineResult<Self> {
        let path = read_svg(d)?;
        let els = path.elements();
        match els.split_first() {
            Some((PathEl::MoveTo(_), rest)) => {
                let body = match rest.split_last() {
                    Some((PathEl::ClosePath, body)) => body,
                    _ => rest,
                };
                if let Some(el) = body.iter().find(|el| !matches!(el, PathEl::CurveTo(..))) {
                    return Err(TweenlineError::outline(format!(
                        "outline may only continue with cubic commands, found {el:?}"
                    )));
                }
            }
            _ => {
                return Err(TweenlineError::outline(
                    "outline must start with a move command",
                ));
            }
        }
        Self::from_bezpath(&path)
            .ok_or_else(|| TweenlineError::outline("outline must start with a move command"))
    }

    /// Parse any path data, raising lines and quadratics to cubics and keeping the first
    /// subpath.
    pub fn from_svg(d: &str) -> TweenlineResult<Self> {
        Self::from_bezpath(&read_svg(d)?)
            .ok_or_else(|| TweenlineError::outline(format!("no drawable outline in \"{d}\"")))
    }

    /// Number of cubic commands.
    pub fn cubic_count(&self) -> usize {
        self.cubics.len()
    }

    /// Endpoints of every cubic, in order.
    pub fn endpoints(&self) -> Vec<Point> {
        self.cubics.iter().map(|c| c.end).collect()
    }

    /// Flat coordinate array: `[mx, my, c1x, c1y, c2x, c2y, x, y, …]`.
    pub fn to_flat(&self) -> Vec<f64> {
        let mut out = Vec::with_capacity(2 + self.cubics.len() * 6);
        out.extend([self.start.x, self.start.y]);
        for c in &self.cubics {
            out.extend([c.c1.x, c.c1.y, c.c2.x, c.c2.y, c.end.x, c.end.y]);
        }
        out
    }

    /// Rebuild an outline from a flat coordinate array (see [`PathOutline::to_flat`]).
    pub fn from_flat(nums: &[f64], closed: bool) -> TweenlineResult<Self> {
        if nums.len() < 2 || (nums.len() - 2) % 6 != 0 {
            return Err(TweenlineError::outline(format!(
                "flat outline needs 2 + 6n numbers, got {}",
                nums.len()
            )));
        }
        let cubics = nums[2..]
            .chunks_exact(6)
            .map(|g| CubicCommand {
                c1: Point::new(g[0], g[1]),
                c2: Point::new(g[2], g[3]),
                end: Point::new(g[4], g[5]),
            })
            .collect();
        Ok(Self {
            start: Point::new(nums[0], nums[1]),
            cubics,
            closed,
        })
    }

    /// Smooth outline through `points`, one cubic per consecutive pair with control points at
    /// one and two thirds of the chord.
    pub fn through_points(points: &[Point]) -> Option<Self> {
        let (&first, rest) = points.split_first()?;
        let mut out = Self::new(first);
        let mut prev = first;
        for &p in rest {
            out.cubics.push(CubicCommand {
                c1: Point::new((prev.x * 2.0 + p.x) / 3.0, (prev.y * 2.0 + p.y) / 3.0),
                c2: Point::new((prev.x + p.x * 2.0) / 3.0, (prev.y + p.y * 2.0) / 3.0),
                end: p,
            });
            prev = p;
        }
        Some(out)
    }

    /// Convert the first subpath of a kurbo path, raising lines and quadratics to cubics.
    ///
    /// Returns `None` for paths that do not start with a move.
    pub fn from_bezpath(path: &BezPath) -> Option<Self> {
        let mut elements = path.elements().iter();
        let PathEl::MoveTo(start) = *elements.next()? else {
            return None;
        };
        let mut out = Self::new(start);
        let mut prev = start;
        for el in elements {
            let cubic = match *el {
                PathEl::LineTo(p) => CubicCommand {
                    c1: prev.lerp(p, 1.0 / 3.0),
                    c2: prev.lerp(p, 2.0 / 3.0),
                    end: p,
                },
                PathEl::QuadTo(q, p) => CubicCommand {
                    c1: prev.lerp(q, 2.0 / 3.0),
                    c2: p.lerp(q, 2.0 / 3.0),
                    end: p,
                },
                PathEl::CurveTo(c1, c2, p) => CubicCommand { c1, c2, end: p },
                PathEl::ClosePath => {
                    out.closed = true;
                    break;
                }
                PathEl::MoveTo(_) => break,
            };
            prev = cubic.end;
            out.cubics.push(cubic);
        }
        Some(out)
    }

    /// Translate every point by `delta`.
    pub fn translated(&self, delta: Vec2) -> Self {
        Self {
            start: self.start + delta,
            cubics: self
                .cubics
                .iter()
                .map(|c| CubicCommand {
                    c1: c.c1 + delta,
                    c2: c.c2 + delta,
                    end: c.end + delta,
                })
                .collect(),
            closed: self.closed,
        }
    }

    /// Convert into a kurbo path.
    pub fn to_bezpath(&self) -> BezPath {
        let mut path = BezPath::new();
        path.move_to(self.start);
        for c in &self.cubics {
            path.curve_to(c.c1, c.c2, c.end);
        }
        if self.closed {
            path.close_path();
        }
        path
    }

    /// Tight bounding box of the drawn geometry.
    pub fn bounding_box(&self) -> Rect {
        if self.cubics.is_empty() {
            return Rect::from_points(self.start, self.start);
        }
        self.to_bezpath().bounding_box()
    }
}

impl fmt::Display for PathOutline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "M{} {}", self.start.x, self.start.y)?;
        for c in &self.cubics {
            write!(
                f,
                "C{} {} {} {} {} {}",
                c.c1.x, c.c1.y, c.c2.x, c.c2.y, c.end.x, c.end.y
            )?;
        }
        if self.closed {
            f.write_str("Z")?;
        }
        Ok(())
    }
}

impl FromStr for PathOutline {
    type Err = TweenlineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for PathOutline {
    type Error = TweenlineError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<PathOutline> for String {
    fn from(o: PathOutline) -> Self {
        o.to_string()
    }
}

fn read_svg(d: &str) -> TweenlineResult<BezPath> {
    BezPath::from_svg(d).map_err(|e| TweenlineError::outline(format!("invalid path data: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/path/outline.rs"]
mod tests;
