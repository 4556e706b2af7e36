//! Geometry of basic shapes read from their attributes.

use std::f64::consts::PI;

use kurbo::{Circle, Ellipse, Shape};

use crate::foundation::core::{BezPath, Point, Rect};
use crate::path::sampler::{BezMeasure, PathMeasure};
use crate::scene::element::ElementKind;

/// Attribute lookup used by the measurement helpers.
pub type AttrLookup<'a> = &'a dyn Fn(&str) -> Option<String>;

const SHAPE_TOLERANCE: f64 = 0.1;

/// Leading number of an attribute value (`"12.5px"` reads as `12.5`).
pub fn parse_number(s: &str) -> Option<f64> {
    let s = s.trim();
    let end = s
        .char_indices()
        .find(|&(i, c)| {
            !(c.is_ascii_digit()
                || c == '.'
                || ((c == '-' || c == '+') && (i == 0 || matches!(s.as_bytes()[i - 1], b'e' | b'E')))
                || ((c == 'e' || c == 'E') && i > 0))
        })
        .map_or(s.len(), |(i, _)| i);
    let head = &s[..end];
    head.parse()
        .ok()
        .or_else(|| head.trim_end_matches(['e', 'E']).parse().ok())
}

/// Parse a `points` attribute (`"x,y x,y"` or `"x y x y"`).
pub fn parse_points(s: &str) -> Vec<Point> {
    let nums: Vec<f64> = s
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .filter_map(|t| t.parse().ok())
        .collect();
    nums.chunks_exact(2).map(|p| Point::new(p[0], p[1])).collect()
}

fn num(attr: AttrLookup<'_>, name: &str) -> f64 {
    attr(name).as_deref().and_then(parse_number).unwrap_or(0.0)
}

fn polyline_length(points: &[Point]) -> f64 {
    points.windows(2).map(|w| w[0].distance(w[1])).sum()
}

/// Total outline length of an element.
pub fn total_length(kind: &ElementKind, attr: AttrLookup<'_>) -> Option<f64> {
    match kind {
        ElementKind::Circle => Some(2.0 * PI * num(attr, "r")),
        ElementKind::Rect => Some(2.0 * num(attr, "width") + 2.0 * num(attr, "height")),
        ElementKind::Line => Some(
            Point::new(num(attr, "x1"), num(attr, "y1"))
                .distance(Point::new(num(attr, "x2"), num(attr, "y2"))),
        ),
        ElementKind::Polyline => Some(polyline_length(&parse_points(&attr("points")?))),
        ElementKind::Polygon => {
            let pts = parse_points(&attr("points")?);
            let closing = match (pts.first(), pts.last()) {
                (Some(a), Some(b)) => a.distance(*b),
                _ => 0.0,
            };
            Some(polyline_length(&pts) + closing)
        }
        ElementKind::Ellipse => {
            // Ramanujan's approximation.
            let (a, b) = (num(attr, "rx"), num(attr, "ry"));
            Some(PI * (3.0 * (a + b) - ((3.0 * a + b) * (a + 3.0 * b)).sqrt()))
        }
        ElementKind::Path => outline_path(kind, attr).map(|p| BezMeasure::new(&p).total_length()),
        _ => None,
    }
}

/// Point at arc length `len` along an element's outline.
pub fn point_at_length(kind: &ElementKind, attr: AttrLookup<'_>, len: f64) -> Option<Point> {
    let path = outline_path(kind, attr)?;
    if path.elements().is_empty() {
        return None;
    }
    Some(BezMeasure::new(&path).point_at_length(len))
}

/// Outline of an element as a kurbo path.
pub fn outline_path(kind: &ElementKind, attr: AttrLookup<'_>) -> Option<BezPath> {
    match kind {
        ElementKind::Path => BezPath::from_svg(&attr("d")?).ok(),
        ElementKind::Rect | ElementKind::Image => Some(rect_of(attr).to_path(SHAPE_TOLERANCE)),
        ElementKind::Circle => Some(
            Circle::new((num(attr, "cx"), num(attr, "cy")), num(attr, "r"))
                .to_path(SHAPE_TOLERANCE),
        ),
        ElementKind::Ellipse => Some(
            Ellipse::new(
                (num(attr, "cx"), num(attr, "cy")),
                (num(attr, "rx"), num(attr, "ry")),
                0.0,
            )
            .to_path(SHAPE_TOLERANCE),
        ),
        ElementKind::Line => {
            let mut p = BezPath::new();
            p.move_to((num(attr, "x1"), num(attr, "y1")));
            p.line_to((num(attr, "x2"), num(attr, "y2")));
            Some(p)
        }
        ElementKind::Polyline | ElementKind::Polygon => {
            let pts = parse_points(&attr("points")?);
            let (&first, rest) = pts.split_first()?;
            let mut p = BezPath::new();
            p.move_to(first);
            for &pt in rest {
                p.line_to(pt);
            }
            if *kind == ElementKind::Polygon {
                p.close_path();
            }
            Some(p)
        }
        _ => None,
    }
}

fn rect_of(attr: AttrLookup<'_>) -> Rect {
    let (x, y) = (num(attr, "x"), num(attr, "y"));
    Rect::new(x, y, x + num(attr, "width"), y + num(attr, "height"))
}

/// Local-space bounding box derived from geometry attributes.
///
/// Text boxes are estimated from the font size and character count.
pub fn bounding_box(kind: &ElementKind, attr: AttrLookup<'_>) -> Option<Rect> {
    match kind {
        ElementKind::Rect | ElementKind::Image => Some(rect_of(attr)),
        ElementKind::Text => {
            let size = attr("font-size")
                .as_deref()
                .and_then(parse_number)
                .unwrap_or(16.0);
            let chars = attr("text").map_or(0, |t| t.chars().count()) as f64;
            let (x, y) = (num(attr, "x"), num(attr, "y"));
            Some(Rect::new(x, y - size, x + chars * size * 0.6, y))
        }
        ElementKind::Circle => {
            let r = num(attr, "r");
            let (cx, cy) = (num(attr, "cx"), num(attr, "cy"));
            Some(Rect::new(cx - r, cy - r, cx + r, cy + r))
        }
        ElementKind::Ellipse => {
            let (rx, ry) = (num(attr, "rx"), num(attr, "ry"));
            let (cx, cy) = (num(attr, "cx"), num(attr, "cy"));
            Some(Rect::new(cx - rx, cy - ry, cx + rx, cy + ry))
        }
        ElementKind::Group | ElementKind::Other(_) => None,
        _ => outline_path(kind, attr).map(|p| {
            if p.elements().is_empty() {
                Rect::ZERO
            } else {
                p.bounding_box()
            }
        }),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/measure.rs"]
mod tests;
