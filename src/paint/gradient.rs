use std::fmt;

use crate::foundation::error::{TweenlineError, TweenlineResult};
use crate::paint::color::ColorDef;

/// Number of flat-array entries per gradient stop (`r, g, b, a, offset`).
pub const STOP_STRIDE: usize = 5;

/// Gradient geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientKind {
    /// `linear-gradient(..)`.
    Linear,
    /// `radial-gradient(..)`.
    Radial,
}

impl GradientKind {
    /// CSS function prefix (`linear` / `radial`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Radial => "radial",
        }
    }
}

/// One color stop; `offset` is a percentage.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct GradientStop {
    /// Stop color.
    pub color: ColorDef,
    /// Position along the gradient, `0..=100`.
    pub offset: f64,
}

/// Parsed gradient value.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct GradientData {
    /// Geometry.
    pub kind: GradientKind,
    /// Direction in degrees (CSS convention).
    pub angle: f64,
    /// Stops in declaration order.
    pub stops: Vec<GradientStop>,
}

impl GradientData {
    /// Parse `linear-gradient(<angle>deg, <color> <pct>%, ...)` or the radial equivalent.
    ///
    /// Stops without an offset are spread evenly.
    pub fn parse(s: &str) -> TweenlineResult<Self> {
        let s = s.trim();
        let lower = s.to_ascii_lowercase();
        let kind = if lower.starts_with("linear-gradient(") {
            GradientKind::Linear
        } else if lower.starts_with("radial-gradient(") {
            GradientKind::Radial
        } else {
            return Err(TweenlineError::validation(format!(
                "unsupported gradient \"{s}\""
            )));
        };
        let open = lower.find('(').unwrap_or(0);
        let inner = lower[open + 1..]
            .strip_suffix(')')
            .ok_or_else(|| TweenlineError::validation(format!("unterminated gradient \"{s}\"")))?;

        let mut args = split_top_level(inner).into_iter().peekable();
        let mut angle = 0.0;
        if let Some(first) = args.peek() {
            if let Some(deg) = first.strip_suffix("deg") {
                angle = deg.trim().parse::<f64>().map_err(|_| {
                    TweenlineError::validation(format!("invalid gradient angle \"{first}\""))
                })?;
                args.next();
            } else if !looks_like_stop(first) {
                // Shape keywords such as `circle` carry nothing we interpolate.
                args.next();
            }
        }

        let raw: Vec<(ColorDef, Option<f64>)> = args
            .map(parse_stop)
            .collect::<TweenlineResult<_>>()?;
        if raw.is_empty() {
            return Err(TweenlineError::validation(format!(
                "gradient without color stops \"{s}\""
            )));
        }
        let last = (raw.len() - 1).max(1) as f64;
        let stops = raw
            .into_iter()
            .enumerate()
            .map(|(i, (color, offset))| GradientStop {
                color,
                offset: offset.unwrap_or(i as f64 / last * 100.0),
            })
            .collect();

        Ok(Self { kind, angle, stops })
    }

    /// Flat `[angle, r, g, b, a, offset, ...]` array.
    pub fn to_flat(&self) -> Vec<f64> {
        let mut out = Vec::with_capacity(1 + self.stops.len() * STOP_STRIDE);
        out.push(self.angle);
        for stop in &self.stops {
            out.extend(stop.color.to_array());
            out.push(stop.offset);
        }
        out
    }

    /// Rebuild from a flat array (see [`GradientData::to_flat`]); trailing partial stops are
    /// ignored.
    pub fn from_flat(kind: GradientKind, flat: &[f64]) -> Self {
        let Some((&angle, rest)) = flat.split_first() else {
            return Self {
                kind,
                angle: 0.0,
                stops: Vec::new(),
            };
        };
        let stops = rest
            .chunks_exact(STOP_STRIDE)
            .map(|s| GradientStop {
                color: ColorDef::rgba(s[0], s[1], s[2], s[3]),
                offset: s[4],
            })
            .collect();
        Self { kind, angle, stops }
    }

    /// Same structure with every stop painted `color`.
    pub fn filled_with(&self, color: ColorDef) -> Self {
        Self {
            kind: self.kind,
            angle: self.angle,
            stops: self
                .stops
                .iter()
                .map(|s| GradientStop {
                    color,
                    offset: s.offset,
                })
                .collect(),
        }
    }

    /// Pad with copies of the last stop up to `count` stops.
    pub fn padded_to(mut self, count: usize) -> Self {
        if let Some(&last) = self.stops.last() {
            while self.stops.len() < count {
                self.stops.push(last);
            }
        }
        self
    }
}

impl fmt::Display for GradientData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-gradient({}deg", self.kind.as_str(), self.angle)?;
        for stop in &self.stops {
            write!(f, ", {} {}%", stop.color, stop.offset)?;
        }
        f.write_str(")")
    }
}

/// A color property value: solid or gradient.
#[derive(Clone, Debug, PartialEq)]
pub enum ColorValue {
    /// Plain color.
    Solid(ColorDef),
    /// Gradient.
    Gradient(GradientData),
}

impl ColorValue {
    /// Parse a solid color or a gradient string.
    pub fn parse(s: &str) -> TweenlineResult<Self> {
        if is_gradient(s) {
            GradientData::parse(s).map(Self::Gradient)
        } else {
            ColorDef::parse(s).map(Self::Solid)
        }
    }
}

/// Whether `s` is written as a gradient function.
pub fn is_gradient(s: &str) -> bool {
    s.to_ascii_lowercase().contains("-gradient(")
}

/// Bring two color values onto a common gradient structure.
///
/// Returns `None` when both are solid. A solid side takes the other side's structure with all
/// stops in its color; unequal stop counts are equalized by repeating the last stop.
pub fn gradient_endpoints(
    from: &ColorValue,
    to: &ColorValue,
) -> Option<(GradientData, GradientData)> {
    let (a, b) = match (from, to) {
        (ColorValue::Solid(_), ColorValue::Solid(_)) => return None,
        (ColorValue::Solid(c), ColorValue::Gradient(g)) => (g.filled_with(*c), g.clone()),
        (ColorValue::Gradient(g), ColorValue::Solid(c)) => (g.clone(), g.filled_with(*c)),
        (ColorValue::Gradient(a), ColorValue::Gradient(b)) => (a.clone(), b.clone()),
    };
    let count = a.stops.len().max(b.stops.len());
    Some((a.padded_to(count), b.padded_to(count)))
}

fn looks_like_stop(arg: &str) -> bool {
    let head = arg.split_whitespace().next().unwrap_or("");
    head.starts_with('#') || head.starts_with("rgb") || head == "transparent"
}

fn parse_stop(arg: &str) -> TweenlineResult<(ColorDef, Option<f64>)> {
    let arg = arg.trim();
    // The offset, when present, follows the closing parenthesis or the hex literal.
    if let Some((color, pct)) = arg.rsplit_once(char::is_whitespace) {
        if let Some(num) = pct.strip_suffix('%') {
            let offset = num.parse::<f64>().map_err(|_| {
                TweenlineError::validation(format!("invalid gradient offset \"{pct}\""))
            })?;
            return Ok((ColorDef::parse(color)?, Some(offset)));
        }
    }
    Ok((ColorDef::parse(arg)?, None))
}

/// Split on commas that are not nested inside parentheses.
fn split_top_level(s: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in s.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                out.push(s[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    let tail = s[start..].trim();
    if !tail.is_empty() {
        out.push(tail);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/paint/gradient.rs"]
mod tests;
