use std::fmt;

use crate::animation::lerp::Lerp;
use crate::foundation::error::{TweenlineError, TweenlineResult};

/// Solid color with 0..=255 RGB channels and a 0..=1 alpha, as written in CSS.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct ColorDef {
    /// Red channel.
    pub r: f64,
    /// Green channel.
    pub g: f64,
    /// Blue channel.
    pub b: f64,
    /// Alpha.
    pub a: f64,
}

impl ColorDef {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);

    /// Build a color from its channels.
    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, `rgb(..)`, `rgba(..)` or `transparent`.
    pub fn parse(s: &str) -> TweenlineResult<Self> {
        let s = s.trim();
        if s.starts_with('#') {
            return parse_hex(s).map_err(TweenlineError::validation);
        }
        if s.eq_ignore_ascii_case("transparent") {
            return Ok(Self::TRANSPARENT);
        }
        parse_functional(s).map_err(TweenlineError::validation)
    }

    /// Channels as `[r, g, b, a]`.
    pub fn to_array(self) -> [f64; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl fmt::Display for ColorDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn channel(x: f64) -> f64 {
            x.clamp(0.0, 255.0).round()
        }
        let a = (self.a.clamp(0.0, 1.0) * 1000.0).round() / 1000.0;
        write!(
            f,
            "rgba({},{},{},{})",
            channel(self.r),
            channel(self.g),
            channel(self.b),
            a
        )
    }
}

impl Lerp for ColorDef {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self::rgba(
            <f64 as Lerp>::lerp(&a.r, &b.r, t),
            <f64 as Lerp>::lerp(&a.g, &b.g, t),
            <f64 as Lerp>::lerp(&a.b, &b.b, t),
            <f64 as Lerp>::lerp(&a.a, &b.a, t),
        )
    }
}

fn parse_hex(s: &str) -> Result<ColorDef, String> {
    let digits = s.strip_prefix('#').unwrap_or(s);

    fn nibble(c: u8) -> Result<u8, String> {
        (c as char)
            .to_digit(16)
            .map(|d| d as u8)
            .ok_or_else(|| format!("invalid hex digit '{}'", c as char))
    }

    let bytes = digits.as_bytes();
    let channels: Vec<u8> = match bytes.len() {
        3 | 4 => bytes
            .iter()
            .map(|&c| nibble(c).map(|n| n * 17))
            .collect::<Result<_, _>>()?,
        6 | 8 => bytes
            .chunks_exact(2)
            .map(|p| Ok(nibble(p[0])? * 16 + nibble(p[1])?))
            .collect::<Result<_, String>>()?,
        _ => {
            return Err(format!(
                "hex color must be #RGB, #RGBA, #RRGGBB or #RRGGBBAA, got \"{s}\""
            ));
        }
    };

    let a = channels.get(3).map_or(1.0, |&a| f64::from(a) / 255.0);
    Ok(ColorDef::rgba(
        f64::from(channels[0]),
        f64::from(channels[1]),
        f64::from(channels[2]),
        a,
    ))
}

fn parse_functional(s: &str) -> Result<ColorDef, String> {
    let lower = s.to_ascii_lowercase();
    let inner = lower
        .strip_prefix("rgba(")
        .or_else(|| lower.strip_prefix("rgb("))
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(|| format!("unsupported color \"{s}\""))?;

    let parts = inner
        .split(',')
        .map(|p| {
            let p = p.trim();
            p.parse::<f64>()
                .map_err(|_| format!("invalid color channel \"{p}\" in \"{s}\""))
        })
        .collect::<Result<Vec<_>, _>>()?;

    match parts.as_slice() {
        [r, g, b] => Ok(ColorDef::rgba(*r, *g, *b, 1.0)),
        [r, g, b, a] => Ok(ColorDef::rgba(*r, *g, *b, *a)),
        _ => Err(format!("rgb()/rgba() needs 3 or 4 channels, got \"{s}\"")),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/paint/color.rs"]
mod tests;
