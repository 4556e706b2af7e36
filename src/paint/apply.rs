//! Paint values as written onto scene elements.

use crate::foundation::core::Point;
use crate::paint::color::ColorDef;
use crate::paint::gradient::{GradientData, GradientKind};

/// Which paint slot of an element a color property drives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaintChannel {
    /// `fill`.
    Fill,
    /// `stroke`.
    Stroke,
}

impl PaintChannel {
    /// Attribute / property name of the channel.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fill => "fill",
            Self::Stroke => "stroke",
        }
    }
}

/// Gradient stop with a fractional (`0..=1`) offset.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct PaintStop {
    /// Fractional position.
    pub offset: f64,
    /// Stop color.
    pub color: ColorDef,
}

/// A gradient ready to be registered in a scene and referenced by id.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct GradientPaint {
    /// Scene-unique gradient id.
    pub id: String,
    /// Geometry.
    pub kind: GradientKind,
    /// Direction in degrees.
    pub angle: f64,
    /// Stops with fractional offsets.
    pub stops: Vec<PaintStop>,
    /// `(from, to)` in object-bounding-box units; `None` for radial gradients.
    pub vector: Option<(Point, Point)>,
}

impl GradientPaint {
    /// Build a paint from parsed gradient data.
    pub fn from_data(id: impl Into<String>, data: &GradientData) -> Self {
        Self {
            id: id.into(),
            kind: data.kind,
            angle: data.angle,
            stops: data
                .stops
                .iter()
                .map(|s| PaintStop {
                    offset: s.offset / 100.0,
                    color: s.color,
                })
                .collect(),
            vector: match data.kind {
                GradientKind::Linear => Some(linear_vector(data.angle)),
                GradientKind::Radial => None,
            },
        }
    }
}

/// Gradient vector for a CSS angle in bounding-box units.
///
/// CSS measures `0deg` as "to top" while the SVG vector is measured from the x axis, hence the
/// quarter-turn offset.
pub fn linear_vector(angle_deg: f64) -> (Point, Point) {
    let rad = (angle_deg + 90.0).to_radians();
    let (sin, cos) = rad.sin_cos();
    (
        Point::new(0.5 + 0.5 * cos, 0.5 + 0.5 * sin),
        Point::new(0.5 - 0.5 * cos, 0.5 - 0.5 * sin),
    )
}

/// Gradient id used when no id hook is configured.
pub fn default_gradient_id(element_id: &str, channel: PaintChannel) -> String {
    format!("{element_id}-{}-gradient", channel.as_str())
}

/// Value written into a fill or stroke slot.
#[derive(Clone, Debug, PartialEq)]
pub enum Paint {
    /// A plain color (or any other CSS paint string such as `none`).
    Solid(String),
    /// A gradient reference.
    Gradient(GradientPaint),
}

#[cfg(test)]
#[path = "../../tests/unit/paint/apply.rs"]
mod tests;
