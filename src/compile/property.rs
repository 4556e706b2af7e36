//! Classification of animated property names.

use crate::paint::apply::PaintChannel;

/// Properties compiled first, in this order; everything else follows in declaration order.
pub const CANONICAL_ORDER: &[&str] = &[
    "translateX",
    "translateY",
    "anchor",
    "scaleX",
    "scaleY",
    "rotate",
    "width",
    "height",
    "strokeDashoffset",
];

/// Attributes whose change alters an element's geometry (and so its bounding box).
pub const GEOMETRY_ATTRIBUTES: &[&str] = &["d", "points", "text"];

/// Transform component driven by a property.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransformProp {
    /// `translateX`.
    TranslateX,
    /// `translateY`.
    TranslateY,
    /// `anchor` (transform origin as bbox fractions).
    Anchor,
    /// `scaleX`.
    ScaleX,
    /// `scaleY`.
    ScaleY,
    /// `rotate` (degrees).
    Rotate,
}

/// Size dimension.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SizeAxis {
    /// `width`.
    Width,
    /// `height`.
    Height,
}

/// Path-driven property.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PathProp {
    /// `morphTo`: morph into another element's outline.
    MorphTo,
    /// `d`: animate the outline data directly.
    Direct,
    /// `followPath`: move along another element's outline.
    FollowPath,
}

/// Stroke property.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StrokeProp {
    /// `strokeWidth`.
    Width,
    /// `strokeDasharray`.
    Dasharray,
    /// `strokeDashoffset` (percent of the outline length).
    Dashoffset,
}

impl StrokeProp {
    /// Attribute written for this property.
    pub fn attribute(self) -> &'static str {
        match self {
            Self::Width => "stroke-width",
            Self::Dasharray => "stroke-dasharray",
            Self::Dashoffset => "stroke-dashoffset",
        }
    }
}

/// Effect (filter) property.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EffectProp {
    /// `effectX`.
    X,
    /// `effectY`.
    Y,
    /// `effectBlur`.
    Blur,
    /// `effectColor`.
    Color,
}

/// Property kind, resolved once per property name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    /// Transform component.
    Transform(TransformProp),
    /// Fill or stroke paint.
    Color(PaintChannel),
    /// Width or height.
    Size(SizeAxis),
    /// Outline-driven.
    Path(PathProp),
    /// Stroke attribute.
    Stroke(StrokeProp),
    /// Effect primitive attribute.
    Effect(EffectProp),
    /// Any other attribute, written as is.
    Other(String),
}

impl PropertyKind {
    /// Classify a property name.
    pub fn from_name(name: &str) -> Self {
        match name {
            "translateX" => Self::Transform(TransformProp::TranslateX),
            "translateY" => Self::Transform(TransformProp::TranslateY),
            "anchor" => Self::Transform(TransformProp::Anchor),
            "scaleX" => Self::Transform(TransformProp::ScaleX),
            "scaleY" => Self::Transform(TransformProp::ScaleY),
            "rotate" => Self::Transform(TransformProp::Rotate),
            "fill" => Self::Color(PaintChannel::Fill),
            "stroke" => Self::Color(PaintChannel::Stroke),
            "width" => Self::Size(SizeAxis::Width),
            "height" => Self::Size(SizeAxis::Height),
            "morphTo" => Self::Path(PathProp::MorphTo),
            "d" => Self::Path(PathProp::Direct),
            "followPath" => Self::Path(PathProp::FollowPath),
            "strokeWidth" => Self::Stroke(StrokeProp::Width),
            "strokeDasharray" => Self::Stroke(StrokeProp::Dasharray),
            "strokeDashoffset" => Self::Stroke(StrokeProp::Dashoffset),
            "effectX" => Self::Effect(EffectProp::X),
            "effectY" => Self::Effect(EffectProp::Y),
            "effectBlur" => Self::Effect(EffectProp::Blur),
            "effectColor" => Self::Effect(EffectProp::Color),
            other => Self::Other(other.to_owned()),
        }
    }

    /// Whether this kind changes the element's size as seen by its outline length.
    pub fn resizes(&self) -> bool {
        matches!(
            self,
            Self::Size(_) | Self::Transform(TransformProp::ScaleX | TransformProp::ScaleY)
        )
    }

    /// Whether writing this kind can change the element's bounding box.
    pub fn alters_geometry(&self) -> bool {
        match self {
            Self::Size(_) | Self::Path(PathProp::MorphTo | PathProp::Direct) => true,
            Self::Other(name) => GEOMETRY_ATTRIBUTES.contains(&name.as_str()),
            _ => false,
        }
    }
}

/// Move canonical properties to the front (in canonical order), keeping the rest in place.
pub fn canonical_order<T>(mut props: Vec<(String, T)>) -> Vec<(String, T)> {
    let mut out = Vec::with_capacity(props.len());
    for &name in CANONICAL_ORDER {
        if let Some(i) = props.iter().position(|(n, _)| n == name) {
            out.push(props.remove(i));
        }
    }
    out.extend(props);
    out
}

#[cfg(test)]
#[path = "../../tests/unit/compile/property.rs"]
mod tests;
