//! Compiled tween records and their interpolators.

use crate::animation::ease::EaseCurve;
use crate::animation::lerp::Lerp;
use crate::compile::property::PropertyKind;
use crate::foundation::core::Anchor;
use crate::paint::color::ColorDef;
use crate::paint::gradient::{GradientData, GradientKind};
use crate::path::morph::PathMorph;
use crate::path::outline::PathOutline;
use crate::scene::element::{ElementId, Scene};

/// Where an effect property writes: `filter_property` of the element matched by
/// `filter_selector` inside the element matched by `effect_selector`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EffectTarget {
    /// Effect element selector.
    pub effect_selector: String,
    /// Primitive selector within the effect element.
    pub filter_selector: String,
    /// Attribute written on the primitive.
    pub filter_property: String,
}

impl EffectTarget {
    /// Element that receives the attribute, if both selectors resolve.
    pub fn resolve<S: Scene + ?Sized>(&self, scene: &S) -> Option<ElementId> {
        let effect = scene.select(&self.effect_selector).into_iter().next()?;
        scene.find_within(&effect, &self.filter_selector)
    }
}

/// Value produced by an [`Interpolator`] for one progress value.
#[derive(Clone, Debug, PartialEq)]
pub enum TweenValue {
    /// Scalar.
    Number(f64),
    /// Transform origin.
    Anchor(Anchor),
    /// Solid color.
    Color(ColorDef),
    /// Gradient.
    Gradient(GradientData),
    /// Outline data.
    Outline(PathOutline),
    /// Non-interpolatable value.
    Text(String),
}

/// Progress-to-value function of one tween.
#[derive(Clone, Debug, PartialEq)]
pub enum Interpolator {
    /// Scalar transform component, number attribute, size, or followed-path length.
    Number {
        /// Value at progress 0.
        from: f64,
        /// Value at progress 1.
        to: f64,
    },
    /// Anchor fractions.
    Anchor {
        /// Anchor at progress 0.
        from: Anchor,
        /// Anchor at progress 1.
        to: Anchor,
    },
    /// Solid colors, channel-wise.
    Color {
        /// Color at progress 0.
        from: ColorDef,
        /// Color at progress 1.
        to: ColorDef,
    },
    /// Gradients as equal-length flat arrays.
    Gradient {
        /// Geometry of the result.
        kind: GradientKind,
        /// Flat array at progress 0.
        from: Vec<f64>,
        /// Flat array at progress 1.
        to: Vec<f64>,
    },
    /// Outline morph.
    Morph(Box<PathMorph>),
    /// Values that cannot be blended: `from` until progress 1, then `to`.
    Discrete {
        /// Value before completion.
        from: String,
        /// Value at completion.
        to: String,
    },
}

impl Interpolator {
    /// Evaluate at (already eased) progress `t`.
    pub fn at(&self, t: f64) -> TweenValue {
        match self {
            Self::Number { from, to } => TweenValue::Number(<f64 as Lerp>::lerp(from, to, t)),
            Self::Anchor { from, to } => TweenValue::Anchor(Anchor::lerp(from, to, t)),
            Self::Color { from, to } => TweenValue::Color(ColorDef::lerp(from, to, t)),
            Self::Gradient { kind, from, to } => {
                TweenValue::Gradient(GradientData::from_flat(*kind, &Vec::lerp(from, to, t)))
            }
            Self::Morph(m) => TweenValue::Outline(m.at(t)),
            Self::Discrete { from, to } => {
                TweenValue::Text(if t >= 1.0 { to.clone() } else { from.clone() })
            }
        }
    }
}

/// Extra data some property kinds carry into rendering.
#[derive(Clone, Debug, PartialEq)]
pub enum TweenSide {
    /// Nothing beyond the interpolated value.
    None,
    /// `followPath`: the followed element and placement flags.
    FollowPath {
        /// Followed element.
        path: ElementId,
        /// Center the target on the path point.
        centered: bool,
        /// Orient the target along the path tangent.
        rotated: bool,
    },
    /// `strokeDashoffset`: outline length measured at compile time.
    DashLength(f64),
    /// Effect properties.
    Effect(EffectTarget),
}

/// One compiled tween: a property step of one target.
#[derive(Clone, Debug, PartialEq)]
pub struct TweenRecord {
    /// Animated element.
    pub target: ElementId,
    /// Property name as written.
    pub property: String,
    /// Resolved property kind.
    pub kind: PropertyKind,
    /// Value function.
    pub interpolator: Interpolator,
    /// Easing applied to local progress.
    pub easing: EaseCurve,
    /// Absolute start delay (ms), including the timeline delay.
    pub delay: f64,
    /// Duration (ms).
    pub duration: f64,
    /// Whether the delay came from a stagger schedule.
    pub staggered: bool,
    /// Kind-specific data.
    pub side: TweenSide,
}

impl TweenRecord {
    /// Delay in effect; a full reset starts staggered records immediately.
    pub fn effective_delay(&self, full_reset: bool) -> f64 {
        if full_reset && self.staggered {
            0.0
        } else {
            self.delay
        }
    }

    /// Local progress at `elapsed`, clamped to `[0, 1]`.
    pub fn local_progress(&self, elapsed: f64, full_reset: bool) -> f64 {
        let delay = self.effective_delay(full_reset);
        ((elapsed - delay) / self.duration.max(1.0)).clamp(0.0, 1.0)
    }

    /// End time (ms) on the timeline.
    pub fn end(&self) -> f64 {
        self.delay + self.duration
    }

    /// Eased value at `elapsed`.
    pub fn value_at(&self, elapsed: f64, full_reset: bool) -> TweenValue {
        let t = self.local_progress(elapsed, full_reset);
        self.interpolator.at(self.easing.apply(t))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compile/tween.rs"]
mod tests;
