use crate::animation::bezier::ease_curve;

/// Cubic-bezier easing curve `[x1, y1, x2, y2]` (CSS `cubic-bezier` semantics).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EaseCurve(pub [f64; 4]);

impl EaseCurve {
    /// Identity curve.
    pub const LINEAR: Self = Self([0.0, 0.0, 1.0, 1.0]);

    /// Look up a built-in named curve.
    pub fn named(name: &str) -> Option<Self> {
        EASINGS
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, c)| Self(*c))
    }

    /// Map normalized progress through the curve.
    pub fn apply(self, t: f64) -> f64 {
        ease_curve(t, self.0)
    }
}

impl Default for EaseCurve {
    fn default() -> Self {
        Self::LINEAR
    }
}

/// Built-in easing table.
pub const EASINGS: &[(&str, [f64; 4])] = &[
    ("linear", [0.0, 0.0, 1.0, 1.0]),
    ("easeInQuad", [0.55, 0.085, 0.68, 0.53]),
    ("easeOutQuad", [0.25, 0.46, 0.45, 0.94]),
    ("easeInOutQuad", [0.455, 0.03, 0.515, 0.955]),
    ("easeInCubic", [0.55, 0.055, 0.675, 0.19]),
    ("easeOutCubic", [0.215, 0.61, 0.355, 1.0]),
    ("easeInOutCubic", [0.645, 0.045, 0.355, 1.0]),
    ("easeInQuart", [0.895, 0.03, 0.685, 0.22]),
    ("easeOutQuart", [0.165, 0.84, 0.44, 1.0]),
    ("easeInOutQuart", [0.77, 0.0, 0.175, 1.0]),
    ("easeInQuint", [0.755, 0.05, 0.855, 0.06]),
    ("easeOutQuint", [0.23, 1.0, 0.32, 1.0]),
    ("easeInOutQuint", [0.86, 0.0, 0.07, 1.0]),
    ("easeInSine", [0.47, 0.0, 0.745, 0.715]),
    ("easeOutSine", [0.39, 0.575, 0.565, 1.0]),
    ("easeInOutSine", [0.445, 0.05, 0.55, 0.95]),
    ("easeInExpo", [0.95, 0.05, 0.795, 0.035]),
    ("easeOutExpo", [0.19, 1.0, 0.22, 1.0]),
    ("easeInOutExpo", [1.0, 0.0, 0.0, 1.0]),
    ("easeInCirc", [0.6, 0.04, 0.98, 0.335]),
    ("easeOutCirc", [0.075, 0.82, 0.165, 1.0]),
    ("easeInOutCirc", [0.785, 0.135, 0.15, 0.86]),
    ("easeInElastic", [0.47, -0.03, 0.745, 0.715]),
    ("easeOutElastic", [0.39, 0.575, 0.565, 1.425]),
    ("easeInOutElastic", [0.68, -0.55, 0.265, 1.55]),
    ("easeInBounce", [0.6, -0.28, 0.735, 0.045]),
    ("easeOutBounce", [0.175, 0.885, 0.32, 1.275]),
    ("easeInOutBounce", [0.68, -0.55, 0.265, 1.55]),
];

/// Easing as written in an animation step: a table name or an explicit curve.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum EaseSpec {
    /// Name from [`EASINGS`].
    Named(String),
    /// Caller-supplied `[x1, y1, x2, y2]`.
    Curve([f64; 4]),
}

impl EaseSpec {
    /// Resolve to a curve. Unknown names fall back to linear.
    pub fn resolve(&self) -> EaseCurve {
        match self {
            Self::Named(name) => EaseCurve::named(name).unwrap_or_else(|| {
                tracing::warn!(easing = %name, "unknown easing, using linear");
                EaseCurve::LINEAR
            }),
            Self::Curve(c) => EaseCurve(*c),
        }
    }
}

impl From<&str> for EaseSpec {
    fn from(name: &str) -> Self {
        Self::Named(name.to_owned())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
