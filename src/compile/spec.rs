//! Declarative animation input: targets plus an ordered list of property step lists.

use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use crate::animation::ease::EaseSpec;
use crate::foundation::error::{TweenlineError, TweenlineResult};

/// Value of one step.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum StepValue {
    /// Plain number (transforms, sizes, strokes, effects, `strokeDashoffset` percent).
    Number(f64),
    /// Coordinate pair (`anchor`).
    Pair([f64; 2]),
    /// Text (colors, gradients, outlines, selectors for `morphTo`/`followPath`).
    Text(String),
}

impl StepValue {
    /// Numeric value; numeric text such as `"12px"` is accepted.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => crate::scene::measure::parse_number(s),
            Self::Pair(_) => None,
        }
    }

    /// Text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<f64> for StepValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<[f64; 2]> for StepValue {
    fn from(v: [f64; 2]) -> Self {
        Self::Pair(v)
    }
}

impl From<&str> for StepValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

/// First two entries of a stagger schedule: an absolute count or a percentage of the
/// collection size.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum StaggerBound {
    /// Absolute element count.
    Count(f64),
    /// Percentage string such as `"25%"`.
    Percent(String),
}

/// Start delay of a step.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum DelaySpec {
    /// Same delay for every target (ms).
    Fixed(f64),
    /// `[start, range, gap]`: targets before `start` wait 0, then every `range` targets wait
    /// another `gap` ms.
    Stagger(StaggerBound, StaggerBound, f64),
}

impl Default for DelaySpec {
    fn default() -> Self {
        Self::Fixed(0.0)
    }
}

/// Property-specific step parameters.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StepParams {
    /// `followPath`: center the element on the path.
    pub centered: bool,
    /// `followPath`: orient the element along the path tangent.
    pub rotated: bool,
    /// Effect properties: selector of the effect element.
    pub effect_selector: Option<String>,
    /// Effect properties: selector of the primitive inside the effect element.
    pub filter_selector: Option<String>,
    /// Effect properties: attribute written on the primitive.
    pub filter_property: Option<String>,
}

/// One step of a property's animation.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepSpec {
    /// Target value.
    pub value: StepValue,
    /// Duration (ms).
    #[serde(default)]
    pub duration: f64,
    /// Start delay.
    #[serde(default)]
    pub delay: DelaySpec,
    /// Easing; the timeline default applies when absent.
    #[serde(default)]
    pub easing: Option<EaseSpec>,
    /// Property-specific parameters.
    #[serde(default)]
    pub params: StepParams,
}

impl StepSpec {
    /// Step towards `value` with zero duration and delay.
    pub fn to(value: impl Into<StepValue>) -> Self {
        Self {
            value: value.into(),
            duration: 0.0,
            delay: DelaySpec::default(),
            easing: None,
            params: StepParams::default(),
        }
    }

    /// Set the duration (ms).
    pub fn duration(mut self, ms: f64) -> Self {
        self.duration = ms;
        self
    }

    /// Set a fixed delay (ms).
    pub fn delay(mut self, ms: f64) -> Self {
        self.delay = DelaySpec::Fixed(ms);
        self
    }

    /// Set a stagger schedule.
    pub fn stagger(mut self, start: StaggerBound, range: StaggerBound, gap: f64) -> Self {
        self.delay = DelaySpec::Stagger(start, range, gap);
        self
    }

    /// Set the easing.
    pub fn easing(mut self, easing: impl Into<EaseSpec>) -> Self {
        self.easing = Some(easing.into());
        self
    }

    /// Set the parameters.
    pub fn params(mut self, params: StepParams) -> Self {
        self.params = params;
        self
    }
}

/// Animation of every element matched by `targets`.
///
/// Properties keep the order in which they were written; compilation moves the
/// transform-affecting ones to the front.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnimationSpec {
    /// Target selector.
    pub targets: String,
    /// `(property, steps)` in declaration order.
    pub properties: Vec<(String, Vec<StepSpec>)>,
}

impl AnimationSpec {
    /// Start a spec for `targets`.
    pub fn new(targets: impl Into<String>) -> Self {
        Self {
            targets: targets.into(),
            properties: Vec::new(),
        }
    }

    /// Append a property with its steps; a repeated property replaces the earlier one in place.
    pub fn prop(
        mut self,
        name: impl Into<String>,
        steps: impl IntoIterator<Item = StepSpec>,
    ) -> Self {
        let name = name.into();
        let steps: Vec<StepSpec> = steps.into_iter().collect();
        match self.properties.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = steps,
            None => self.properties.push((name, steps)),
        }
        self
    }

    /// Parse the JSON form `{ "targets": "...", "<property>": [ {step}, ... ] }`.
    pub fn from_json(json: &str) -> TweenlineResult<Self> {
        let spec: Self = serde_json::from_str(json)?;
        spec.validate()?;
        Ok(spec)
    }

    /// Check the parts that do not depend on the scene.
    pub fn validate(&self) -> TweenlineResult<()> {
        if self.targets.trim().is_empty() {
            return Err(TweenlineError::validation("animation targets must not be empty"));
        }
        for (name, steps) in &self.properties {
            for (i, step) in steps.iter().enumerate() {
                if !step.duration.is_finite() || step.duration < 0.0 {
                    return Err(TweenlineError::validation(format!(
                        "{name}[{i}]: duration must be finite and >= 0"
                    )));
                }
            }
        }
        Ok(())
    }
}

impl<'de> Deserialize<'de> for AnimationSpec {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct SpecVisitor;

        impl<'de> Visitor<'de> for SpecVisitor {
            type Value = AnimationSpec;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object with \"targets\" and property step lists")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut targets = None;
                let mut spec = AnimationSpec::default();
                while let Some(key) = map.next_key::<String>()? {
                    if key == "targets" {
                        targets = Some(map.next_value::<String>()?);
                        continue;
                    }
                    // `null` or missing step lists are skipped.
                    let steps: Option<Vec<StepSpec>> = map.next_value()?;
                    if let Some(steps) = steps {
                        spec = spec.prop(key, steps);
                    }
                }
                spec.targets = targets.ok_or_else(|| de::Error::missing_field("targets"))?;
                Ok(spec)
            }
        }

        deserializer.deserialize_map(SpecVisitor)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compile/spec.rs"]
mod tests;
