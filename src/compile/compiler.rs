//! Compile an [`AnimationSpec`] against a scene into flat tween records.

use crate::animation::ease::EaseCurve;
use crate::compile::property::{
    EffectProp, PathProp, PropertyKind, SizeAxis, StrokeProp, TransformProp, canonical_order,
};
use crate::compile::spec::{AnimationSpec, StepParams, StepSpec, StepValue};
use crate::compile::tween::{EffectTarget, Interpolator, TweenRecord, TweenSide};
use crate::foundation::core::{Anchor, format_number};
use crate::foundation::error::{TweenlineError, TweenlineResult};
use crate::foundation::transform::TransformParts;
use crate::paint::gradient::{ColorValue, gradient_endpoints};
use crate::path::morph::{MorphOptions, build_morph};
use crate::path::outline::PathOutline;
use crate::path::reshape::reshape;
use crate::scene::element::{ElementId, ElementKind, Scene, Snapshot};
use crate::scene::measure::{self, parse_number};

/// Font size assumed for text elements without one.
pub const DEFAULT_FONT_SIZE: f64 = 16.0;

/// Paint assumed for elements without a fill or stroke attribute.
pub const DEFAULT_PAINT: &str = "#000";

/// Source of starting values when the timeline runs in managed-state mode.
///
/// Returning `None` falls back to reading the scene.
pub trait StateProvider {
    /// Starting value of `property` on `el`. Effect properties also receive their target.
    fn initial_value(
        &self,
        el: &ElementId,
        property: &str,
        effect: Option<&EffectTarget>,
    ) -> Option<StepValue>;

    /// Transform origin of `el` as bbox fractions.
    fn anchor(&self, _el: &ElementId) -> Option<Anchor> {
        None
    }
}

/// A property that could not be compiled for one target; the rest of the animation stands.
#[derive(thiserror::Error, Debug)]
#[error("{target}.{property}: {error}")]
pub struct PropertyError {
    /// Element the property was compiled for.
    pub target: ElementId,
    /// Property name as written.
    pub property: String,
    /// Cause.
    #[source]
    pub error: TweenlineError,
}

/// Per-target state captured at compile time.
#[derive(Clone, Debug, PartialEq)]
pub struct CompiledTarget {
    /// Animated element.
    pub target: ElementId,
    /// Pre-animation state.
    pub snapshot: Snapshot,
    /// Initial transform origin.
    pub anchor: Anchor,
}

/// Output of [`compile_animation`].
#[derive(Debug, Default)]
pub struct CompiledAnimation {
    /// Matched targets in selection order.
    pub targets: Vec<CompiledTarget>,
    /// Records, target-major, canonical property order within a target.
    pub records: Vec<TweenRecord>,
    /// Properties dropped during compilation.
    pub errors: Vec<PropertyError>,
}

/// Timeline-level inputs of compilation.
#[derive(Clone, Copy)]
pub struct CompileOptions<'a> {
    /// Managed-state mode.
    pub managed: bool,
    /// Provider consulted in managed mode.
    pub provider: Option<&'a dyn StateProvider>,
    /// Easing of steps that do not name one.
    pub easing: EaseCurve,
    /// Global start delay (ms).
    pub delay: f64,
}

impl Default for CompileOptions<'_> {
    fn default() -> Self {
        Self {
            managed: false,
            provider: None,
            easing: EaseCurve::LINEAR,
            delay: 0.0,
        }
    }
}

/// Compile `spec` for every element its selector matches.
///
/// Fails only when managed mode is requested without a provider. Properties that fail to
/// compile are dropped and reported in [`CompiledAnimation::errors`].
#[tracing::instrument(skip(scene, spec, opts), fields(targets = %spec.targets, managed = opts.managed))]
pub fn compile_animation<S: Scene + ?Sized>(
    scene: &S,
    spec: &AnimationSpec,
    opts: &CompileOptions<'_>,
) -> TweenlineResult<CompiledAnimation> {
    if opts.managed && opts.provider.is_none() {
        return Err(TweenlineError::config(
            "managed state is enabled but no state provider is configured",
        ));
    }
    let compiler = Compiler {
        scene,
        provider: if opts.managed { opts.provider } else { None },
        easing: opts.easing,
        delay: opts.delay,
    };

    let elements = scene.select(&spec.targets);
    if elements.is_empty() {
        tracing::debug!("selector matched no elements");
    }
    let total = elements.len();
    let properties = canonical_order(spec.properties.clone());

    let mut out = CompiledAnimation::default();
    for (index, el) in elements.into_iter().enumerate() {
        for (name, steps) in &properties {
            match compiler.compile_property(&el, index, total, name, steps) {
                Ok(records) => out.records.extend(records),
                Err(error) => {
                    tracing::warn!(element = %el, property = %name, %error, "dropping property");
                    out.errors.push(PropertyError {
                        target: el.clone(),
                        property: name.clone(),
                        error,
                    });
                }
            }
        }
        let anchor = compiler
            .provider
            .and_then(|p| p.anchor(&el))
            .unwrap_or(Anchor::CENTER);
        out.targets.push(CompiledTarget {
            snapshot: Snapshot::capture(scene, &el),
            anchor,
            target: el,
        });
    }
    tracing::debug!(records = out.records.len(), errors = out.errors.len(), "compiled");
    Ok(out)
}

/// Outline of an element: its `d` attribute, or the geometry of a basic shape.
pub fn current_outline<S: Scene + ?Sized>(scene: &S, el: &ElementId) -> TweenlineResult<PathOutline> {
    if let Some(d) = scene.attr(el, "d") {
        return PathOutline::from_svg(&d);
    }
    let kind = scene
        .kind(el)
        .ok_or_else(|| TweenlineError::compile(format!("unknown element \"{el}\"")))?;
    measure::outline_path(&kind, &|name| scene.attr(el, name))
        .as_ref()
        .and_then(PathOutline::from_bezpath)
        .ok_or_else(|| TweenlineError::compile(format!("element \"{el}\" has no outline")))
}

struct Compiler<'a, S: Scene + ?Sized> {
    scene: &'a S,
    provider: Option<&'a dyn StateProvider>,
    easing: EaseCurve,
    delay: f64,
}

/// What a step contributes besides timing.
struct StepOutput {
    interpolator: Interpolator,
    side: TweenSide,
    next: StepValue,
}

impl<S: Scene + ?Sized> Compiler<'_, S> {
    fn compile_property(
        &self,
        el: &ElementId,
        index: usize,
        total: usize,
        name: &str,
        steps: &[StepSpec],
    ) -> TweenlineResult<Vec<TweenRecord>> {
        let kind = PropertyKind::from_name(name);
        let Some(first) = steps.first() else {
            return Ok(Vec::new());
        };
        let effect = effect_target(&kind, &first.params)?;
        let start = self.start_value(el, name, &kind, effect.as_ref())?;

        // Each step starts from the previous step's final value.
        let (_, records) = steps.iter().enumerate().try_fold(
            (start, Vec::with_capacity(steps.len())),
            |(start, mut records), (i, step)| {
                if !step.duration.is_finite() || step.duration < 0.0 {
                    return Err(TweenlineError::validation(format!(
                        "step {i}: duration must be finite and >= 0"
                    )));
                }
                let out = self.compile_step(el, name, &kind, effect.as_ref(), &start, step)?;
                records.push(TweenRecord {
                    target: el.clone(),
                    property: name.to_owned(),
                    kind: kind.clone(),
                    interpolator: out.interpolator,
                    easing: step.easing.as_ref().map_or(self.easing, |e| e.resolve()),
                    delay: step.delay.resolve(total, index) + self.delay,
                    duration: step.duration,
                    staggered: step.delay.is_staggered(),
                    side: out.side,
                });
                Ok((out.next, records))
            },
        )?;
        Ok(records)
    }

    fn compile_step(
        &self,
        el: &ElementId,
        name: &str,
        kind: &PropertyKind,
        effect: Option<&EffectTarget>,
        start: &StepValue,
        step: &StepSpec,
    ) -> TweenlineResult<StepOutput> {
        let plain = |interpolator, next| StepOutput {
            interpolator,
            side: TweenSide::None,
            next,
        };
        Ok(match kind {
            PropertyKind::Transform(TransformProp::Anchor) => {
                let from = as_anchor(start)
                    .ok_or_else(|| TweenlineError::validation("anchor start is not a pair"))?;
                let to = as_anchor(&step.value).ok_or_else(|| {
                    TweenlineError::validation(format!("{name}: expected [x, y] fractions"))
                })?;
                plain(Interpolator::Anchor { from, to }, step.value.clone())
            }
            PropertyKind::Transform(_) | PropertyKind::Size(_) => {
                let (from, to) = numbers(name, start, &step.value)?;
                plain(Interpolator::Number { from, to }, StepValue::Number(to))
            }
            PropertyKind::Color(_) => {
                let to = text_of(&step.value);
                plain(color_interpolator(&text_of(start), &to), StepValue::Text(to))
            }
            PropertyKind::Stroke(StrokeProp::Dashoffset) => {
                let (from, to) = numbers(name, start, &step.value)?;
                StepOutput {
                    interpolator: Interpolator::Number { from, to },
                    side: TweenSide::DashLength(self.scene.total_length(el).unwrap_or(0.0)),
                    next: StepValue::Number(to),
                }
            }
            PropertyKind::Stroke(_) | PropertyKind::Other(_) => {
                let (interpolator, next) = number_or_discrete(start, &step.value);
                plain(interpolator, next)
            }
            PropertyKind::Effect(prop) => {
                let (interpolator, next) = if *prop == EffectProp::Color {
                    let to = text_of(&step.value);
                    (color_interpolator(&text_of(start), &to), StepValue::Text(to))
                } else {
                    let (from, to) = numbers(name, start, &step.value)?;
                    (Interpolator::Number { from, to }, StepValue::Number(to))
                };
                let effect = effect.cloned().ok_or_else(|| {
                    TweenlineError::validation(format!("{name}: missing effect target"))
                })?;
                StepOutput {
                    interpolator,
                    side: TweenSide::Effect(effect),
                    next,
                }
            }
            PropertyKind::Path(PathProp::MorphTo) => {
                let dest = self.resolve_reference(name, &step.value)?;
                let from = PathOutline::from_svg(&text_of(start))?;
                let to = current_outline(self.scene, &dest)?;
                let to = to.translated(from.bounding_box().center() - to.bounding_box().center());
                let next = StepValue::Text(to.to_string());
                plain(
                    Interpolator::Morph(Box::new(build_morph(&from, &to, MorphOptions::default()))),
                    next,
                )
            }
            PropertyKind::Path(PathProp::Direct) => {
                let to = text_of(&step.value);
                let reshaped = reshape(&PathOutline::from_svg(&text_of(start))?, &PathOutline::from_svg(&to)?);
                plain(
                    Interpolator::Morph(Box::new(build_morph(
                        &reshaped.first,
                        &reshaped.second,
                        MorphOptions::default(),
                    ))),
                    StepValue::Text(to),
                )
            }
            PropertyKind::Path(PathProp::FollowPath) => {
                let path = self.resolve_reference(name, &step.value)?;
                let length = self.scene.total_length(&path).ok_or_else(|| {
                    TweenlineError::compile(format!("followed element \"{path}\" has no length"))
                })?;
                StepOutput {
                    interpolator: Interpolator::Number {
                        from: 0.0,
                        to: length,
                    },
                    side: TweenSide::FollowPath {
                        path,
                        centered: step.params.centered,
                        rotated: step.params.rotated,
                    },
                    next: StepValue::Number(length),
                }
            }
        })
    }

    fn resolve_reference(&self, name: &str, value: &StepValue) -> TweenlineResult<ElementId> {
        let selector = value.as_text().ok_or_else(|| {
            TweenlineError::validation(format!("{name}: expected a selector"))
        })?;
        self.scene
            .select(selector)
            .into_iter()
            .next()
            .ok_or_else(|| {
                TweenlineError::compile(format!("{name}: \"{selector}\" matched no element"))
            })
    }

    fn start_value(
        &self,
        el: &ElementId,
        name: &str,
        kind: &PropertyKind,
        effect: Option<&EffectTarget>,
    ) -> TweenlineResult<StepValue> {
        if let Some(v) = self.provider.and_then(|p| p.initial_value(el, name, effect)) {
            return Ok(v);
        }
        let scene = self.scene;
        Ok(match kind {
            PropertyKind::Transform(prop) => {
                let parts = TransformParts::decompose(scene.transform(el));
                StepValue::Number(match prop {
                    TransformProp::TranslateX => parts.translate_x,
                    TransformProp::TranslateY => parts.translate_y,
                    TransformProp::ScaleX => parts.scale_x,
                    TransformProp::ScaleY => parts.scale_y,
                    TransformProp::Rotate => parts.rotate,
                    TransformProp::Anchor => {
                        let a = self
                            .provider
                            .and_then(|p| p.anchor(el))
                            .unwrap_or(Anchor::CENTER);
                        return Ok(StepValue::Pair([a.x, a.y]));
                    }
                })
            }
            PropertyKind::Color(channel) => StepValue::Text(
                scene
                    .attr(el, channel.as_str())
                    .unwrap_or_else(|| DEFAULT_PAINT.to_owned()),
            ),
            PropertyKind::Size(axis) => StepValue::Number(current_size(scene, el, *axis)),
            PropertyKind::Path(PathProp::FollowPath) => StepValue::Number(0.0),
            PropertyKind::Path(_) => StepValue::Text(current_outline(scene, el)?.to_string()),
            PropertyKind::Stroke(StrokeProp::Dashoffset) => {
                let offset = scene
                    .attr(el, StrokeProp::Dashoffset.attribute())
                    .as_deref()
                    .and_then(parse_number)
                    .unwrap_or(0.0);
                let length = scene.total_length(el).unwrap_or(0.0);
                StepValue::Number(if length > 0.0 {
                    offset / length * 100.0
                } else {
                    0.0
                })
            }
            PropertyKind::Stroke(prop) => attr_value(scene.attr(el, prop.attribute())),
            PropertyKind::Effect(prop) => {
                let current = effect
                    .and_then(|e| e.resolve(scene))
                    .and_then(|h| effect.and_then(|e| scene.attr(&h, &e.filter_property)));
                match (prop, current) {
                    (EffectProp::Color, v) => {
                        StepValue::Text(v.unwrap_or_else(|| DEFAULT_PAINT.to_owned()))
                    }
                    (_, v) => attr_value(v),
                }
            }
            PropertyKind::Other(attr) => attr_value(scene.attr(el, attr)),
        })
    }
}

/// Current width or height: the attribute, then the bbox; font size for text.
pub fn current_size<S: Scene + ?Sized>(scene: &S, el: &ElementId, axis: SizeAxis) -> f64 {
    if scene.kind(el) == Some(ElementKind::Text) {
        return scene
            .attr(el, "font-size")
            .as_deref()
            .and_then(parse_number)
            .unwrap_or(DEFAULT_FONT_SIZE);
    }
    let attr = match axis {
        SizeAxis::Width => "width",
        SizeAxis::Height => "height",
    };
    scene
        .attr(el, attr)
        .as_deref()
        .and_then(parse_number)
        .or_else(|| {
            scene.bbox(el).map(|b| match axis {
                SizeAxis::Width => b.width(),
                SizeAxis::Height => b.height(),
            })
        })
        .unwrap_or(0.0)
}

fn effect_target(kind: &PropertyKind, params: &StepParams) -> TweenlineResult<Option<EffectTarget>> {
    if !matches!(kind, PropertyKind::Effect(_)) {
        return Ok(None);
    }
    match (
        &params.effect_selector,
        &params.filter_selector,
        &params.filter_property,
    ) {
        (Some(effect), Some(filter), Some(property)) => Ok(Some(EffectTarget {
            effect_selector: effect.clone(),
            filter_selector: filter.clone(),
            filter_property: property.clone(),
        })),
        _ => Err(TweenlineError::validation(
            "effect properties need effectSelector, filterSelector and filterProperty",
        )),
    }
}

fn as_anchor(v: &StepValue) -> Option<Anchor> {
    match v {
        StepValue::Pair([x, y]) => Some(Anchor::new(*x, *y)),
        StepValue::Number(n) => Some(Anchor::new(*n, *n)),
        StepValue::Text(_) => None,
    }
}

fn text_of(v: &StepValue) -> String {
    match v {
        StepValue::Number(n) => format_number(*n),
        StepValue::Pair([x, y]) => format!("{} {}", format_number(*x), format_number(*y)),
        StepValue::Text(s) => s.clone(),
    }
}

fn attr_value(v: Option<String>) -> StepValue {
    match v {
        None => StepValue::Number(0.0),
        Some(s) => parse_number(&s).map_or(StepValue::Text(s), StepValue::Number),
    }
}

fn numbers(name: &str, from: &StepValue, to: &StepValue) -> TweenlineResult<(f64, f64)> {
    let to = to
        .as_number()
        .ok_or_else(|| TweenlineError::validation(format!("{name}: expected a number")))?;
    Ok((from.as_number().unwrap_or(0.0), to))
}

fn number_or_discrete(from: &StepValue, to: &StepValue) -> (Interpolator, StepValue) {
    match (from.as_number(), to.as_number()) {
        (Some(from), Some(to)) => (Interpolator::Number { from, to }, StepValue::Number(to)),
        _ => {
            let to = text_of(to);
            (
                Interpolator::Discrete {
                    from: text_of(from),
                    to: to.clone(),
                },
                StepValue::Text(to),
            )
        }
    }
}

/// Solid colors blend channel-wise, anything involving a gradient blends as flat arrays,
/// and values that do not parse switch at completion.
fn color_interpolator(from: &str, to: &str) -> Interpolator {
    match (ColorValue::parse(from), ColorValue::parse(to)) {
        (Ok(ColorValue::Solid(from)), Ok(ColorValue::Solid(to))) => {
            Interpolator::Color { from, to }
        }
        (Ok(a), Ok(b)) => match gradient_endpoints(&a, &b) {
            Some((a, b)) => Interpolator::Gradient {
                kind: b.kind,
                from: a.to_flat(),
                to: b.to_flat(),
            },
            None => discrete(from, to),
        },
        _ => discrete(from, to),
    }
}

fn discrete(from: &str, to: &str) -> Interpolator {
    Interpolator::Discrete {
        from: from.to_owned(),
        to: to.to_owned(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compile/compiler.rs"]
mod tests;
