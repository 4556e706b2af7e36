//! One frame: evaluate every record at the clock's elapsed time and write through the scene.

use std::collections::BTreeMap;

use crate::compile::property::{PathProp, PropertyKind, SizeAxis, StrokeProp, TransformProp};
use crate::compile::tween::{TweenRecord, TweenSide, TweenValue};
use crate::foundation::core::{Affine, format_number};
use crate::paint::apply::{GradientPaint, Paint, PaintChannel, default_gradient_id};
use crate::scene::element::{ElementId, ElementKind, Scene};
use crate::timeline::config::TimelineHooks;
use crate::timeline::ghost::Ghost;

/// Timing inputs of a render pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FramePass {
    /// Elapsed time (ms).
    pub elapsed: f64,
    /// Rendered by the advancing clock rather than a seek.
    pub playing: bool,
    /// Staggered records start at 0 for this pass.
    pub full_reset: bool,
}

/// Whether `record` is left untouched in this pass.
///
/// Records before their delay are skipped while playing; a seek still renders staggered
/// records so their baseline shows while scrubbing.
pub fn skips(record: &TweenRecord, pass: FramePass) -> bool {
    let delay = record.effective_delay(pass.full_reset);
    let progress = record.local_progress(pass.elapsed, pass.full_reset);
    let pre_delay = pass.elapsed < delay && progress == 0.0;
    pre_delay && (pass.playing || !record.staggered)
}

/// Mutable state one frame writes to.
pub(crate) struct FrameTargets<'a, S: Scene> {
    pub scene: &'a mut S,
    pub ghosts: &'a mut BTreeMap<ElementId, Ghost>,
    pub hooks: &'a mut TimelineHooks,
    /// One-shot attributes to remove before the next play or seek.
    pub dirty: &'a mut Vec<(ElementId, String)>,
}

/// Render `records` in order. Returns how many were evaluated.
pub(crate) fn render_frame<S: Scene>(
    targets: &mut FrameTargets<'_, S>,
    records: &[TweenRecord],
    pass: FramePass,
) -> usize {
    let mut rendered = 0;
    for record in records {
        if skips(record, pass) {
            continue;
        }
        let t = record.local_progress(pass.elapsed, pass.full_reset);
        let value = record.interpolator.at(record.easing.apply(t));
        targets.apply(record, value);
        rendered += 1;
    }
    rendered
}

impl<S: Scene> FrameTargets<'_, S> {
    fn apply(&mut self, record: &TweenRecord, value: TweenValue) {
        let el = &record.target;
        match (&record.kind, value) {
            (PropertyKind::Transform(prop), value) => self.apply_transform(el, *prop, value),
            (PropertyKind::Color(channel), value) => self.apply_paint(el, *channel, value),
            (PropertyKind::Size(axis), TweenValue::Number(v)) => self.apply_size(el, *axis, v),
            (PropertyKind::Path(PathProp::FollowPath), TweenValue::Number(len)) => {
                if let TweenSide::FollowPath {
                    path,
                    centered,
                    rotated,
                } = &record.side
                {
                    self.follow_path(el, path, len, *centered, *rotated);
                }
            }
            (PropertyKind::Path(_), TweenValue::Outline(outline)) => {
                self.write_geometry(el, "d", outline.to_string());
            }
            (PropertyKind::Stroke(StrokeProp::Dashoffset), TweenValue::Number(pct)) => {
                let cached = match record.side {
                    TweenSide::DashLength(len) => len,
                    _ => 0.0,
                };
                self.apply_dash_offset(el, pct, cached);
            }
            (PropertyKind::Stroke(prop), value) => {
                if let Some(text) = attribute_text(value) {
                    self.scene.set_attr(el, prop.attribute(), Some(text));
                }
            }
            (PropertyKind::Effect(_), value) => {
                let TweenSide::Effect(effect) = &record.side else {
                    return;
                };
                let Some(handler) = effect.resolve(&*self.scene) else {
                    tracing::warn!(element = %el, effect = %effect.effect_selector, "effect element not found");
                    return;
                };
                if let Some(text) = attribute_text(value) {
                    self.scene
                        .set_attr(&handler, &effect.filter_property, Some(text));
                }
            }
            (PropertyKind::Other(name), value) => {
                let Some(text) = attribute_text(value) else {
                    return;
                };
                if record.kind.alters_geometry() {
                    self.write_geometry(el, name, text);
                } else {
                    self.scene.set_attr(el, name, Some(text));
                }
            }
            (kind, value) => {
                tracing::warn!(element = %el, ?kind, ?value, "value does not fit property");
            }
        }
    }

    fn ghost(&mut self, el: &ElementId) -> &mut Ghost {
        ghost_entry(self.ghosts, &*self.scene, el)
    }

    fn apply_transform(&mut self, el: &ElementId, prop: TransformProp, value: TweenValue) {
        let ghost = ghost_entry(self.ghosts, &*self.scene, el);
        match (prop, value) {
            (TransformProp::TranslateX, TweenValue::Number(v)) => ghost.parts.translate_x = v,
            (TransformProp::TranslateY, TweenValue::Number(v)) => ghost.parts.translate_y = v,
            (TransformProp::ScaleX, TweenValue::Number(v)) => ghost.parts.scale_x = v,
            (TransformProp::ScaleY, TweenValue::Number(v)) => ghost.parts.scale_y = v,
            (TransformProp::Rotate, TweenValue::Number(v)) => ghost.parts.rotate = v,
            (TransformProp::Anchor, TweenValue::Anchor(a)) => {
                ghost.anchor = a;
                if let Some(hook) = self.hooks.update_anchor.as_mut() {
                    hook(el, a);
                }
            }
            _ => return,
        }
        let m = ghost.matrix();
        self.scene.set_transform(el, m);
    }

    fn apply_paint(&mut self, el: &ElementId, channel: PaintChannel, value: TweenValue) {
        match value {
            TweenValue::Color(c) => self.scene.set_paint(el, channel, Paint::Solid(c.to_string())),
            TweenValue::Text(s) => self.scene.set_paint(el, channel, Paint::Solid(s)),
            TweenValue::Gradient(g) => {
                let id = match self.hooks.gradient_id.as_ref() {
                    Some(hook) => hook(el, channel),
                    None => default_gradient_id(el.as_str(), channel),
                };
                let paint = GradientPaint::from_data(id, &g);
                match self.hooks.gradient_setter.as_mut() {
                    Some(setter) => setter(&mut *self.scene, el, channel, &paint),
                    None => self.scene.set_paint(el, channel, Paint::Gradient(paint)),
                }
            }
            other => tracing::warn!(element = %el, value = ?other, "not a paint value"),
        }
    }

    fn apply_size(&mut self, el: &ElementId, axis: SizeAxis, v: f64) {
        let key = match axis {
            SizeAxis::Width => "width",
            SizeAxis::Height => "height",
        };
        let changed = self.ghost(el).note_write(key, &format_number(v));
        if self.scene.kind(el) == Some(ElementKind::Text) {
            self.scene.set_font_size(el, v);
        } else {
            let current = self.scene.bbox(el).unwrap_or_default();
            let (w, h) = match axis {
                SizeAxis::Width => (v, current.height()),
                SizeAxis::Height => (current.width(), v),
            };
            self.scene.set_size(el, w, h);
            if let Some(hook) = self.hooks.update_image_pattern.as_mut() {
                hook(&mut *self.scene, el, w, h);
            }
        }
        if changed {
            ghost_entry(self.ghosts, &*self.scene, el).refresh_bbox(&*self.scene, el);
        }
    }

    /// Write an attribute that shapes the element, re-measuring only when it changed.
    fn write_geometry(&mut self, el: &ElementId, name: &str, value: String) {
        let changed = self.ghost(el).note_write(name, &value);
        self.scene.set_attr(el, name, Some(value));
        if changed {
            ghost_entry(self.ghosts, &*self.scene, el).refresh_bbox(&*self.scene, el);
        }
    }

    fn follow_path(
        &mut self,
        el: &ElementId,
        path: &ElementId,
        len: f64,
        centered: bool,
        rotated: bool,
    ) {
        let scene = &*self.scene;
        let Some(total) = scene.total_length(path) else {
            tracing::warn!(element = %el, path = %path, "followed path has no length");
            return;
        };
        let len = len.clamp(0.0, total);
        let Some(point) = scene.point_at_length(path, len) else {
            tracing::warn!(element = %el, path = %path, "followed path has no point");
            return;
        };
        let mut m = scene.transform(path) * Affine::translate(point.to_vec2());
        if rotated {
            let before = scene.point_at_length(path, (len - 1.0).max(0.0));
            let after = scene.point_at_length(path, (len + 1.0).min(total));
            if let (Some(a), Some(b)) = (before, after) {
                m = m * Affine::rotate((b.y - a.y).atan2(b.x - a.x));
            }
        }
        let ghost = ghost_entry(self.ghosts, scene, el);
        if centered {
            m = m * Affine::translate(-ghost.bbox.center().to_vec2());
        }
        ghost.set_matrix(m);
        self.scene.set_transform(el, m);
    }

    fn apply_dash_offset(&mut self, el: &ElementId, pct: f64, cached: f64) {
        let resizes = self.ghost(el).resizes;
        let length = if resizes {
            self.scene.total_length(el).unwrap_or(cached)
        } else {
            cached
        };
        self.scene.set_attr(
            el,
            StrokeProp::Dashoffset.attribute(),
            Some(format_number(length * pct / 100.0)),
        );
        let dasharray = StrokeProp::Dasharray.attribute();
        let value = format_number(length);
        if self.scene.attr(el, dasharray).is_none() {
            self.ghost(el).note_write(dasharray, &value);
            self.scene.set_attr(el, dasharray, Some(value));
            self.dirty.push((el.clone(), dasharray.to_owned()));
        } else if resizes && self.ghost(el).note_write(dasharray, &value) {
            self.scene.set_attr(el, dasharray, Some(value));
        }
    }
}

fn ghost_entry<'g, S: Scene>(
    ghosts: &'g mut BTreeMap<ElementId, Ghost>,
    scene: &S,
    el: &ElementId,
) -> &'g mut Ghost {
    ghosts
        .entry(el.clone())
        .or_insert_with(|| Ghost::new(scene, el, Default::default()))
}

fn attribute_text(value: TweenValue) -> Option<String> {
    match value {
        TweenValue::Number(v) => Some(format_number(v)),
        TweenValue::Color(c) => Some(c.to_string()),
        TweenValue::Text(s) => Some(s),
        TweenValue::Outline(o) => Some(o.to_string()),
        TweenValue::Gradient(g) => Some(g.to_string()),
        TweenValue::Anchor(_) => None,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/render.rs"]
mod tests;
