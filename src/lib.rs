//! Tweenline animates the elements of a vector scene along seekable, reversible timelines.
//!
//! - Describe an animation as an [`AnimationSpec`]: a selector plus per-property steps
//! - Add it to a [`Timeline`] over any [`Scene`] implementation
//! - Drive time from the host through a [`Ticker`], or scrub with `seek`/`time`
//!
//! Path properties morph between arbitrary outlines: `d` reshapes both outlines onto a shared
//! point set, `morphTo` resamples and aligns them.
#![forbid(unsafe_code)]
#![deny(missing_docs)]
// Geometry helpers are shared between compile and render; not every variant is exercised by
// both sides.
#![allow(dead_code)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod compile;
pub(crate) mod paint;
pub(crate) mod path;
pub(crate) mod scene;
pub(crate) mod timeline;

pub use crate::foundation::core::{Affine, Anchor, BezPath, Direction, Point, Rect, Vec2};
pub use crate::foundation::error::{TweenlineError, TweenlineResult};

pub use crate::animation::ease::{EaseCurve, EaseSpec};
pub use crate::compile::compiler::{PropertyError, StateProvider};
pub use crate::compile::property::PropertyKind;
pub use crate::compile::spec::{
    AnimationSpec, DelaySpec, StaggerBound, StepParams, StepSpec, StepValue,
};
pub use crate::compile::tween::{EffectTarget, TweenRecord};
pub use crate::paint::apply::{GradientPaint, Paint, PaintChannel, PaintStop};
pub use crate::paint::color::ColorDef;
pub use crate::paint::gradient::{GradientData, GradientKind};
pub use crate::path::morph::{MorphOptions, PathMorph, build_morph};
pub use crate::path::outline::PathOutline;
pub use crate::path::reshape::{Reshaped, reshape, reshape_str};
pub use crate::scene::element::{ElementId, ElementKind, Scene, Snapshot};
pub use crate::scene::memory::{MemoryScene, SceneNode};
pub use crate::timeline::clock::{ManualTicker, Ticker, TimelineClock};
pub use crate::timeline::config::{TimelineConfig, TimelineHooks};
pub use crate::timeline::scheduler::{Phase, Timeline};
