use std::fmt;

use crate::compile::compiler::StateProvider;
use crate::foundation::core::Anchor;
use crate::foundation::error::{TweenlineError, TweenlineResult};
use crate::paint::apply::{GradientPaint, PaintChannel};
use crate::scene::element::{ElementId, Scene};

/// Timeline options, resolved once at construction.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TimelineConfig {
    /// Total duration override (ms). `None` uses the longest `delay + duration`.
    pub duration: Option<f64>,
    /// Playback speed multiplier.
    pub speed: f64,
    /// Easing name used by steps that do not name one.
    pub easing: String,
    /// Wrap around at the ends instead of completing.
    #[serde(rename = "loop")]
    pub loop_playback: bool,
    /// Start playing after each `add`.
    pub autoplay: bool,
    /// Start delay added to every record (ms).
    pub delay: f64,
    /// Read starting values from the [`StateProvider`] instead of the scene.
    pub managed_state: bool,
    /// Deferred start-up before a fresh play begins advancing (ms).
    pub start_defer_ms: f64,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            duration: None,
            speed: 1.0,
            easing: "linear".to_owned(),
            loop_playback: false,
            autoplay: false,
            delay: 0.0,
            managed_state: false,
            start_defer_ms: 100.0,
        }
    }
}

impl TimelineConfig {
    /// Parse and validate the JSON form.
    pub fn from_json(json: &str) -> TweenlineResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values playback cannot honor.
    pub fn validate(&self) -> TweenlineResult<()> {
        if !self.speed.is_finite() || self.speed <= 0.0 {
            return Err(TweenlineError::validation("speed must be finite and > 0"));
        }
        if let Some(d) = self.duration {
            if !d.is_finite() || d < 0.0 {
                return Err(TweenlineError::validation(
                    "duration override must be finite and >= 0",
                ));
            }
        }
        if !self.delay.is_finite() {
            return Err(TweenlineError::validation("delay must be finite"));
        }
        if !self.start_defer_ms.is_finite() || self.start_defer_ms < 0.0 {
            return Err(TweenlineError::validation(
                "start_defer_ms must be finite and >= 0",
            ));
        }
        Ok(())
    }
}

/// Called after every rendered frame with the progress percentage.
pub type UpdateHook = Box<dyn FnMut(f64)>;
/// Called when a non-looping playback reaches an end.
pub type CompleteHook = Box<dyn FnMut()>;
/// Chooses the id of a gradient written into an element's paint slot.
pub type GradientIdHook = Box<dyn Fn(&ElementId, PaintChannel) -> String>;
/// Applies a gradient instead of the scene's paint setter.
pub type GradientSetterHook = Box<dyn FnMut(&mut dyn Scene, &ElementId, PaintChannel, &GradientPaint)>;
/// Receives the new size of a resized element.
pub type ImagePatternHook = Box<dyn FnMut(&mut dyn Scene, &ElementId, f64, f64)>;
/// Receives anchor changes.
pub type AnchorHook = Box<dyn FnMut(&ElementId, Anchor)>;

/// Callbacks and collaborators that do not serialize.
#[derive(Default)]
pub struct TimelineHooks {
    /// Progress callback.
    pub on_update: Option<UpdateHook>,
    /// Completion callback.
    pub on_complete: Option<CompleteHook>,
    /// Gradient id assignment.
    pub gradient_id: Option<GradientIdHook>,
    /// Custom gradient application.
    pub gradient_setter: Option<GradientSetterHook>,
    /// Image-pattern refresh after a resize.
    pub update_image_pattern: Option<ImagePatternHook>,
    /// Anchor-change side effects.
    pub update_anchor: Option<AnchorHook>,
    /// Starting values in managed-state mode.
    pub state_provider: Option<Box<dyn StateProvider>>,
}

impl TimelineHooks {
    /// No hooks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the progress callback.
    pub fn on_update(mut self, f: impl FnMut(f64) + 'static) -> Self {
        self.on_update = Some(Box::new(f));
        self
    }

    /// Set the completion callback.
    pub fn on_complete(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_complete = Some(Box::new(f));
        self
    }

    /// Set the gradient id hook.
    pub fn gradient_id(mut self, f: impl Fn(&ElementId, PaintChannel) -> String + 'static) -> Self {
        self.gradient_id = Some(Box::new(f));
        self
    }

    /// Set the gradient setter.
    pub fn gradient_setter(
        mut self,
        f: impl FnMut(&mut dyn Scene, &ElementId, PaintChannel, &GradientPaint) + 'static,
    ) -> Self {
        self.gradient_setter = Some(Box::new(f));
        self
    }

    /// Set the image-pattern hook.
    pub fn update_image_pattern(
        mut self,
        f: impl FnMut(&mut dyn Scene, &ElementId, f64, f64) + 'static,
    ) -> Self {
        self.update_image_pattern = Some(Box::new(f));
        self
    }

    /// Set the anchor hook.
    pub fn update_anchor(mut self, f: impl FnMut(&ElementId, Anchor) + 'static) -> Self {
        self.update_anchor = Some(Box::new(f));
        self
    }

    /// Set the managed-state provider.
    pub fn state_provider(mut self, provider: impl StateProvider + 'static) -> Self {
        self.state_provider = Some(Box::new(provider));
        self
    }
}

impl fmt::Debug for TimelineHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimelineHooks")
            .field("on_update", &self.on_update.is_some())
            .field("on_complete", &self.on_complete.is_some())
            .field("gradient_id", &self.gradient_id.is_some())
            .field("gradient_setter", &self.gradient_setter.is_some())
            .field("update_image_pattern", &self.update_image_pattern.is_some())
            .field("update_anchor", &self.update_anchor.is_some())
            .field("state_provider", &self.state_provider.is_some())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/config.rs"]
mod tests;
