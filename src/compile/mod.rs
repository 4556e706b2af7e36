pub(crate) mod compiler;
pub(crate) mod property;
pub(crate) mod spec;
pub(crate) mod stagger;
pub(crate) mod tween;
