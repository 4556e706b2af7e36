pub(crate) mod align;
pub(crate) mod morph;
pub(crate) mod outline;
pub(crate) mod reshape;
pub(crate) mod sampler;
