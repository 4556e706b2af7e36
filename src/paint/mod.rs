pub(crate) mod apply;
pub(crate) mod color;
pub(crate) mod gradient;
