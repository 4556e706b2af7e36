pub(crate) mod element;
pub(crate) mod measure;
pub(crate) mod memory;
