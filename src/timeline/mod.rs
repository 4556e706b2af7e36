pub(crate) mod clock;
pub(crate) mod config;
pub(crate) mod ghost;
pub(crate) mod render;
pub(crate) mod scheduler;
