pub(crate) mod backdrop;
pub(crate) mod canvas;
pub(crate) mod composite;
pub(crate) mod fractal;
