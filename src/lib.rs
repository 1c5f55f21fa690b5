//! coghaz renders a short text string into a self-nesting "cognitohazard" image.
//!
//! The text is rasterized once, then stamped repeatedly onto a canvas at shrinking scale,
//! fading opacity and alternating tone, each copy nested inside the one before it.
//!
//! # Pipeline overview
//!
//! 1. **Rasterize**: `text + font -> GlyphRun` (ink-cropped coverage at a reference size)
//! 2. **Plan**: `GlyphRun bounds + canvas size -> PlacementPlan` (depth 0..N, pure and finite)
//! 3. **Composite**: paint placements back to front onto a backdrop `Canvas`
//! 4. **Encode**: write the canvas as PNG via a temporary file and an atomic rename
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: no unseeded randomness; identical inputs give identical pixels.
//! - **Collaborators behind traits**: [`GlyphRasterizer`] and [`ImageEncoder`] are the only
//!   seams to text shaping and file output.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod encode;
mod foundation;
mod generator;
mod plan;
mod render;
mod text;

pub use encode::png::{ImageEncoder, PngEncoder, ensure_parent_dir};
pub use foundation::core::{MAX_CANVAS_SIDE, Point, Rgba8, Size, Vec2, validate_dimensions};
pub use foundation::error::{CoghazError, CoghazResult};
pub use generator::config::{
    DEFAULT_HEIGHT, DEFAULT_REFERENCE_SIZE_PX, DEFAULT_WIDTH, GeneratorConfig,
};
pub use generator::facade::PerlmanGreeneGenerator;
pub use plan::planner::{Placement, PlacementPlan, PlanParams, Tone, plan};
pub use render::backdrop::Backdrop;
pub use render::canvas::Canvas;
pub use render::composite::{composite, over, stamp, tone_color};
pub use render::fractal::{ColorStop, Colormap, EscapeFractal, FractalKind};
pub use text::raster::{FontSource, GlyphRasterizer, ParleyRasterizer};
pub use text::run::GlyphRun;
