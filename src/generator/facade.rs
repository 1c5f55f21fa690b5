use std::path::{Path, PathBuf};

use crate::encode::png::{ImageEncoder, PngEncoder};
use crate::foundation::core::validate_dimensions;
use crate::foundation::error::{CoghazError, CoghazResult};
use crate::generator::config::GeneratorConfig;
use crate::plan::planner::{self, PlacementPlan};
use crate::render::canvas::Canvas;
use crate::render::composite::composite;
use crate::text::raster::{FontSource, GlyphRasterizer, ParleyRasterizer};
use crate::text::run::GlyphRun;

/// Perlman-Greene generator: text nested inside itself until it vanishes.
///
/// Configuration is fixed at construction; every [`generate`](Self::generate) call
/// rasterizes, plans, composites and encodes from scratch, so one generator can serve any
/// number of sequential renders.
pub struct PerlmanGreeneGenerator<R = ParleyRasterizer, E = PngEncoder> {
    config: GeneratorConfig,
    rasterizer: R,
    encoder: E,
}

impl PerlmanGreeneGenerator {
    /// Generator with default parameters for `text` drawn in the font at `font_path`.
    pub fn new(text: impl Into<String>, font_path: impl Into<PathBuf>) -> CoghazResult<Self> {
        Self::with_config(GeneratorConfig::new(text, font_path))
    }

    /// Generator from a full config, loading the font it names.
    pub fn with_config(config: GeneratorConfig) -> CoghazResult<Self> {
        config.validate()?;
        let font = FontSource::load(&config.font_path)?;
        Self::with_parts(config, ParleyRasterizer::new(font), PngEncoder)
    }
}

impl<R: GlyphRasterizer, E: ImageEncoder> PerlmanGreeneGenerator<R, E> {
    /// Generator with caller-supplied collaborators. `config.font_path` is not read.
    pub fn with_parts(config: GeneratorConfig, rasterizer: R, encoder: E) -> CoghazResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            rasterizer,
            encoder,
        })
    }

    /// The configuration this generator was built with.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Placements a `height` x `width` render would paint.
    pub fn plan(&self, height: u32, width: u32) -> CoghazResult<PlacementPlan> {
        validate_dimensions(height, width)?;
        let (_, plan) = self.prepare(height, width)?;
        Ok(plan)
    }

    /// Render into memory without encoding.
    #[tracing::instrument(skip(self), fields(text = %self.config.text))]
    pub fn render(&self, height: u32, width: u32) -> CoghazResult<Canvas> {
        validate_dimensions(height, width)?;
        let (run, plan) = self.prepare(height, width)?;

        let mut canvas = self.config.backdrop.paint(height, width)?;
        composite(&mut canvas, &run, &plan, self.config.foreground);
        Ok(canvas)
    }

    /// Render and write the image to `output_path`, replacing any existing file.
    #[tracing::instrument(skip(self, output_path), fields(out = %output_path.as_ref().display()))]
    pub fn generate(
        &self,
        output_path: impl AsRef<Path>,
        height: u32,
        width: u32,
    ) -> CoghazResult<()> {
        let canvas = self.render(height, width)?;
        self.encoder.encode(&canvas, output_path.as_ref())
    }

    fn prepare(&self, height: u32, width: u32) -> CoghazResult<(GlyphRun, PlacementPlan)> {
        let run = self
            .rasterizer
            .rasterize(&self.config.text, self.config.reference_size_px)?;
        let plan = planner::plan(run.bounds(), height, width, &self.config.plan)?;
        if plan.is_empty() {
            return Err(CoghazError::empty_input(format!(
                "text {:?} rasterized to no visible ink",
                self.config.text
            )));
        }
        tracing::debug!(
            run_width = run.width(),
            run_height = run.height(),
            placements = plan.len(),
            "prepared glyph run and plan"
        );
        Ok((run, plan))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/generator/facade.rs"]
mod tests;
