use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;

use crate::foundation::core::Rgba8;
use crate::foundation::error::{CoghazError, CoghazResult};
use crate::plan::planner::PlanParams;
use crate::render::backdrop::Backdrop;

/// Default output height for callers that do not pick one.
pub const DEFAULT_HEIGHT: u32 = 512;
/// Default output width for callers that do not pick one.
pub const DEFAULT_WIDTH: u32 = 512;
/// Default pixel size the glyph run is rasterized at before resampling.
pub const DEFAULT_REFERENCE_SIZE_PX: f32 = 128.0;

const MAX_REFERENCE_SIZE_PX: f32 = 1024.0;

/// Everything a generator needs, fixed at construction.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Text to nest.
    pub text: String,
    /// Font file used by the default rasterizer.
    pub font_path: PathBuf,
    /// Pixel size the text is rasterized at.
    pub reference_size_px: f32,
    /// Recursion constants.
    pub plan: PlanParams,
    /// Tint for glyph coverage.
    pub foreground: Rgba8,
    /// Canvas contents before compositing.
    pub backdrop: Backdrop,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            text: String::new(),
            font_path: PathBuf::new(),
            reference_size_px: DEFAULT_REFERENCE_SIZE_PX,
            plan: PlanParams::default(),
            foreground: Rgba8::BLACK,
            backdrop: Backdrop::default(),
        }
    }
}

impl GeneratorConfig {
    /// Config with the given text and font and defaults elsewhere.
    pub fn new(text: impl Into<String>, font_path: impl Into<PathBuf>) -> Self {
        Self {
            text: text.into(),
            font_path: font_path.into(),
            ..Self::default()
        }
    }

    /// Load a JSON config file. Missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> CoghazResult<Self> {
        let path = path.as_ref();
        let f = File::open(path)
            .with_context(|| format!("open config '{}'", path.display()))
            .map_err(|e| CoghazError::configuration(format!("{e:#}")))?;
        serde_json::from_reader(BufReader::new(f)).map_err(|e| {
            CoghazError::configuration(format!("parse config '{}': {e}", path.display()))
        })
    }

    /// Check everything that does not need the font file.
    pub fn validate(&self) -> CoghazResult<()> {
        if self.text.is_empty() {
            return Err(CoghazError::configuration("text must be non-empty"));
        }
        let size = self.reference_size_px;
        if !size.is_finite() || size <= 0.0 || size > MAX_REFERENCE_SIZE_PX {
            return Err(CoghazError::configuration(format!(
                "reference_size_px {size} must be in (0, {MAX_REFERENCE_SIZE_PX}]"
            )));
        }
        self.plan.validate()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/generator/config.rs"]
mod tests;
