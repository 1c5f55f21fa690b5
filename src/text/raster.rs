use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context as _;

use crate::foundation::core::Rgba8;
use crate::foundation::error::{CoghazError, CoghazResult};
use crate::text::run::GlyphRun;

/// Turns text into a coverage map at a reference pixel size.
///
/// This is the only text capability the generator needs; implementations are free to shape
/// and fill glyphs however they like as long as the result is deterministic.
pub trait GlyphRasterizer {
    /// Rasterize `text` at `size_px` and return its ink-cropped coverage.
    fn rasterize(&self, text: &str, size_px: f32) -> CoghazResult<GlyphRun>;
}

/// Font bytes loaded from disk and validated against the shaper.
#[derive(Clone)]
pub struct FontSource {
    path: PathBuf,
    bytes: Arc<Vec<u8>>,
    family_name: String,
}

impl std::fmt::Debug for FontSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontSource")
            .field("path", &self.path)
            .field("bytes_len", &self.bytes.len())
            .field("family_name", &self.family_name)
            .finish()
    }
}

impl FontSource {
    /// Read and validate a font file.
    pub fn load(path: impl AsRef<Path>) -> CoghazResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .with_context(|| format!("read font '{}'", path.display()))
            .map_err(|e| CoghazError::configuration(format!("{e:#}")))?;
        let family_name = register_font(&mut parley::FontContext::default(), &bytes)
            .map_err(|e| match e {
                CoghazError::Configuration(msg) => {
                    CoghazError::configuration(format!("font '{}': {msg}", path.display()))
                }
                other => other,
            })?;
        Ok(Self {
            path: path.to_path_buf(),
            bytes: Arc::new(bytes),
            family_name,
        })
    }

    /// Path the font was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw font bytes.
    pub fn bytes(&self) -> &[u8] {
        self.bytes.as_slice()
    }

    /// Primary family name registered from the bytes.
    pub fn family_name(&self) -> &str {
        &self.family_name
    }
}

fn register_font(font_ctx: &mut parley::FontContext, bytes: &[u8]) -> CoghazResult<String> {
    let families = font_ctx
        .collection
        .register_fonts(parley::fontique::Blob::from(bytes.to_vec()), None);
    let family_id = families
        .first()
        .map(|(id, _)| *id)
        .ok_or_else(|| CoghazError::configuration("no font families registered from font bytes"))?;
    let name = font_ctx
        .collection
        .family_name(family_id)
        .ok_or_else(|| CoghazError::configuration("registered font family has no name"))?;
    Ok(name.to_string())
}

/// Default rasterizer: shapes with Parley and fills outlines with `vello_cpu`.
#[derive(Clone, Debug)]
pub struct ParleyRasterizer {
    font: FontSource,
}

impl ParleyRasterizer {
    /// Wrap an already validated font.
    pub fn new(font: FontSource) -> Self {
        Self { font }
    }

    /// The font this rasterizer draws with.
    pub fn font(&self) -> &FontSource {
        &self.font
    }

    fn layout(&self, text: &str, size_px: f32) -> CoghazResult<parley::Layout<Rgba8>> {
        let mut font_ctx = parley::FontContext::default();
        let mut layout_ctx = parley::LayoutContext::<Rgba8>::new();
        let family_name = register_font(&mut font_ctx, self.font.bytes())?;

        let mut builder = layout_ctx.ranged_builder(&mut font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(Rgba8::WHITE));

        let mut layout: parley::Layout<Rgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

impl GlyphRasterizer for ParleyRasterizer {
    fn rasterize(&self, text: &str, size_px: f32) -> CoghazResult<GlyphRun> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(CoghazError::configuration(
                "reference size_px must be finite and > 0",
            ));
        }

        let layout = self.layout(text, size_px)?;

        // Outlines may overhang the advance box (italics, accents), so pad before cropping.
        let pad = (size_px * 0.5).ceil();
        let width = layout.width().ceil() + 2.0 * pad;
        let height = layout.height().ceil() + 2.0 * pad;
        let to_u16 = |v: f32, what: &str| -> CoghazResult<u16> {
            if v >= 1.0 && v <= f32::from(u16::MAX) {
                Ok(v as u16)
            } else {
                Err(CoghazError::configuration(format!(
                    "glyph raster {what} {v} is outside 1..=65535; shorten text or lower reference size"
                )))
            }
        };
        let w = to_u16(width, "width")?;
        let h = to_u16(height, "height")?;

        let font = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(self.font.bytes().to_vec()),
            0,
        );
        let mut ctx = vello_cpu::RenderContext::new(w, h);
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 255, 255, 255));
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x + pad,
                    y: g.y + pad,
                });
                ctx.glyph_run(&font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        ctx.flush();

        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        ctx.render_to_pixmap(&mut pixmap);
        let alpha: Vec<u8> = pixmap
            .data_as_u8_slice()
            .chunks_exact(4)
            .map(|px| px[3])
            .collect();

        let run = GlyphRun::from_alpha_cropped(u32::from(w), u32::from(h), &alpha)?;
        tracing::debug!(
            text_len = text.len(),
            size_px,
            width = run.width(),
            height = run.height(),
            "rasterized glyph run"
        );
        Ok(run)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/raster.rs"]
mod tests;
