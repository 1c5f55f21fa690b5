use std::cell::RefCell;

use super::*;
use crate::foundation::core::Rgba8;

struct BlockRasterizer {
    width: u32,
    height: u32,
}

impl GlyphRasterizer for BlockRasterizer {
    fn rasterize(&self, text: &str, _size_px: f32) -> CoghazResult<GlyphRun> {
        if text.trim().is_empty() {
            return Ok(GlyphRun::empty());
        }
        GlyphRun::new(
            self.width,
            self.height,
            vec![1.0; (self.width * self.height) as usize],
        )
    }
}

#[derive(Default)]
struct RecordingEncoder {
    written: RefCell<Vec<(PathBuf, u32, u32, u64)>>,
}

impl ImageEncoder for RecordingEncoder {
    fn encode(&self, canvas: &Canvas, path: &Path) -> CoghazResult<()> {
        self.written.borrow_mut().push((
            path.to_path_buf(),
            canvas.width(),
            canvas.height(),
            canvas.fingerprint(),
        ));
        Ok(())
    }
}

struct FailingEncoder;

impl ImageEncoder for FailingEncoder {
    fn encode(&self, _canvas: &Canvas, path: &Path) -> CoghazResult<()> {
        Err(CoghazError::encoding(format!(
            "cannot write '{}'",
            path.display()
        )))
    }
}

fn block_generator(text: &str) -> PerlmanGreeneGenerator<BlockRasterizer, RecordingEncoder> {
    PerlmanGreeneGenerator::with_parts(
        GeneratorConfig::new(text, "unused.ttf"),
        BlockRasterizer {
            width: 40,
            height: 10,
        },
        RecordingEncoder::default(),
    )
    .unwrap()
}

#[test]
fn empty_text_fails_at_construction() {
    let err = PerlmanGreeneGenerator::with_parts(
        GeneratorConfig::new("", "unused.ttf"),
        BlockRasterizer {
            width: 1,
            height: 1,
        },
        RecordingEncoder::default(),
    )
    .err()
    .unwrap();
    assert!(matches!(err, CoghazError::Configuration(_)));
}

#[test]
fn missing_font_fails_at_construction() {
    let err = PerlmanGreeneGenerator::new("HAZARD", "/no/such/font.ttf")
        .err()
        .unwrap();
    assert!(matches!(err, CoghazError::Configuration(_)));
}

#[test]
fn zero_dimension_fails_without_writing() {
    let g = block_generator("X");
    for (h, w) in [(0, 64), (64, 0), (0, 0)] {
        let err = g.generate("out.png", h, w).unwrap_err();
        assert!(matches!(err, CoghazError::InvalidDimension(_)));
    }
    assert!(g.encoder.written.borrow().is_empty());
}

#[test]
fn inkless_text_is_empty_input() {
    let g = block_generator("   ");
    let err = g.generate("out.png", 64, 64).unwrap_err();
    assert!(matches!(err, CoghazError::EmptyInput(_)));
    assert!(g.encoder.written.borrow().is_empty());
    assert!(matches!(g.plan(64, 64), Err(CoghazError::EmptyInput(_))));
}

#[test]
fn generate_hands_requested_size_to_encoder() {
    let g = block_generator("HAZARD");
    g.generate("a.png", 120, 200).unwrap();
    g.generate("b.png", 64, 64).unwrap();

    let written = g.encoder.written.borrow();
    assert_eq!(written.len(), 2);
    assert_eq!(written[0].0, PathBuf::from("a.png"));
    assert_eq!((written[0].1, written[0].2), (200, 120));
    assert_eq!((written[1].1, written[1].2), (64, 64));
}

#[test]
fn render_is_deterministic_and_inked() {
    let g = block_generator("HAZARD");
    let a = g.render(96, 96).unwrap();
    let b = g.render(96, 96).unwrap();
    assert_eq!(a, b);
    // Inside the depth-0 copy but left of every deeper one.
    assert_eq!(a.pixel(12, 48), Some(Rgba8::BLACK));
    assert_eq!(a.pixel(0, 0), Some(Rgba8::WHITE));
}

#[test]
fn plan_matches_planner_for_run_bounds() {
    let g = block_generator("HAZARD");
    let plan = g.plan(256, 256).unwrap();
    let direct = planner::plan(
        crate::foundation::core::Size::new(40.0, 10.0),
        256,
        256,
        &g.config().plan,
    )
    .unwrap();
    assert_eq!(plan, direct);
}

#[test]
fn encoder_failure_is_reported() {
    let g = PerlmanGreeneGenerator::with_parts(
        GeneratorConfig::new("X", "unused.ttf"),
        BlockRasterizer {
            width: 8,
            height: 8,
        },
        FailingEncoder,
    )
    .unwrap();
    assert!(matches!(
        g.generate("/readonly/out.png", 32, 32),
        Err(CoghazError::Encoding(_))
    ));
}
