use crate::foundation::core::Rgba8;
use crate::foundation::math::mul_div255_u8;
use crate::plan::planner::{Placement, PlacementPlan, Tone};
use crate::render::canvas::Canvas;
use crate::text::run::GlyphRun;

/// Most sub-samples per axis when a placement minifies the run.
const MAX_SUPERSAMPLE: u32 = 8;

/// Blend `color` over a straight-alpha `dst` with effective coverage `alpha` in `[0, 1]`.
///
/// Per channel: `color * a + dst * (1 - a)`, with `a` quantized to 8 bits.
pub fn over(dst: [u8; 4], color: Rgba8, alpha: f32) -> [u8; 4] {
    let alpha = alpha.clamp(0.0, 1.0) * f32::from(color.a) / 255.0;
    let sa = ((alpha * 255.0).round() as i32).clamp(0, 255) as u16;
    if sa == 0 {
        return dst;
    }
    let inv = 255u16 - sa;

    let src = color.to_array();
    let mut out = [0u8; 4];
    for i in 0..3 {
        let sc = mul_div255_u8(u16::from(src[i]), sa);
        let dc = mul_div255_u8(u16::from(dst[i]), inv);
        out[i] = sc.saturating_add(dc);
    }
    out[3] = (sa as u8).saturating_add(mul_div255_u8(u16::from(dst[3]), inv));
    out
}

/// Tint a placement is painted with.
pub fn tone_color(color: Rgba8, tone: Tone) -> Rgba8 {
    match tone {
        Tone::Foreground => color,
        Tone::Inverse => color.inverted(),
    }
}

/// Paint every placement of `plan` onto `canvas`, back to front.
///
/// Placements are painted in increasing depth; ties keep plan order.
pub fn composite(canvas: &mut Canvas, run: &GlyphRun, plan: &PlacementPlan, color: Rgba8) {
    let mut ordered: Vec<&Placement> = plan.iter().collect();
    ordered.sort_by_key(|p| p.depth);
    for placement in ordered {
        stamp(canvas, run, placement, color);
    }
}

/// Resample `run` to one placement and blend it onto `canvas`, clipping at the edges.
pub fn stamp(canvas: &mut Canvas, run: &GlyphRun, placement: &Placement, color: Rgba8) {
    let scale = placement.scale;
    if run.is_degenerate() || !(scale.is_finite() && scale > 0.0) || placement.opacity <= 0.0 {
        return;
    }

    let extent = placement.extent(run.bounds());
    let left = placement.center.x - extent.width / 2.0;
    let top = placement.center.y - extent.height / 2.0;

    let x0 = left.floor().max(0.0);
    let y0 = top.floor().max(0.0);
    let x1 = (left + extent.width).ceil().min(f64::from(canvas.width()));
    let y1 = (top + extent.height).ceil().min(f64::from(canvas.height()));
    if x0 >= x1 || y0 >= y1 {
        return;
    }
    let (x0, y0, x1, y1) = (x0 as u32, y0 as u32, x1 as u32, y1 as u32);

    let n = ((1.0 / scale).ceil() as u32).clamp(1, MAX_SUPERSAMPLE);
    let step = 1.0 / f64::from(n);
    let weight = 1.0 / (n * n) as f32;
    let opacity = placement.opacity.clamp(0.0, 1.0) as f32;
    let tint = tone_color(color, placement.tone);

    for py in y0..y1 {
        for px in x0..x1 {
            let mut coverage = 0.0f32;
            for sy in 0..n {
                let v = (f64::from(py) + (f64::from(sy) + 0.5) * step - top) / scale;
                for sx in 0..n {
                    let u = (f64::from(px) + (f64::from(sx) + 0.5) * step - left) / scale;
                    coverage += run.sample(u, v);
                }
            }
            coverage *= weight;
            if coverage <= 0.0 {
                continue;
            }

            let dst = canvas.pixel_bytes_mut(px, py);
            let out = over([dst[0], dst[1], dst[2], dst[3]], tint, coverage * opacity);
            dst.copy_from_slice(&out);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
