use super::*;

fn hazard_params() -> PlanParams {
    PlanParams {
        decay: 0.6,
        falloff: 0.8,
        fill: 0.8,
        ..PlanParams::default()
    }
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn hazard_sequence_is_enumerable() {
    let plan = plan(Size::new(100.0, 20.0), 256, 256, &hazard_params()).unwrap();

    // 2.048 * 0.6^9 * 100 ~= 2.06px is the last copy wider than 2px.
    assert_eq!(plan.len(), 10);
    for (d, p) in plan.iter().enumerate() {
        assert_eq!(p.depth, d as u32);
        assert!(close(p.scale, 2.048 * 0.6f64.powi(d as i32)));
        assert!(close(p.opacity, 0.8f64.powi(d as i32)));
    }
    assert_eq!(plan.placements()[0].center, Point::new(128.0, 128.0));
}

#[test]
fn single_glyph_on_small_canvas_stops_below_two_pixels() {
    let params = PlanParams::default();
    let bounds = Size::new(30.0, 40.0);
    let plan = plan(bounds, 64, 64, &params).unwrap();

    assert!(!plan.is_empty());
    assert_eq!(plan.placements()[0].depth, 0);
    let last = plan.placements().last().unwrap();
    assert!(last.extent(bounds).max_side() >= params.min_extent_px);
    assert!(last.extent(bounds).max_side() * params.decay < params.min_extent_px);
}

#[test]
fn scale_strictly_decreases_and_depth_increases() {
    let plan = plan(Size::new(73.0, 31.0), 300, 500, &PlanParams::default()).unwrap();
    for pair in plan.placements().windows(2) {
        assert!(pair[1].scale < pair[0].scale);
        assert_eq!(pair[1].depth, pair[0].depth + 1);
        assert!(pair[1].opacity <= pair[0].opacity);
    }
}

#[test]
fn depth_zero_fits_the_canvas() {
    let bounds = Size::new(400.0, 50.0);
    let plan = plan(bounds, 100, 300, &PlanParams::default()).unwrap();
    let root = plan.placements()[0].extent(bounds);
    assert!(root.width <= 300.0 && root.height <= 100.0);
}

#[test]
fn children_stay_inside_their_parent() {
    let bounds = Size::new(60.0, 25.0);
    let params = PlanParams {
        jitter: 1.0,
        ..PlanParams::default()
    };
    let plan = plan(bounds, 512, 512, &params).unwrap();
    for pair in plan.placements().windows(2) {
        let (parent, child) = (pair[0], pair[1]);
        let pe = parent.extent(bounds);
        let ce = child.extent(bounds);
        let eps = 1e-9;
        assert!(child.center.x - ce.width / 2.0 >= parent.center.x - pe.width / 2.0 - eps);
        assert!(child.center.x + ce.width / 2.0 <= parent.center.x + pe.width / 2.0 + eps);
        assert!(child.center.y - ce.height / 2.0 >= parent.center.y - pe.height / 2.0 - eps);
        assert!(child.center.y + ce.height / 2.0 <= parent.center.y + pe.height / 2.0 + eps);
    }
}

#[test]
fn jitter_zero_is_concentric_and_jitter_offsets_children() {
    let bounds = Size::new(50.0, 50.0);
    let still = plan(
        bounds,
        200,
        200,
        &PlanParams {
            jitter: 0.0,
            ..PlanParams::default()
        },
    )
    .unwrap();
    assert!(still.iter().all(|p| p.center == Point::new(100.0, 100.0)));

    let moving = plan(bounds, 200, 200, &PlanParams::default()).unwrap();
    assert!(moving.iter().skip(1).any(|p| p.center != Point::new(100.0, 100.0)));
}

#[test]
fn degenerate_bounds_give_empty_plan() {
    let params = PlanParams::default();
    assert!(plan(Size::ZERO, 64, 64, &params).unwrap().is_empty());
    assert!(plan(Size::new(10.0, 0.0), 64, 64, &params).unwrap().is_empty());
    assert!(plan(Size::new(0.0, 10.0), 64, 64, &params).unwrap().is_empty());
}

#[test]
fn max_depth_bounds_slow_decay() {
    let params = PlanParams {
        decay: 0.999,
        falloff: 1.0,
        min_extent_px: 1e-9,
        min_opacity: 1e-9,
        max_depth: 20,
        ..PlanParams::default()
    };
    let plan = plan(Size::new(10.0, 10.0), 64, 64, &params).unwrap();
    assert_eq!(plan.len(), 21);
    assert_eq!(plan.max_depth(), Some(20));
}

#[test]
fn opacity_threshold_stops_recursion() {
    let params = PlanParams {
        decay: 0.9,
        falloff: 0.1,
        ..PlanParams::default()
    };
    // 1, 0.1, 0.01 survive; 0.001 < 1/255 does not.
    let plan = plan(Size::new(10.0, 10.0), 1000, 1000, &params).unwrap();
    assert_eq!(plan.len(), 3);
}

#[test]
fn tones_alternate_when_enabled() {
    let bounds = Size::new(20.0, 20.0);
    let plan_alt = plan(bounds, 128, 128, &PlanParams::default()).unwrap();
    for p in &plan_alt {
        let expected = if p.depth % 2 == 1 {
            Tone::Inverse
        } else {
            Tone::Foreground
        };
        assert_eq!(p.tone, expected);
    }

    let flat = plan(
        bounds,
        128,
        128,
        &PlanParams {
            alternate_tone: false,
            ..PlanParams::default()
        },
    )
    .unwrap();
    assert!(flat.iter().all(|p| p.tone == Tone::Foreground));
}

#[test]
fn invalid_params_are_configuration_errors() {
    let bad = [
        PlanParams {
            decay: 1.0,
            ..PlanParams::default()
        },
        PlanParams {
            decay: 0.0,
            ..PlanParams::default()
        },
        PlanParams {
            falloff: 0.0,
            ..PlanParams::default()
        },
        PlanParams {
            fill: 1.5,
            ..PlanParams::default()
        },
        PlanParams {
            jitter: -0.1,
            ..PlanParams::default()
        },
        PlanParams {
            min_extent_px: f64::NAN,
            ..PlanParams::default()
        },
    ];
    for params in bad {
        assert!(matches!(
            plan(Size::new(10.0, 10.0), 64, 64, &params),
            Err(CoghazError::Configuration(_))
        ));
    }
}

#[test]
fn plan_is_deterministic() {
    let a = plan(Size::new(91.0, 17.0), 333, 222, &PlanParams::default()).unwrap();
    let b = plan(Size::new(91.0, 17.0), 333, 222, &PlanParams::default()).unwrap();
    assert_eq!(a, b);
}
