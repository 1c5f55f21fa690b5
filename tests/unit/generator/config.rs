use super::*;

#[test]
fn empty_text_is_rejected() {
    let err = GeneratorConfig::new("", "font.ttf").validate().unwrap_err();
    assert!(matches!(err, CoghazError::Configuration(_)));
}

#[test]
fn reference_size_must_be_sane() {
    for size in [0.0, -1.0, f32::NAN, 5000.0] {
        let cfg = GeneratorConfig {
            reference_size_px: size,
            ..GeneratorConfig::new("X", "font.ttf")
        };
        assert!(cfg.validate().is_err(), "size {size}");
    }
    GeneratorConfig::new("X", "font.ttf").validate().unwrap();
}

#[test]
fn plan_params_are_checked() {
    let mut cfg = GeneratorConfig::new("X", "font.ttf");
    cfg.plan.decay = 1.2;
    assert!(matches!(
        cfg.validate(),
        Err(CoghazError::Configuration(_))
    ));
}

#[test]
fn json_fills_missing_fields_with_defaults() {
    let dir = std::env::temp_dir().join(format!("coghaz_cfg_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("cfg.json");
    std::fs::write(
        &path,
        r#"{
            "text": "HAZARD",
            "font_path": "fonts/test.ttf",
            "plan": { "decay": 0.5 },
            "backdrop": { "kind": "fractal", "seed": 9 }
        }"#,
    )
    .unwrap();

    let cfg = GeneratorConfig::from_json_file(&path).unwrap();
    std::fs::remove_dir_all(&dir).ok();

    assert_eq!(cfg.text, "HAZARD");
    assert_eq!(cfg.font_path, PathBuf::from("fonts/test.ttf"));
    assert_eq!(cfg.plan.decay, 0.5);
    assert_eq!(cfg.plan.falloff, PlanParams::default().falloff);
    assert_eq!(cfg.reference_size_px, DEFAULT_REFERENCE_SIZE_PX);
    assert_eq!(cfg.backdrop, Backdrop::Fractal { seed: 9 });
    assert_eq!(cfg.foreground, Rgba8::BLACK);
}

#[test]
fn unreadable_config_is_configuration_error() {
    let err = GeneratorConfig::from_json_file("/definitely/not/here.json").unwrap_err();
    assert!(matches!(err, CoghazError::Configuration(_)));
}
