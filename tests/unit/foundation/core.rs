use super::*;

#[test]
fn parse_hex_accepts_rgb_and_rgba() {
    assert_eq!(Rgba8::parse_hex("#ff0080").unwrap(), Rgba8::opaque(255, 0, 128));
    assert_eq!(
        Rgba8::parse_hex("10203040").unwrap(),
        Rgba8 {
            r: 0x10,
            g: 0x20,
            b: 0x30,
            a: 0x40
        }
    );
}

#[test]
fn parse_hex_rejects_garbage() {
    for bad in ["", "#fff", "#gggggg", "#1234567"] {
        assert!(matches!(
            Rgba8::parse_hex(bad),
            Err(CoghazError::Configuration(_))
        ));
    }
}

#[test]
fn inverted_keeps_alpha() {
    let c = Rgba8 {
        r: 10,
        g: 200,
        b: 0,
        a: 77,
    };
    let i = c.inverted();
    assert_eq!(i.to_array(), [245, 55, 255, 77]);
    assert_eq!(i.inverted(), c);
}

#[test]
fn dimensions_must_be_positive_and_bounded() {
    validate_dimensions(1, 1).unwrap();
    validate_dimensions(MAX_CANVAS_SIDE, 64).unwrap();
    assert!(matches!(
        validate_dimensions(0, 64),
        Err(CoghazError::InvalidDimension(_))
    ));
    assert!(matches!(
        validate_dimensions(64, 0),
        Err(CoghazError::InvalidDimension(_))
    ));
    assert!(matches!(
        validate_dimensions(64, MAX_CANVAS_SIDE + 1),
        Err(CoghazError::InvalidDimension(_))
    ));
}
