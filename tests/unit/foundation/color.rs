use super::*;
use serde_json::json;

#[test]
fn parses_hex_rgb_and_rgba() {
    let c: Rgba8 = serde_json::from_value(json!("#FFFF00")).unwrap();
    assert_eq!(c, Rgba8::rgb(255, 255, 0));

    let c: Rgba8 = serde_json::from_value(json!("000000b4")).unwrap();
    assert_eq!(c, Rgba8::rgba(0, 0, 0, 180));
}

#[test]
fn parses_byte_arrays() {
    let c: Rgba8 = serde_json::from_value(json!([187, 187, 187])).unwrap();
    assert_eq!(c, Rgba8::rgb(187, 187, 187));

    let c: Rgba8 = serde_json::from_value(json!([0, 0, 0, 180])).unwrap();
    assert_eq!(c.a, 180);

    assert!(serde_json::from_value::<Rgba8>(json!([1, 2])).is_err());
}

#[test]
fn rejects_malformed_hex() {
    assert!(Rgba8::parse_hex("#fff").is_err());
    assert!(Rgba8::parse_hex("#gg0000").is_err());
    assert!(Rgba8::parse_hex("#ééé").is_err());
}

#[test]
fn serializes_as_hex() {
    let v = serde_json::to_value(Rgba8::rgba(0, 0, 0, 180)).unwrap();
    assert_eq!(v, json!("#000000b4"));
}

#[test]
fn scale_alpha_rounds() {
    assert_eq!(Rgba8::rgba(0, 0, 0, 180).scale_alpha(0.7).a, 126);
    assert_eq!(Rgba8::rgb(1, 2, 3).scale_alpha(2.0).a, 255);
}
