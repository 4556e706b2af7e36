use super::*;

#[test]
fn parses_hex_forms() {
    assert_eq!(ColorDef::parse("#fff").unwrap(), ColorDef::rgba(255.0, 255.0, 255.0, 1.0));
    assert_eq!(ColorDef::parse("#ff000080").unwrap().to_array()[..3], [255.0, 0.0, 0.0]);
    assert!((ColorDef::parse("#ff000080").unwrap().a - 128.0 / 255.0).abs() < 1e-12);
    assert_eq!(ColorDef::parse("#0F08").unwrap(), ColorDef::rgba(0.0, 255.0, 0.0, 136.0 / 255.0));
    assert_eq!(ColorDef::parse(" #102030 ").unwrap(), ColorDef::rgba(16.0, 32.0, 48.0, 1.0));
}

#[test]
fn parses_functional_forms() {
    assert_eq!(ColorDef::parse("rgb(1, 2, 3)").unwrap(), ColorDef::rgba(1.0, 2.0, 3.0, 1.0));
    assert_eq!(ColorDef::parse("RGBA(1,2,3,0.5)").unwrap(), ColorDef::rgba(1.0, 2.0, 3.0, 0.5));
    assert_eq!(ColorDef::parse("transparent").unwrap(), ColorDef::TRANSPARENT);
}

#[test]
fn rejects_malformed_colors() {
    for bad in ["#12", "#ggg", "rgb(1,2)", "hsl(1,2,3)", "rgba(1,2,x,1)"] {
        let err = ColorDef::parse(bad).unwrap_err();
        assert!(err.to_string().starts_with("validation error:"), "{bad}: {err}");
    }
}

#[test]
fn displays_as_rgba() {
    assert_eq!(ColorDef::rgba(10.4, 300.0, -2.0, 0.25).to_string(), "rgba(10,255,0,0.25)");
}

#[test]
fn lerps_channel_wise() {
    let a = ColorDef::rgba(0.0, 100.0, 200.0, 1.0);
    let b = ColorDef::rgba(100.0, 100.0, 0.0, 0.0);
    assert_eq!(ColorDef::lerp(&a, &b, 0.5), ColorDef::rgba(50.0, 100.0, 100.0, 0.5));
}
