use super::*;

const LINEAR: &str = "linear-gradient(90deg, rgba(255,0,0,1) 0%, rgba(0,0,255,0.5) 100%)";

#[test]
fn parses_linear_gradient() {
    let g = GradientData::parse(LINEAR).unwrap();
    assert_eq!(g.kind, GradientKind::Linear);
    assert_eq!(g.angle, 90.0);
    assert_eq!(g.stops.len(), 2);
    assert_eq!(g.stops[1].color, ColorDef::rgba(0.0, 0.0, 255.0, 0.5));
    assert_eq!(g.stops[1].offset, 100.0);
}

#[test]
fn parses_radial_with_shape_and_hex_stops() {
    let g = GradientData::parse("radial-gradient(circle, #fff 10%, #000 90%)").unwrap();
    assert_eq!(g.kind, GradientKind::Radial);
    assert_eq!(g.angle, 0.0);
    assert_eq!(g.stops[0].color, ColorDef::rgba(255.0, 255.0, 255.0, 1.0));
    assert_eq!(g.stops[0].offset, 10.0);
}

#[test]
fn spreads_missing_offsets() {
    let g = GradientData::parse("linear-gradient(0deg, #000, #fff, #000)").unwrap();
    let offsets: Vec<f64> = g.stops.iter().map(|s| s.offset).collect();
    assert_eq!(offsets, vec![0.0, 50.0, 100.0]);
}

#[test]
fn flat_layout_is_angle_then_stops() {
    let g = GradientData::parse(LINEAR).unwrap();
    let flat = g.to_flat();
    assert_eq!(flat, vec![90.0, 255.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 255.0, 0.5, 100.0]);
    assert_eq!(GradientData::from_flat(GradientKind::Linear, &flat), g);
}

#[test]
fn displays_as_css() {
    let g = GradientData::parse("linear-gradient(45deg, #ff0000 0%, #0000ff 100%)").unwrap();
    assert_eq!(
        g.to_string(),
        "linear-gradient(45deg, rgba(255,0,0,1) 0%, rgba(0,0,255,1) 100%)"
    );
}

#[test]
fn solid_endpoint_takes_gradient_structure() {
    let solid = ColorValue::parse("#00ff00").unwrap();
    let grad = ColorValue::parse(LINEAR).unwrap();
    let (a, b) = gradient_endpoints(&solid, &grad).unwrap();
    assert_eq!(a.stops.len(), b.stops.len());
    assert_eq!(a.angle, 90.0);
    assert!(a.stops.iter().all(|s| s.color == ColorDef::rgba(0.0, 255.0, 0.0, 1.0)));
    assert_eq!(a.stops[1].offset, 100.0);
}

#[test]
fn stop_counts_are_equalized() {
    let a = ColorValue::parse("linear-gradient(0deg, #000 0%, #fff 100%)").unwrap();
    let b = ColorValue::parse("linear-gradient(0deg, #000 0%, #f00 50%, #fff 100%)").unwrap();
    let (a, b) = gradient_endpoints(&a, &b).unwrap();
    assert_eq!(a.stops.len(), 3);
    assert_eq!(a.stops[2], a.stops[1]);
    assert_eq!(a.to_flat().len(), b.to_flat().len());
}

#[test]
fn two_solids_are_not_gradients() {
    let a = ColorValue::parse("#000").unwrap();
    let b = ColorValue::parse("rgb(1,2,3)").unwrap();
    assert!(gradient_endpoints(&a, &b).is_none());
    assert!(!is_gradient("rgb(1,2,3)"));
    assert!(is_gradient("Linear-Gradient(1deg, #000 0%)"));
}

#[test]
fn rejects_malformed_gradients() {
    assert!(GradientData::parse("conic-gradient(#000 0%)").is_err());
    assert!(GradientData::parse("linear-gradient(xdeg, #000 0%)").is_err());
    assert!(GradientData::parse("linear-gradient(10deg)").is_err());
    assert!(GradientData::parse("linear-gradient(10deg, #000 q%)").is_err());
}
