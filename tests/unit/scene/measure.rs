use std::collections::BTreeMap;

use super::*;

fn attrs(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect()
}

fn length(kind: ElementKind, pairs: &[(&str, &str)]) -> f64 {
    let map = attrs(pairs);
    total_length(&kind, &|n| map.get(n).cloned()).unwrap()
}

#[test]
fn parses_leading_numbers() {
    assert_eq!(parse_number("12.5px"), Some(12.5));
    assert_eq!(parse_number(" -3 "), Some(-3.0));
    assert_eq!(parse_number("1e2"), Some(100.0));
    assert_eq!(parse_number("2em"), Some(2.0));
    assert_eq!(parse_number("abc"), None);
}

#[test]
fn parses_point_lists() {
    assert_eq!(
        parse_points("0,0 10,0  10 10"),
        vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(10.0, 10.0)]
    );
}

#[test]
fn closed_form_lengths() {
    assert!((length(ElementKind::Circle, &[("r", "10")]) - 20.0 * PI).abs() < 1e-12);
    assert_eq!(length(ElementKind::Rect, &[("width", "10"), ("height", "5")]), 30.0);
    assert_eq!(
        length(ElementKind::Line, &[("x1", "0"), ("y1", "0"), ("x2", "3"), ("y2", "4")]),
        5.0
    );
    assert_eq!(length(ElementKind::Polyline, &[("points", "0,0 10,0 10,10")]), 20.0);
    let polygon = length(ElementKind::Polygon, &[("points", "0,0 10,0 10,10")]);
    assert!((polygon - (20.0 + 200f64.sqrt())).abs() < 1e-12);
    let ellipse = length(ElementKind::Ellipse, &[("rx", "5"), ("ry", "5")]);
    assert!((ellipse - 10.0 * PI).abs() < 1e-9);
}

#[test]
fn path_length_uses_arc_length() {
    let l = length(ElementKind::Path, &[("d", "M0 0 L30 0 L30 40")]);
    assert!((l - 70.0).abs() < 1e-6);
}

#[test]
fn point_at_length_walks_the_outline() {
    let map = attrs(&[("points", "0,0 10,0 10,10")]);
    let p = point_at_length(&ElementKind::Polyline, &|n| map.get(n).cloned(), 15.0).unwrap();
    assert!(p.distance(Point::new(10.0, 5.0)) < 1e-6);
}

#[test]
fn bounding_boxes_from_attributes() {
    let map = attrs(&[("cx", "5"), ("cy", "5"), ("r", "5")]);
    let bb = bounding_box(&ElementKind::Circle, &|n| map.get(n).cloned()).unwrap();
    assert!((bb.x0).abs() < 1e-6 && (bb.x1 - 10.0).abs() < 1e-6);

    let map = attrs(&[("x", "1"), ("y", "2"), ("width", "3"), ("height", "4")]);
    assert_eq!(
        bounding_box(&ElementKind::Rect, &|n| map.get(n).cloned()),
        Some(Rect::new(1.0, 2.0, 4.0, 6.0))
    );
    assert_eq!(bounding_box(&ElementKind::Group, &|_| None), None);
}
