use super::*;

const SQUARE: &str = "M0 0C0 0 10 0 10 0C10 0 10 10 10 10C10 10 0 10 0 10C0 10 0 0 0 0";

#[test]
fn parses_and_renders_compact_form() {
    let o = PathOutline::parse(SQUARE).unwrap();
    assert_eq!(o.start, Point::new(0.0, 0.0));
    assert_eq!(o.cubic_count(), 4);
    assert_eq!(o.to_string(), SQUARE);
}

#[test]
fn accepts_commas_implicit_repeats_and_close() {
    let o = PathOutline::parse("M 1,2 C 3,4 5,6 7,8 9,10 11,12 13,14 Z").unwrap();
    assert_eq!(o.cubic_count(), 2);
    assert!(o.closed);
    assert_eq!(o.cubics[1].end, Point::new(13.0, 14.0));
    assert!(o.to_string().ends_with('Z'));
}

#[test]
fn tolerates_adjacent_signed_and_dotted_numbers() {
    let o = PathOutline::parse("M-1-2C.5.5 1e1 -2E-1 3 4").unwrap();
    assert_eq!(o.start, Point::new(-1.0, -2.0));
    assert_eq!(o.cubics[0].c1, Point::new(0.5, 0.5));
    assert_eq!(o.cubics[0].c2, Point::new(10.0, -0.2));
}

#[test]
fn rejects_malformed_outlines() {
    assert!(PathOutline::parse("C1 2 3 4 5 6").is_err());
    assert!(PathOutline::parse("M0 0L10 10").is_err());
    assert!(PathOutline::parse("M0 0C1 2 3").is_err());
    assert!(PathOutline::parse("M0").is_err());
    assert!(PathOutline::parse("M0 0Z C1 1 1 1 1 1").is_err());
}

#[test]
fn flat_roundtrip_preserves_geometry() {
    let o = PathOutline::parse(SQUARE).unwrap();
    let flat = o.to_flat();
    assert_eq!(flat.len(), 2 + 4 * 6);
    assert_eq!(PathOutline::from_flat(&flat, false).unwrap(), o);
    assert!(PathOutline::from_flat(&flat[..7], false).is_err());
}

#[test]
fn through_points_places_thirds() {
    let o = PathOutline::through_points(&[Point::new(0.0, 0.0), Point::new(3.0, 6.0)]).unwrap();
    assert_eq!(o.cubics[0].c1, Point::new(1.0, 2.0));
    assert_eq!(o.cubics[0].c2, Point::new(2.0, 4.0));
    assert!(PathOutline::through_points(&[]).is_none());
}

#[test]
fn bounding_box_and_translation() {
    let o = PathOutline::parse(SQUARE).unwrap();
    let b = o.bounding_box();
    assert_eq!((b.x0, b.y0, b.x1, b.y1), (0.0, 0.0, 10.0, 10.0));
    let moved = o.translated(Vec2::new(5.0, -5.0));
    let b = moved.bounding_box();
    assert_eq!((b.x0, b.y0, b.x1, b.y1), (5.0, -5.0, 15.0, 5.0));
}

#[test]
fn serde_uses_text_form() {
    let o = PathOutline::parse("M0 0C1 1 2 2 3 3").unwrap();
    let s = serde_json::to_string(&o).unwrap();
    assert_eq!(s, "\"M0 0C1 1 2 2 3 3\"");
    let back: PathOutline = serde_json::from_str(&s).unwrap();
    assert_eq!(back, o);
}

#[test]
fn from_bezpath_raises_lines_to_cubics() {
    let path = BezPath::from_svg("M0 0L9 0L9 9Z").unwrap();
    let o = PathOutline::from_bezpath(&path).unwrap();
    assert_eq!(o.cubic_count(), 2);
    assert!(o.closed);
    assert_eq!(o.cubics[0].c1, Point::new(3.0, 0.0));
    assert_eq!(o.cubics[0].c2, Point::new(6.0, 0.0));
    assert_eq!(o.cubics[1].end, Point::new(9.0, 9.0));
    assert!(PathOutline::from_bezpath(&BezPath::new()).is_none());
}

#[test]
fn relative_cubics_resolve_to_absolute_points() {
    let o = PathOutline::parse("m10 10c0 0 5 0 5 0 0 0 0 5 0 5z").unwrap();
    assert_eq!(o.start, Point::new(10.0, 10.0));
    assert_eq!(o.cubics[0].end, Point::new(15.0, 10.0));
    assert_eq!(o.cubics[1].c2, Point::new(15.0, 15.0));
    assert_eq!(o.cubics[1].end, Point::new(15.0, 15.0));
    assert!(o.closed);
}

#[test]
fn from_svg_accepts_any_path_syntax() {
    let o = PathOutline::from_svg("M0 0 L10 0 Q10 10 0 10").unwrap();
    assert_eq!(o.cubic_count(), 2);
    assert_eq!(o.cubics[1].end, Point::new(0.0, 10.0));
    assert!(PathOutline::parse("M0 0 L10 0").is_err());
    assert!(PathOutline::from_svg("garbage").is_err());
    assert!(PathOutline::from_svg("").is_err());
}
