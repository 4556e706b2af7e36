use super::*;

#[test]
fn direction_sign_roundtrip() {
    assert_eq!(Direction::Forward.sign(), 1.0);
    assert_eq!(Direction::Backward.sign(), -1.0);
    assert_eq!(Direction::from_sign(-1), Direction::Backward);
    assert_eq!(Direction::from_sign(1), Direction::Forward);
    assert_eq!(Direction::from_sign(0), Direction::Forward);
}

#[test]
fn anchor_resolves_against_bbox() {
    let bbox = Rect::new(10.0, 20.0, 110.0, 60.0);
    assert_eq!(Anchor::CENTER.resolve(bbox), Point::new(60.0, 40.0));
    assert_eq!(Anchor::new(0.0, 1.0).resolve(bbox), Point::new(10.0, 60.0));
}

#[test]
fn formats_numbers_for_attributes() {
    assert_eq!(format_number(0.1 + 0.2), "0.3");
    assert_eq!(format_number(-0.0), "0");
    assert_eq!(format_number(12.0), "12");
    assert_eq!(format_number(-2.5), "-2.5");
}
