use super::*;

const KEPT: &str = "M0 0C0 0 10 0 10 0C10 0 20 0 20 0";
const SHORT: &str = "M0 0C5 5 15 5 20 0";

fn outline(d: &str) -> PathOutline {
    PathOutline::parse(d).unwrap()
}

#[test]
fn arena_round_trips_handles() {
    let o = outline("M0 0C1 2 3 4 5 6C7 8 9 10 11 12Z");
    let arena = PointArena::from_outline(&o);
    assert_eq!(arena.len(), 3);
    assert_eq!(arena.points()[0].cp1.pos, Point::new(1.0, 2.0));
    assert_eq!(arena.points()[1].cp0.pos, Point::new(3.0, 4.0));
    assert_eq!(arena.to_outline(true).unwrap(), o);
}

#[test]
fn inserting_renumbers_owners() {
    let mut arena = PointArena::from_outline(&outline(SHORT));
    let p = Point::new(1.0, 1.0);
    arena.insert(
        1,
        ControlPoint {
            pos: p,
            cp0: Handle { pos: p, owner: 99 },
            cp1: Handle { pos: p, owner: 99 },
        },
    );
    for (i, cp) in arena.points().iter().enumerate() {
        assert_eq!(cp.cp0.owner, i);
        assert_eq!(arena.owner(&cp.cp1).map(|o| o.pos), Some(cp.pos));
    }
}

#[test]
fn shorter_outline_gains_the_missing_point() {
    let kept = outline(KEPT);
    let short = outline(SHORT);
    let out = reshape(&short, &kept);

    assert_eq!(out.first.cubic_count(), out.second.cubic_count());
    assert_eq!(out.second, kept);

    let ins = out.inserted.unwrap();
    assert_eq!(ins.outline, 0);
    assert_eq!(ins.index, 1);
    assert!((ins.t - 0.5).abs() < 1e-6, "t = {}", ins.t);

    // The synthesized point lies on the original segment at `t`.
    let c = &short.cubics[0];
    let expected = cubic_point(short.start, c.c1, c.c2, c.end, ins.t);
    assert!(ins.pos.distance(expected) < 1e-9);
    assert_eq!(out.first.cubics[0].end, ins.pos);
}

#[test]
fn split_halves_trace_the_original_curve() {
    let short = outline(SHORT);
    let out = reshape(&outline(KEPT), &short);
    assert_eq!(out.inserted.map(|i| i.outline), Some(1));

    let orig = &short.cubics[0];
    let halves = &out.second.cubics;
    // A quarter into the original equals halfway into the first half when t = 0.5.
    let on_orig = cubic_point(short.start, orig.c1, orig.c2, orig.end, 0.25);
    let on_half = cubic_point(short.start, halves[0].c1, halves[0].c2, halves[0].end, 0.5);
    assert!(on_orig.distance(on_half) < 1e-6);
    assert_eq!(halves[1].end, orig.end);
}

#[test]
fn split_parameter_counts_samples_not_length() {
    let short = outline("M0 0C0 0 100 0 100 0");
    let kept = outline("M0 0C0 0 10 0 10 0C10 0 100 0 100 0");
    let out = reshape(&short, &kept);
    let ins = out.inserted.unwrap();
    assert!((ins.t - 0.5).abs() < 1e-9, "t = {}", ins.t);

    let c = &short.cubics[0];
    let expected = cubic_point(short.start, c.c1, c.c2, c.end, 0.5);
    assert!(ins.pos.distance(expected) < 1e-9);
}

#[test]
fn equal_counts_are_left_alone() {
    let a = outline(SHORT);
    let b = outline("M1 1C5 5 15 5 21 1");
    let out = reshape(&a, &b);
    assert_eq!((out.first, out.second), (a, b));
    assert!(out.inserted.is_none());
}

#[test]
fn added_first_or_last_point_is_left_alone() {
    let short = outline("M10 0C10 0 20 0 20 0");
    // Extra move point.
    let out = reshape(&short, &outline(KEPT));
    assert!(out.inserted.is_none());
    // Extra trailing point.
    let out = reshape(&outline("M0 0C0 0 10 0 10 0"), &outline(KEPT));
    assert!(out.inserted.is_none());
}

#[test]
fn reshape_str_reports_parse_errors() {
    assert!(reshape_str("L0 0", KEPT).is_err());
    let out = reshape_str(SHORT, KEPT).unwrap();
    assert_eq!(out.first.cubic_count(), 2);
}
