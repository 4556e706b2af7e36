use super::*;

#[test]
fn scalar_and_point_lerp() {
    assert_eq!(<f64 as Lerp>::lerp(&2.0, &4.0, 0.5), 3.0);
    assert_eq!(
        <Point as Lerp>::lerp(&Point::new(0.0, 10.0), &Point::new(10.0, 0.0), 0.25),
        Point::new(2.5, 7.5)
    );
}

#[test]
fn vec_lerp_truncates_to_shorter() {
    let v = Vec::<f64>::lerp(&vec![0.0, 0.0, 7.0], &vec![10.0, 20.0], 0.5);
    assert_eq!(v, vec![5.0, 10.0]);
}
