use super::*;

struct SplitMix64(u64);

impl SplitMix64 {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    fn next_coord(&mut self) -> f64 {
        ((self.next_u64() >> 11) as f64 / (1u64 << 53) as f64) * 200.0 - 100.0
    }
}

#[test]
fn recovers_known_rotation() {
    let a: Vec<Point> = (0..8)
        .map(|i| {
            let th = std::f64::consts::TAU * i as f64 / 8.0;
            Point::new(th.cos() * 10.0, th.sin() * 10.0)
        })
        .collect();
    let b = rotate_left(&a, 3);
    // b[(i + shift) % n] == a[i] when shift = n - 3.
    assert_eq!(best_rotation(&a, &b), 5);
    let (aligned, shift) = align_by_rotation(&a, &b);
    assert_eq!(shift, 5);
    assert_eq!(aligned, a);
}

#[test]
fn chosen_shift_minimizes_cost_against_brute_force() {
    let mut rng = SplitMix64(0x5eed);
    for n in 1..9 {
        for _ in 0..20 {
            let a: Vec<Point> = (0..n)
                .map(|_| Point::new(rng.next_coord(), rng.next_coord()))
                .collect();
            let b: Vec<Point> = (0..n)
                .map(|_| Point::new(rng.next_coord(), rng.next_coord()))
                .collect();
            let shift = best_rotation(&a, &b);
            let chosen = rotation_cost(&a, &b, shift);
            for s in 0..n {
                let cost = rotation_cost(&a, &b, s);
                assert!(chosen <= cost);
                if s < shift {
                    assert!(cost > chosen, "ties must keep the first minimum");
                }
            }
        }
    }
}

#[test]
fn ties_pick_smallest_shift() {
    let pts = vec![Point::new(1.0, 1.0); 4];
    assert_eq!(best_rotation(&pts, &pts), 0);
}

#[test]
fn empty_sequences_are_noops() {
    assert_eq!(best_rotation(&[], &[]), 0);
    assert!(rotate_left::<Point>(&[], 2).is_empty());
}
