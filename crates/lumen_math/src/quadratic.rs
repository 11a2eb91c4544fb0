/// Solve `a*t^2 + b*t + c = 0` for real roots, returned as `(t0, t1)` with
/// `t0 <= t1`.
///
/// Returns `None` for a negative discriminant or a degenerate `a == 0`.
/// A zero discriminant gives two equal roots. Uses the cancellation-free
/// form `q = -(b ± sqrt(disc)) / 2`.
pub fn solve_quadratic(a: f32, b: f32, c: f32) -> Option<(f32, f32)> {
    if a == 0.0 {
        return None;
    }

    // f64 for the discriminant keeps grazing hits stable
    let discriminant = (b as f64) * (b as f64) - 4.0 * (a as f64) * (c as f64);
    if discriminant < 0.0 {
        return None;
    }
    let root = discriminant.sqrt();

    let q = if b < 0.0 {
        -0.5 * (b as f64 - root)
    } else {
        -0.5 * (b as f64 + root)
    };

    let (t0, t1) = if q == 0.0 {
        // b == 0 and c == 0: both roots at zero
        (0.0, 0.0)
    } else {
        ((q / a as f64) as f32, (c as f64 / q) as f32)
    };

    if t0 <= t1 {
        Some((t0, t1))
    } else {
        Some((t1, t0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_roots_sorted() {
        // (t - 15)(t - 25) = t^2 - 40t + 375
        let (t0, t1) = solve_quadratic(1.0, -40.0, 375.0).unwrap();
        assert!((t0 - 15.0).abs() < 1e-4);
        assert!((t1 - 25.0).abs() < 1e-4);
    }

    #[test]
    fn test_negative_discriminant() {
        assert!(solve_quadratic(1.0, 0.0, 1.0).is_none());
    }

    #[test]
    fn test_zero_discriminant() {
        // (t - 2)^2
        let (t0, t1) = solve_quadratic(1.0, -4.0, 4.0).unwrap();
        assert_eq!(t0, t1);
        assert!((t0 - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_degenerate_leading_coefficient() {
        assert!(solve_quadratic(0.0, 1.0, 1.0).is_none());
    }

    #[test]
    fn test_both_roots_zero() {
        assert_eq!(solve_quadratic(2.0, 0.0, 0.0), Some((0.0, 0.0)));
    }
}
