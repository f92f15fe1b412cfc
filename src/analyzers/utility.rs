/// Computes the arithmetic mean of a slice of values. Returns 0.0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Rounds to one decimal digit, ties to even.
///
/// Ties are judged on the exact binary value: 4.25 is exact and rounds to
/// 4.2, while 4.35 is stored as 4.3499.. and rounds to 4.3. Relies on `{:.1}`
/// being correctly rounded, which `(x * 10.0).round()` is not.
pub fn round_to_tenth(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{value:.1}").parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[5.0, 4.0]), 4.5);
        assert_eq!(mean(&[3.0, 3.0]), 3.0);
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_round_ties_to_even() {
        assert_eq!(round_to_tenth(4.25), 4.2);
        assert_eq!(round_to_tenth(4.75), 4.8);
        assert_eq!(round_to_tenth(0.25), 0.2);
    }

    #[test]
    fn test_round_uses_binary_value() {
        // 4.35 and 4.45 are not representable; they sit below and above the tie.
        assert_eq!(round_to_tenth(4.35), 4.3);
        assert_eq!(round_to_tenth(4.45), 4.5);
    }

    #[test]
    fn test_round_is_idempotent() {
        for v in [3.0, 4.5, 2.5, 0.1, 9.9] {
            assert_eq!(round_to_tenth(v), v);
            assert_eq!(round_to_tenth(round_to_tenth(v)), round_to_tenth(v));
        }
    }

    #[test]
    fn test_round_regular_values() {
        assert_eq!(round_to_tenth(10.0 / 3.0), 3.3);
        assert_eq!(round_to_tenth(11.0 / 3.0), 3.7);
        assert_eq!(round_to_tenth(-1.26), -1.3);
    }
}
