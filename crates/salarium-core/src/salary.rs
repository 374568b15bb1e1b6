/// Multiplier applied when only the lower salary bound is known.
const LOWER_BOUND_FACTOR: f64 = 1.2;

/// Multiplier applied when only the upper salary bound is known.
const UPPER_BOUND_FACTOR: f64 = 0.8;

/// Expected salary for a listing, derived from whatever bounds it advertises.
///
/// Zero and negative bounds count as absent: providers with mandatory
/// numeric salary fields send `0` for "not specified".
pub fn estimate(from: Option<f64>, to: Option<f64>) -> Option<f64> {
    let from = from.filter(|v| *v > 0.0);
    let to = to.filter(|v| *v > 0.0);

    match (from, to) {
        (Some(from), Some(to)) => Some((from + to) / 2.0),
        (Some(from), None) => Some(from * LOWER_BOUND_FACTOR),
        (None, Some(to)) => Some(to * UPPER_BOUND_FACTOR),
        (None, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_bounds_average() {
        assert_eq!(estimate(Some(30_000.0), Some(50_000.0)), Some(40_000.0));
    }

    #[test]
    fn test_lower_bound_only() {
        assert_eq!(estimate(Some(100_000.0), None), Some(100_000.0 * 1.2));
    }

    #[test]
    fn test_upper_bound_only() {
        assert_eq!(estimate(None, Some(100_000.0)), Some(100_000.0 * 0.8));
    }

    #[test]
    fn test_no_bounds() {
        assert_eq!(estimate(None, None), None);
    }

    #[test]
    fn test_zero_means_unspecified() {
        assert_eq!(estimate(Some(0.0), Some(0.0)), None);
        assert_eq!(estimate(Some(0.0), Some(50_000.0)), Some(50_000.0 * 0.8));
        assert_eq!(estimate(Some(60_000.0), Some(0.0)), Some(60_000.0 * 1.2));
        assert_eq!(estimate(Some(-1.0), None), None);
    }
}
