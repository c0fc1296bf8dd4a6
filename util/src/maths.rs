//! Utility maths functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use num_traits::Float;

/// Return the sign of a value as -1, 0 or +1.
///
/// Unlike `Float::signum` zero (of either sign) maps to zero, so terms
/// scaled by the sign vanish at rest rather than jumping to +/-1. NaN is
/// passed through.
pub fn sign_or_zero<T>(value: T) -> T
where
    T: Float
{
    if value.is_nan() {
        value
    }
    else if value == T::zero() {
        T::zero()
    }
    else {
        value.signum()
    }
}

/// Root mean square of a sum of squares over `count` samples.
///
/// Returns zero when there are no samples.
pub fn rms_from_sum_sq<T>(sum_sq: T, count: usize) -> T
where
    T: Float
{
    match T::from(count) {
        Some(n) if count > 0 => (sum_sq / n).sqrt(),
        _ => T::zero()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_sign_or_zero() {
        assert_eq!(sign_or_zero(3.2f64), 1.0);
        assert_eq!(sign_or_zero(-0.01f64), -1.0);
        assert_eq!(sign_or_zero(0.0f64), 0.0);
        assert_eq!(sign_or_zero(-0.0f64), 0.0);
        assert!(sign_or_zero(f64::NAN).is_nan());
        assert_eq!(sign_or_zero(f64::INFINITY), 1.0);
    }

    #[test]
    fn test_rms_from_sum_sq() {
        // Samples [3, -3, 3, -3]
        assert_eq!(rms_from_sum_sq(36.0f64, 4), 3.0);
        assert_eq!(rms_from_sum_sq(0.0f64, 0), 0.0);
    }
}
