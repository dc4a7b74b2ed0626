//! Range checks for fixed-width integer encodings

/// Whether a candidate is checked against the signed or unsigned range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Signedness {
    /// Two's complement range, candidate must be integral
    #[default]
    Signed,
    /// Zero up to the width's maximum
    Unsigned,
}

fn in_range(value: f64, signedness: Signedness, signed: (f64, f64), unsigned_max: f64) -> bool {
    match signedness {
        // NaN fails both comparisons
        Signedness::Unsigned => 0.0 <= value && value <= unsigned_max,
        Signedness::Signed => value.fract() == 0.0 && signed.0 <= value && value <= signed.1,
    }
}

/// Check whether `value` fits an 8-bit integer
pub fn is_byte(value: f64, signedness: Signedness) -> bool {
    in_range(value, signedness, (i8::MIN as f64, i8::MAX as f64), u8::MAX as f64)
}

/// Check whether `value` fits a 16-bit integer
pub fn is_short(value: f64, signedness: Signedness) -> bool {
    in_range(value, signedness, (i16::MIN as f64, i16::MAX as f64), u16::MAX as f64)
}

/// Check whether `value` fits a 32-bit integer
pub fn is_int(value: f64, signedness: Signedness) -> bool {
    in_range(value, signedness, (i32::MIN as f64, i32::MAX as f64), u32::MAX as f64)
}

/// Check whether `value` fits a 64-bit integer
///
/// Takes an `i128` because neither `i64` nor `u64` can hold every candidate
/// that has to be rejected.
pub fn is_long(value: i128, signedness: Signedness) -> bool {
    match signedness {
        Signedness::Unsigned => (0..=u64::MAX as i128).contains(&value),
        Signedness::Signed => (i64::MIN as i128..=i64::MAX as i128).contains(&value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Signedness::{Signed, Unsigned};

    #[test]
    fn test_byte_bounds() {
        assert!(is_byte(127.0, Signed));
        assert!(is_byte(-128.0, Signed));
        assert!(!is_byte(128.0, Signed));
        assert!(!is_byte(-129.0, Signed));
        assert!(is_byte(255.0, Unsigned));
        assert!(!is_byte(256.0, Unsigned));
        assert!(!is_byte(-1.0, Unsigned));
    }

    #[test]
    fn test_signed_rejects_fractions() {
        assert!(!is_byte(1.5, Signed));
        assert!(!is_short(-0.25, Signed));
        assert!(!is_int(2.000001, Signed));
        assert!(is_int(-0.0, Signed));
    }

    #[test]
    fn test_nan_and_infinity_rejected() {
        for mode in [Signed, Unsigned] {
            assert!(!is_byte(f64::NAN, mode));
            assert!(!is_short(f64::INFINITY, mode));
            assert!(!is_int(f64::NEG_INFINITY, mode));
        }
    }

    #[test]
    fn test_short_and_int_bounds() {
        assert!(is_short(32767.0, Signed));
        assert!(!is_short(32768.0, Signed));
        assert!(is_short(65535.0, Unsigned));
        assert!(!is_short(65536.0, Unsigned));

        assert!(is_int(-2147483648.0, Signed));
        assert!(!is_int(2147483648.0, Signed));
        assert!(is_int(4294967295.0, Unsigned));
        assert!(!is_int(4294967296.0, Unsigned));
    }

    #[test]
    fn test_long_bounds() {
        assert!(is_long(i64::MAX as i128, Signed));
        assert!(is_long(i64::MIN as i128, Signed));
        assert!(!is_long(i64::MAX as i128 + 1, Signed));
        assert!(!is_long(i64::MIN as i128 - 1, Signed));
        assert!(is_long(u64::MAX as i128, Unsigned));
        assert!(!is_long(u64::MAX as i128 + 1, Unsigned));
        assert!(!is_long(-1, Unsigned));
    }
}
