//! Missing-value sentinels.

/// Bit pattern of R's `NA_real_`: a NaN whose low word is 1954.
const NA_REAL_BITS: u64 = 0x7FF0_0000_0000_07A2;
const NA_PAYLOAD: u64 = 1954;

/// Missing integer.
pub const NA_INTEGER: i64 = i64::MIN;

/// The numeric `NA`.
#[inline]
pub fn na_real() -> f64 {
    f64::from_bits(NA_REAL_BITS)
}

/// `NA` is a NaN, but not every NaN is `NA`.
#[inline]
pub fn is_na_real(x: f64) -> bool {
    x.is_nan() && (x.to_bits() & 0xFFFF_FFFF) == NA_PAYLOAD
}
