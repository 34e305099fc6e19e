//! Double-backed numbers.

use std::cmp::Ordering;
use std::fmt;

use abacus_diagnostic::{division_by_zero, AbacusResult};

/// Significant digits the fast representation claims to carry.
pub const FAST_MAX_PRECISION: u32 = 18;

/// Series-termination threshold for the fast representation.
pub const FAST_MAX_ERROR: f64 = 1e-18;

/// Decimal places kept when rendering.
const DISPLAY_PLACES: i32 = 10;

#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct FastDecimal(pub f64);

impl FastDecimal {
    pub const ZERO: FastDecimal = FastDecimal(0.0);
    pub const ONE: FastDecimal = FastDecimal(1.0);

    /// Parse validated literal text.
    pub(crate) fn parse(text: &str) -> Option<Self> {
        text.parse::<f64>().ok().map(FastDecimal)
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }

    pub fn add(self, other: Self) -> Self {
        FastDecimal(self.0 + other.0)
    }

    pub fn sub(self, other: Self) -> Self {
        FastDecimal(self.0 - other.0)
    }

    pub fn mul(self, other: Self) -> Self {
        FastDecimal(self.0 * other.0)
    }

    pub fn div(self, other: Self) -> AbacusResult<Self> {
        if other.0 == 0.0 {
            return Err(division_by_zero());
        }
        Ok(FastDecimal(self.0 / other.0))
    }

    pub fn neg(self) -> Self {
        FastDecimal(-self.0)
    }

    pub fn int_pow(self, exponent: i64) -> AbacusResult<Self> {
        if exponent < 0 && self.0 == 0.0 {
            return Err(division_by_zero());
        }
        let value = match i32::try_from(exponent) {
            Ok(e) => self.0.powi(e),
            Err(_) => self.0.powf(exponent as f64),
        };
        Ok(FastDecimal(value))
    }

    pub fn signum(self) -> i32 {
        match self.0.partial_cmp(&0.0) {
            Some(Ordering::Greater) => 1,
            Some(Ordering::Less) => -1,
            _ => 0,
        }
    }

    pub fn compare(self, other: Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }

    pub fn floor(self) -> Self {
        FastDecimal(self.0.floor())
    }

    pub fn ceiling(self) -> Self {
        FastDecimal(self.0.ceil())
    }

    pub fn fractional_part(self) -> Self {
        FastDecimal(self.0 - self.0.floor())
    }

    pub fn is_integer(self) -> bool {
        self.0.is_finite() && self.0.fract() == 0.0
    }

    /// Truncates toward zero.
    pub fn to_i64(self) -> Option<i64> {
        let truncated = self.0.trunc();
        if truncated.is_finite() && truncated >= i64::MIN as f64 && truncated <= i64::MAX as f64 {
            Some(truncated as i64)
        } else {
            None
        }
    }
}

impl fmt::Display for FastDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shift = 10f64.powi(DISPLAY_PLACES);
        // beyond 2^53 there are no fractional digits left to round
        let rounded = if self.0.abs() < 9.0e15 {
            (self.0 * shift).round() / shift
        } else {
            self.0
        };
        if rounded == 0.0 {
            // collapses -0
            return f.write_str("0");
        }
        write!(f, "{rounded}")
    }
}
