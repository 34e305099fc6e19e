//! Arbitrary-precision decimals.
//!
//! Addition, subtraction and multiplication are exact. Division rounds to
//! [`INTERNAL_PRECISION`] significant digits (half-up) and then strips
//! trailing zeros down to the natural scale of the operands, so exact
//! quotients such as `9.5 / 2` stay short. Output rounds to
//! [`OUTPUT_PRECISION`] digits; the difference is kept as guard digits so
//! that rounding noise from long series never reaches the printed result.
//!
//! All digit-level work happens on the `(unscaled, scale)` pair, where the
//! value is `unscaled * 10^-scale`.

use std::cmp::Ordering;
use std::fmt;

use abacus_diagnostic::{division_by_zero, domain_error, AbacusResult};
use bigdecimal::num_bigint::BigInt;
use bigdecimal::BigDecimal;

/// Significant digits shown to the user.
pub const OUTPUT_PRECISION: u64 = 50;

/// Extra digits carried internally.
pub const GUARD_DIGITS: u64 = 15;

/// Significant digits kept by division.
pub const INTERNAL_PRECISION: u64 = OUTPUT_PRECISION + GUARD_DIGITS;

/// Working precision for intermediate products in `int_pow`.
const POWER_PRECISION: u64 = INTERNAL_PRECISION + GUARD_DIGITS;

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct PreciseDecimal {
    value: BigDecimal,
}

impl PreciseDecimal {
    pub fn zero() -> Self {
        Self::from_parts(BigInt::from(0), 0)
    }

    pub fn one() -> Self {
        Self::from_parts(BigInt::from(1), 0)
    }

    pub fn from_i64(n: i64) -> Self {
        Self::from_parts(BigInt::from(n), 0)
    }

    fn from_parts(unscaled: BigInt, scale: i64) -> Self {
        PreciseDecimal {
            value: BigDecimal::new(unscaled, scale),
        }
    }

    fn parts(&self) -> (BigInt, i64) {
        self.value.as_bigint_and_exponent()
    }

    /// Parse validated literal text (`-?digits(.digits)?`, either side may be
    /// empty but not both).
    pub(crate) fn parse(text: &str) -> Option<Self> {
        let (negative, body) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text),
        };
        let (whole, fraction) = body.split_once('.').unwrap_or((body, ""));
        let digits = format!("{whole}{fraction}");
        if digits.is_empty() {
            return None;
        }
        let mut unscaled: BigInt = digits.parse().ok()?;
        if negative {
            unscaled = -unscaled;
        }
        let scale = i64::try_from(fraction.len()).ok()?;
        Some(Self::from_parts(unscaled, scale))
    }

    /// Convert a finite double through its shortest round-trip decimal text,
    /// so `0.1` becomes exactly `0.1` rather than its binary expansion.
    pub fn from_f64(value: f64) -> AbacusResult<Self> {
        if !value.is_finite() {
            return Err(domain_error("promotion", format!("{value} is not finite")));
        }
        let text = format!("{value}");
        Self::parse(&text).ok_or_else(|| domain_error("promotion", format!("cannot represent {text}")))
    }

    pub fn add(&self, other: &Self) -> Self {
        PreciseDecimal {
            value: &self.value + &other.value,
        }
    }

    pub fn sub(&self, other: &Self) -> Self {
        PreciseDecimal {
            value: &self.value - &other.value,
        }
    }

    pub fn mul(&self, other: &Self) -> Self {
        PreciseDecimal {
            value: &self.value * &other.value,
        }
    }

    pub fn div(&self, other: &Self) -> AbacusResult<Self> {
        let (a, a_scale) = self.parts();
        let (b, b_scale) = other.parts();
        if b == zero() {
            return Err(division_by_zero());
        }
        let (q, scale) = divide(&a, a_scale, &b, b_scale, INTERNAL_PRECISION);
        Ok(Self::from_parts(q, scale))
    }

    pub fn neg(&self) -> Self {
        let (unscaled, scale) = self.parts();
        Self::from_parts(-unscaled, scale)
    }

    /// `self^exponent` by repeated squaring.
    ///
    /// Products stay exact while they fit in the working precision; larger
    /// intermediates are rounded so huge exponents stay tractable.
    pub fn int_pow(&self, exponent: i64) -> AbacusResult<Self> {
        if exponent == 0 {
            return Ok(Self::one());
        }
        if exponent < 0 && self.signum() == 0 {
            return Err(division_by_zero());
        }
        let mut remaining = exponent.unsigned_abs();
        let (mut base, mut base_scale) = self.parts();
        let mut acc = BigInt::from(1);
        let mut acc_scale = 0i64;
        loop {
            if remaining & 1 == 1 {
                (acc, acc_scale) = round_significant(&acc * &base, acc_scale + base_scale, POWER_PRECISION);
            }
            remaining >>= 1;
            if remaining == 0 {
                break;
            }
            (base, base_scale) = round_significant(&base * &base, base_scale * 2, POWER_PRECISION);
        }
        let power = Self::from_parts(acc, acc_scale);
        if exponent < 0 {
            Self::one().div(&power)
        } else {
            Ok(power)
        }
    }

    pub fn signum(&self) -> i32 {
        match self.parts().0.cmp(&zero()) {
            Ordering::Greater => 1,
            Ordering::Less => -1,
            Ordering::Equal => 0,
        }
    }

    pub fn compare(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }

    pub fn floor(&self) -> Self {
        let (unscaled, scale) = self.parts();
        if scale <= 0 {
            return self.clone();
        }
        let divisor = pow10(scale.unsigned_abs());
        let mut q = &unscaled / &divisor;
        if &unscaled % &divisor < zero() {
            q = q - BigInt::from(1);
        }
        Self::from_parts(q, 0)
    }

    pub fn ceiling(&self) -> Self {
        let (unscaled, scale) = self.parts();
        if scale <= 0 {
            return self.clone();
        }
        let divisor = pow10(scale.unsigned_abs());
        let mut q = &unscaled / &divisor;
        if &unscaled % &divisor > zero() {
            q = q + BigInt::from(1);
        }
        Self::from_parts(q, 0)
    }

    pub fn fractional_part(&self) -> Self {
        self.sub(&self.floor())
    }

    pub fn is_integer(&self) -> bool {
        let (unscaled, scale) = self.parts();
        scale <= 0 || &unscaled % &pow10(scale.unsigned_abs()) == zero()
    }

    /// Truncates toward zero; `None` outside the `i64` range.
    pub fn to_i64(&self) -> Option<i64> {
        let (unscaled, scale) = self.parts();
        if unscaled == zero() {
            return Some(0);
        }
        let whole_digits = digit_count(&unscaled) as i64 - scale;
        if whole_digits > 19 {
            return None;
        }
        let whole = if scale <= 0 {
            unscaled * pow10(scale.unsigned_abs())
        } else {
            &unscaled / &pow10(scale.unsigned_abs())
        };
        i64::try_from(&whole).ok()
    }

    /// Magnitude-relative error bound: one unit in the last place, scaled so
    /// the value carries [`INTERNAL_PRECISION`] significant digits.
    pub fn max_error(&self) -> Self {
        let (unscaled, scale) = self.parts();
        let digits = digit_count(&unscaled) as i64;
        Self::from_parts(BigInt::from(1), scale + INTERNAL_PRECISION as i64 - digits)
    }

    /// Round to `precision` significant digits, half-up.
    pub fn round_to(&self, precision: u64) -> Self {
        let (unscaled, scale) = self.parts();
        let (unscaled, scale) = round_significant(unscaled, scale, precision);
        Self::from_parts(unscaled, scale)
    }

    /// Number of significant digits in the unscaled value.
    pub fn digits(&self) -> u64 {
        digit_count(&self.parts().0)
    }

    pub fn to_f64(&self) -> f64 {
        let (unscaled, scale) = self.parts();
        format!("{unscaled}e{}", -scale).parse().unwrap_or(f64::NAN)
    }
}

impl fmt::Display for PreciseDecimal {
    /// Rounds to the output precision, then renders plain notation unless the
    /// magnitude is below `1E-6` or has more integer digits than the output
    /// precision, in which case it uses `d.dddE±n`. The internal scale does
    /// not matter: `1814400` prints the same whether it is stored as
    /// `1814400` or `18144 * 10^2`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (unscaled, scale) = self.round_to(OUTPUT_PRECISION).parts();
        let text = unscaled.to_string();
        let (sign, digits) = match text.strip_prefix('-') {
            Some(rest) => ("-", rest),
            None => ("", text.as_str()),
        };
        let len = digits.len() as i64;
        let adjusted = len - 1 - scale;
        f.write_str(sign)?;
        if adjusted < -6 || adjusted >= OUTPUT_PRECISION as i64 {
            f.write_str(&digits[..1])?;
            if len > 1 {
                write!(f, ".{}", &digits[1..])?;
            }
            let exp_sign = if adjusted >= 0 { "+" } else { "" };
            write!(f, "E{exp_sign}{adjusted}")
        } else if scale <= 0 {
            if digits == "0" {
                return f.write_str(digits);
            }
            let zeros = "0".repeat(scale.unsigned_abs() as usize);
            write!(f, "{digits}{zeros}")
        } else if len > scale {
            let point = (len - scale) as usize;
            write!(f, "{}.{}", &digits[..point], &digits[point..])
        } else {
            let zeros = "0".repeat((scale - len) as usize);
            write!(f, "0.{zeros}{digits}")
        }
    }
}

fn zero() -> BigInt {
    BigInt::from(0)
}

fn pow10(n: u64) -> BigInt {
    BigInt::from(10).pow(u32::try_from(n).unwrap_or(u32::MAX))
}

fn digit_count(n: &BigInt) -> u64 {
    let text = n.to_string();
    text.trim_start_matches('-').len() as u64
}

/// Round `unscaled * 10^-scale` to `precision` significant digits, half-up
/// (ties away from zero).
fn round_significant(unscaled: BigInt, scale: i64, precision: u64) -> (BigInt, i64) {
    let digits = digit_count(&unscaled);
    if digits <= precision {
        return (unscaled, scale);
    }
    let drop = digits - precision;
    let divisor = pow10(drop);
    let mut q = &unscaled / &divisor;
    let r = &unscaled % &divisor;
    let r = if r < zero() { -r } else { r };
    if r * BigInt::from(2) >= divisor {
        q = if unscaled < zero() {
            q - BigInt::from(1)
        } else {
            q + BigInt::from(1)
        };
    }
    (q, scale - drop as i64)
}

/// `a / b` to `precision` significant digits.
fn divide(a: &BigInt, a_scale: i64, b: &BigInt, b_scale: i64, precision: u64) -> (BigInt, i64) {
    let preferred = a_scale - b_scale;
    if *a == zero() {
        return (zero(), 0);
    }
    // enough extra digits that the truncated quotient has precision + 3 digits
    let shift = (precision as i64 + 3 + digit_count(b) as i64 - digit_count(a) as i64).max(0);
    let numerator = a * pow10(shift.unsigned_abs());
    let q = &numerator / b;
    let (mut q, mut scale) = round_significant(q, preferred + shift, precision);
    let ten = BigInt::from(10);
    while scale > preferred && &q % &ten == zero() {
        q = &q / &ten;
        scale -= 1;
    }
    (q, scale)
}
