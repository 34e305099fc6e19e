//! Exponential, logarithm and powers.
//!
//! Every series here stops once the next term is no larger than the
//! argument's `max_error()`, so one implementation serves both
//! representations and each gets the accuracy it declares. Running powers
//! are [`trimmed`](Number::trimmed) so exact precise products stay bounded.

use std::cmp::Ordering;

use abacus_diagnostic::{domain_error, AbacusResult};
use abacus_eval::{EvalResult, Reducer};
use abacus_number::{Number, NumberKind};
use tracing::trace;

#[inline]
pub(crate) fn int(kind: NumberKind, n: i64) -> Number {
    Number::from_i64(kind, n)
}

/// `a > b`.
#[inline]
pub(crate) fn exceeds(a: &Number, b: &Number) -> AbacusResult<bool> {
    Ok(a.compare(b)? == Ordering::Greater)
}

/// `a >= b`.
#[inline]
pub(crate) fn at_least(a: &Number, b: &Number) -> AbacusResult<bool> {
    Ok(a.compare(b)? != Ordering::Less)
}

/// `e^x`.
///
/// Negative arguments go through `1 / e^-x`, and a positive argument is
/// halved `k` times until it is at most 1, summed, then squared `k` times.
/// A fast result that leaves the `f64` range is a domain failure rather
/// than infinity; its reciprocal underflows to zero.
pub fn exp(r: &Reducer<'_>, x: &Number) -> EvalResult {
    let kind = x.kind();
    if x.signum() < 0 {
        return match exp_non_negative(r, &x.neg())? {
            Some(large) => int(kind, 1).div(&large),
            None => Ok(Number::zero(kind)),
        };
    }
    exp_non_negative(r, x)?.ok_or_else(|| domain_error("exp", format!("e^{x} overflows")))
}

/// `None` when the result does not fit the representation.
fn exp_non_negative(r: &Reducer<'_>, x: &Number) -> AbacusResult<Option<Number>> {
    let kind = x.kind();
    let one = int(kind, 1);
    let two = int(kind, 2);
    let mut reduced = x.clone();
    let mut halvings: u32 = 0;
    while exceeds(&reduced, &one)? {
        r.check_cancelled()?;
        reduced = reduced.div(&two)?;
        halvings += 1;
    }

    let mut result = exp_series(r, &reduced)?;
    for _ in 0..halvings {
        r.check_cancelled()?;
        result = result.mul(&result)?.trimmed();
        if !result.is_finite() {
            return Ok(None);
        }
    }
    trace!(halvings, "exp squared back");
    Ok(Some(result))
}

/// Maclaurin series for `0 <= x <= 1`, summed until
/// `x^(n+1) * 3 <= max_error * (n+1)!`, which bounds the remainder.
fn exp_series(r: &Reducer<'_>, x: &Number) -> EvalResult {
    let kind = x.kind();
    let mut sum = int(kind, 1);
    let mut numerator = x.clone();
    let mut left = x.mul(&int(kind, 3))?;
    let mut right = x.max_error();
    let mut n: u64 = 0;
    loop {
        r.check_cancelled()?;
        sum = sum.add(&numerator.div(&r.factorial(kind, n + 1)?)?)?;
        n += 1;
        numerator = numerator.mul(x)?.trimmed();
        left = left.mul(x)?.trimmed();
        right = right.mul(&int(kind, i64::try_from(n + 1).unwrap_or(i64::MAX)))?.trimmed();
        if !exceeds(&left, &right)? {
            break;
        }
    }
    trace!(terms = n, "exp series");
    Ok(sum)
}

/// Natural logarithm.
///
/// Halves or doubles the argument until it is within 0.1 of 1 (or would
/// cross 1), then adds `ln 2` times the number of halvings to the series
/// for `ln(1 + u)` at the reduced point.
pub fn ln(r: &Reducer<'_>, x: &Number) -> EvalResult {
    let kind = x.kind();
    if x.signum() <= 0 {
        return Err(domain_error("ln", "argument must be positive"));
    }
    let one = int(kind, 1);
    let two = int(kind, 2);
    let tenth = Number::parse(kind, "0.1")?;

    let mut value = x.clone();
    let mut halvings: i64 = 0;
    while at_least(&value.sub(&one)?.abs(), &tenth)? {
        r.check_cancelled()?;
        if value.sub(&one)?.signum() > 0 {
            value = value.div(&two)?;
            halvings += 1;
            if value.sub(&one)?.signum() <= 0 {
                break;
            }
        } else {
            value = value.mul(&two)?;
            halvings -= 1;
            if value.sub(&one)?.signum() >= 0 {
                break;
            }
        }
    }

    let series = ln_near_one(r, &value)?;
    if halvings == 0 {
        return Ok(series);
    }
    ln2(r, kind)?.mul(&int(kind, halvings))?.add(&series)
}

/// Taylor series for `ln(x)` around 1. Converges for `0 < x < 2`.
fn ln_near_one(r: &Reducer<'_>, x: &Number) -> EvalResult {
    let kind = x.kind();
    let max_error = x.max_error();
    let u = x.sub(&int(kind, 1))?;
    let mut numerator = u.clone();
    let mut term = u.clone();
    let mut sum = u.clone();
    let mut n: i64 = 1;
    while exceeds(&term.abs(), &max_error)? {
        r.check_cancelled()?;
        n += 1;
        numerator = numerator.mul(&u)?.neg().trimmed();
        term = numerator.div(&int(kind, n))?;
        sum = sum.add(&term)?;
    }
    trace!(terms = n, "ln series");
    Ok(sum)
}

/// `ln 2` for `kind`, computed once per loaded configuration.
///
/// Uses `ln 2 = sum over n >= 1 of (3^-n + 4^-n) / n`; `3^-n` bounds the tail.
pub fn ln2(r: &Reducer<'_>, kind: NumberKind) -> EvalResult {
    r.registry().memoize("ln2", kind, || {
        let one = int(kind, 1);
        let three = int(kind, 3);
        let four = int(kind, 4);
        let max_error = one.max_error();
        let mut a = one.clone();
        let mut b = one.clone();
        let mut sum = Number::zero(kind);
        let mut n: i64 = 0;
        while exceeds(&a, &max_error)? {
            r.check_cancelled()?;
            n += 1;
            a = a.div(&three)?;
            b = b.div(&four)?;
            let c = one.div(&int(kind, n))?;
            sum = sum.add(&a.add(&b)?.mul(&c)?)?;
        }
        Ok(sum)
    })
}

/// `base ^ exponent`.
///
/// `0^0` and a negative base under a non-integral exponent are domain
/// failures. Integral exponents and integral bases with `|exponent| >= 1`
/// use exact integer powers for the whole part; the rest goes through
/// `exp(ln|base| * exponent)`.
pub fn power(r: &Reducer<'_>, base: &Number, exponent: &Number) -> EvalResult {
    let kind = base.kind();
    if base.is_zero() && exponent.is_zero() {
        return Err(domain_error("^", "0^0 is undefined"));
    }
    if base.signum() < 0 && !exponent.is_integer() {
        return Err(domain_error(
            "^",
            "a negative base needs an integral exponent",
        ));
    }
    if base.is_zero() {
        return Ok(Number::zero(kind));
    }
    if exponent.is_zero() {
        return Ok(int(kind, 1));
    }

    let one = int(kind, 1);
    let magnitude = exponent.abs();
    let in_range = at_least(&magnitude, &one)?
        && exceeds(&int(kind, i64::from(i32::MAX)), &magnitude)?;
    if in_range && (exponent.is_integer() || base.is_integer()) {
        let whole = exponent
            .floor()
            .to_i64()
            .ok_or_else(|| domain_error("^", "exponent is out of range"))?;
        let rest = power(r, base, &exponent.fractional_part())?;
        return base.int_pow(whole)?.mul(&rest);
    }

    let result = exp(r, &ln(r, &base.abs())?.mul(exponent)?)?;
    // only integral exponents reach here with a negative base
    if base.signum() < 0 && !exponent.div(&int(kind, 2))?.is_integer() {
        Ok(result.neg())
    } else {
        Ok(result)
    }
}

pub fn sqrt(r: &Reducer<'_>, x: &Number) -> EvalResult {
    if x.signum() < 0 {
        return Err(domain_error("sqrt", "argument must not be negative"));
    }
    power(r, x, &Number::parse(x.kind(), "0.5")?)
}

#[cfg(test)]
mod tests;
