//! Trigonometric functions and their inverses, in radians.
//!
//! `sin` is the only series on the forward side; the other five are
//! identities over it. `arcsin` and `arctan` each have a series of their own
//! with argument reductions that keep it converging quickly.

use std::cmp::Ordering;

use abacus_diagnostic::domain_error;
use abacus_eval::{EvalResult, Reducer};
use abacus_number::Number;

use crate::elementary::{at_least, exceeds, int, sqrt};

fn half_pi(r: &Reducer<'_>, x: &Number) -> EvalResult {
    r.pi(x.kind())?.div(&int(x.kind(), 2))
}

/// `phi` moved into `[0, 2pi)`.
fn small_angle(phi: &Number, pi: &Number) -> EvalResult {
    let two_pi = pi.mul(&int(phi.kind(), 2))?;
    let magnitude = phi.abs();
    let turns = magnitude.div(&two_pi)?.floor();
    let theta = magnitude.sub(&two_pi.mul(&turns)?)?;
    if phi.signum() < 0 {
        two_pi.sub(&theta)
    } else {
        Ok(theta)
    }
}

/// Maclaurin series for sine; expects `|x| <= pi/2`.
fn sin_series(r: &Reducer<'_>, x: &Number) -> EvalResult {
    let kind = x.kind();
    let max_error = x.max_error();
    let multiplier = x.mul(x)?.neg();
    let mut power = x.clone();
    let mut sum = x.clone();
    let mut n: u64 = 1;
    loop {
        r.check_cancelled()?;
        n += 2;
        power = power.mul(&multiplier)?.trimmed();
        let term = power.div(&r.factorial(kind, n)?)?;
        sum = sum.add(&term)?;
        if !exceeds(&term.abs(), &max_error)? {
            return Ok(sum);
        }
    }
}

pub fn sin(r: &Reducer<'_>, x: &Number) -> EvalResult {
    let kind = x.kind();
    let pi = r.pi(kind)?;
    let mut theta = small_angle(x, &pi)?;
    if at_least(&theta, &pi.mul(&Number::parse(kind, "1.5")?)?)? {
        theta = theta.sub(&pi.mul(&int(kind, 2))?)?;
    } else if exceeds(&theta, &pi.div(&int(kind, 2))?)? {
        theta = pi.sub(&theta)?;
    }
    sin_series(r, &theta)
}

pub fn cos(r: &Reducer<'_>, x: &Number) -> EvalResult {
    sin(r, &half_pi(r, x)?.sub(x)?)
}

pub fn tan(r: &Reducer<'_>, x: &Number) -> EvalResult {
    sin(r, x)?.div(&cos(r, x)?)
}

pub fn sec(r: &Reducer<'_>, x: &Number) -> EvalResult {
    int(x.kind(), 1).div(&cos(r, x)?)
}

pub fn csc(r: &Reducer<'_>, x: &Number) -> EvalResult {
    int(x.kind(), 1).div(&sin(r, x)?)
}

pub fn cot(r: &Reducer<'_>, x: &Number) -> EvalResult {
    cos(r, x)?.div(&sin(r, x)?)
}

/// Whether `|x| <= 1`.
pub(crate) fn within_unit(x: &Number) -> bool {
    !matches!(x.abs().compare(&int(x.kind(), 1)), Ok(Ordering::Greater) | Err(_))
}

/// Whether `|x| >= 1`.
pub(crate) fn outside_unit(x: &Number) -> bool {
    matches!(
        x.abs().compare(&int(x.kind(), 1)),
        Ok(Ordering::Greater | Ordering::Equal)
    )
}

/// Arcsine in `[-pi/2, pi/2]`.
///
/// Near `|x| = 1` the series converges slowly, so from `|x| >= 0.8` on this
/// uses `pi/2 - arcsin(sqrt(1 - x^2))` with the sign of `x`.
pub fn arcsin(r: &Reducer<'_>, x: &Number) -> EvalResult {
    let kind = x.kind();
    if !within_unit(x) {
        return Err(domain_error("arcsin", "argument must be within [-1, 1]"));
    }
    let one = int(kind, 1);
    if at_least(&x.abs(), &Number::parse(kind, "0.8")?)? {
        let complement = sqrt(r, &one.sub(&x.mul(x)?)?)?;
        return half_pi(r, x)?
            .sub(&arcsin(r, &complement)?)?
            .mul(&int(kind, i64::from(x.signum())));
    }

    let multiplier = x.mul(x)?;
    let bound = x.max_error().mul(&one.sub(&multiplier)?)?;
    let mut term = x.clone();
    let mut sum = x.clone();
    let mut power = x.clone();
    let mut coefficient = one;
    let mut exponent: i64 = 1;
    while exceeds(&term.abs(), &bound)? {
        r.check_cancelled()?;
        exponent += 2;
        power = power.mul(&multiplier)?.trimmed();
        coefficient = coefficient
            .mul(&int(kind, exponent - 2))?
            .div(&int(kind, exponent - 1))?;
        term = power.mul(&coefficient)?.div(&int(kind, exponent))?;
        sum = sum.add(&term)?;
    }
    Ok(sum)
}

pub fn arccos(r: &Reducer<'_>, x: &Number) -> EvalResult {
    if !within_unit(x) {
        return Err(domain_error("arccos", "argument must be within [-1, 1]"));
    }
    half_pi(r, x)?.sub(&arcsin(r, x)?)
}

pub fn arcsec(r: &Reducer<'_>, x: &Number) -> EvalResult {
    if !outside_unit(x) {
        return Err(domain_error("arcsec", "argument must satisfy |x| >= 1"));
    }
    arccos(r, &int(x.kind(), 1).div(x)?)
}

pub fn arccsc(r: &Reducer<'_>, x: &Number) -> EvalResult {
    if !outside_unit(x) {
        return Err(domain_error("arccsc", "argument must satisfy |x| >= 1"));
    }
    arcsin(r, &int(x.kind(), 1).div(x)?)
}

/// Arctangent in `(-pi/2, pi/2)`.
///
/// Negative arguments use odd symmetry, `x > 1` uses `pi/2 - arctan(1/x)`,
/// and `0.9 <= x < 1` doubles the angle so the series only ever sees small
/// arguments.
pub fn arctan(r: &Reducer<'_>, x: &Number) -> EvalResult {
    let kind = x.kind();
    if x.signum() < 0 {
        return Ok(arctan(r, &x.neg())?.neg());
    }
    let one = int(kind, 1);
    match x.compare(&one)? {
        Ordering::Greater => return half_pi(r, x)?.sub(&arctan(r, &one.div(x)?)?),
        Ordering::Equal => return r.pi(kind)?.div(&int(kind, 4)),
        Ordering::Less => {}
    }
    if at_least(x, &Number::parse(kind, "0.9")?)? {
        let doubled = x.mul(&int(kind, 2))?.div(&one.sub(&x.mul(x)?)?)?;
        return arctan(r, &doubled)?.div(&int(kind, 2));
    }

    let max_error = x.max_error();
    let multiplier = x.mul(x)?.neg();
    let mut power = x.clone();
    let mut term = x.clone();
    let mut sum = x.clone();
    let mut n: i64 = 1;
    while exceeds(&term.abs(), &max_error)? {
        r.check_cancelled()?;
        n += 2;
        power = power.mul(&multiplier)?.trimmed();
        term = power.div(&int(kind, n))?;
        sum = sum.add(&term)?;
    }
    Ok(sum)
}

/// Arccotangent in `(0, pi)`.
pub fn arccot(r: &Reducer<'_>, x: &Number) -> EvalResult {
    half_pi(r, x)?.sub(&arctan(r, x)?)
}
