//! The two number implementations the standard plugin registers.

use abacus_eval::{EvalResult, NumberImplementation, Reducer};
use abacus_number::{FastDecimal, Number, NumberKind, PreciseDecimal};
use tracing::debug;

use crate::elementary::{int, sqrt};

pub const NAIVE: &str = "naive";
pub const PRECISE: &str = "precise";

/// Doubles; promotes to [`PRECISE`].
pub fn naive() -> NumberImplementation {
    NumberImplementation::new(NumberKind::Fast, 0, naive_pi).with_promotion(PRECISE, to_precise)
}

/// Arbitrary-precision decimals.
pub fn precise() -> NumberImplementation {
    NumberImplementation::new(NumberKind::Precise, 1, chudnovsky_pi)
}

fn naive_pi(_: &Reducer<'_>) -> EvalResult {
    Ok(Number::Fast(FastDecimal(std::f64::consts::PI)))
}

fn to_precise(n: &Number) -> EvalResult {
    match n {
        Number::Fast(f) => PreciseDecimal::from_f64(f.value()).map(Number::Precise),
        Number::Precise(_) => Ok(n.clone()),
    }
}

/// Pi by the Chudnovsky series, one term per ~14 digits.
///
/// ```text
/// pi = 426880 * sqrt(10005) / sum_k M_k * L_k / X_k
/// ```
fn chudnovsky_pi(r: &Reducer<'_>) -> EvalResult {
    let kind = NumberKind::Precise;
    let n = |v: i64| int(kind, v);

    let c = sqrt(r, &n(10_005))?.mul(&n(426_880))?;
    let terms = i64::from(c.max_precision() / 13 + 1);

    let l_step = n(545_140_134);
    let x_step = n(-262_537_412_640_768_000);
    let mut m = n(1);
    let mut l = n(13_591_409);
    let mut x = n(1);
    let mut sum = l.clone();
    for i in 0..terms {
        r.check_cancelled()?;
        m = m
            .mul(&n(12 * i + 2))?
            .mul(&n(12 * i + 6))?
            .mul(&n(12 * i + 10))?
            .div(&n((i + 1).pow(3)))?;
        l = l.add(&l_step)?;
        x = x.mul(&x_step)?;
        sum = sum.add(&m.mul(&l)?.div(&x)?)?;
    }
    debug!(terms, "computed pi");
    c.div(&sum)
}
