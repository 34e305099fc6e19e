use abacus_diagnostic::ErrorKind;
use abacus_number::NumberKind::{self, Fast, Precise};
use pretty_assertions::assert_eq;

use super::{exp, ln, ln2, power, sqrt};
use crate::test_support::{assert_close, assert_digits, n, with_reducer};

fn kind_of(result: abacus_eval::EvalResult) -> Result<(), ErrorKind> {
    result.map(|_| ()).map_err(|e| e.kind())
}

fn pow(kind: NumberKind, base: &str, exponent: &str) -> abacus_eval::EvalResult {
    with_reducer(kind, |r| power(r, &n(kind, base), &n(kind, exponent)))
}

// === exp ===

#[test]
fn exp_of_zero_is_one() {
    for kind in [Fast, Precise] {
        let one = with_reducer(kind, |r| exp(r, &n(kind, "0")));
        assert_eq!(one.map(|v| v.to_string()), Ok("1".to_string()));
    }
}

#[test]
fn exp_fast() {
    assert_close(&with_reducer(Fast, |r| exp(r, &n(Fast, "1"))), std::f64::consts::E, 1e-12);
    assert_close(&with_reducer(Fast, |r| exp(r, &n(Fast, "-1"))), (-1f64).exp(), 1e-12);
    assert_close(&with_reducer(Fast, |r| exp(r, &n(Fast, "5.5"))), 5.5f64.exp(), 1e-9);
}

#[test]
fn exp_fast_large_arguments_stay_finite() {
    for x in [50f64, 70.0, 100.0, 700.0] {
        let result = with_reducer(Fast, |r| exp(r, &n(Fast, &x.to_string())));
        assert_close(&result, x.exp(), x.exp() * 1e-11);
    }
    let tiny = with_reducer(Fast, |r| exp(r, &n(Fast, "-100")));
    assert_close(&tiny, (-100f64).exp(), 1e-55);
}

#[test]
fn exp_fast_overflow_is_a_domain_failure() {
    let result = with_reducer(Fast, |r| exp(r, &n(Fast, "1000")));
    assert_eq!(kind_of(result), Err(ErrorKind::Domain));
    let underflow = with_reducer(Fast, |r| exp(r, &n(Fast, "-1000")));
    assert_eq!(underflow.map(|v| v.is_zero()), Ok(true));
}

#[test]
fn exp_precise_large_argument() {
    let e100 = with_reducer(Precise, |r| exp(r, &n(Precise, "100")));
    assert_digits(&e100, "26881171418161354484126255515800135873611118.77374");
}

#[test]
fn exp_precise_digits() {
    let e = with_reducer(Precise, |r| exp(r, &n(Precise, "1")));
    assert_digits(&e, "2.718281828459045235360287471352662497757");
}

// === ln ===

#[test]
fn ln_rejects_non_positive() {
    for text in ["0", "-1"] {
        for kind in [Fast, Precise] {
            let result = with_reducer(kind, |r| ln(r, &n(kind, text)));
            assert_eq!(kind_of(result), Err(ErrorKind::Domain));
        }
    }
}

#[test]
fn ln_of_one_is_zero() {
    let zero = with_reducer(Precise, |r| ln(r, &n(Precise, "1")));
    assert_eq!(zero.map(|v| v.is_zero()), Ok(true));
}

#[test]
fn ln_fast_across_magnitudes() {
    for x in [0.001f64, 0.5, 0.95, 1.05, 1.5, 10.0, 1e6] {
        let result = with_reducer(Fast, |r| ln(r, &n(Fast, &x.to_string())));
        assert_close(&result, x.ln(), 1e-12);
    }
}

#[test]
fn ln2_is_within_its_declared_error() {
    let truth = n(
        Precise,
        "0.6931471805599453094172321214581765680755001343602552541206800094933936",
    );
    let computed = with_reducer(Precise, |r| ln2(r, Precise)).unwrap_or_else(|e| panic!("{e}"));
    let error = computed.sub(&truth).unwrap_or_else(|e| panic!("{e}")).abs();
    assert_eq!(
        error.compare(&computed.max_error()).map(|o| o.is_le()),
        Ok(true),
        "error {error} against {}",
        computed.max_error()
    );
}

#[test]
fn ln_precise_digits() {
    let result = with_reducer(Precise, |r| ln(r, &n(Precise, "2")));
    assert_digits(&result, "0.6931471805599453094172321214581765680755");
    let result = with_reducer(Precise, |r| ln(r, &n(Precise, "10")));
    assert_digits(&result, "2.302585092994045684017991454684364207601");
}

#[test]
fn ln2_is_memoized() {
    with_reducer(Fast, |r| {
        let first = ln2(r, Fast);
        r.token().cancel();
        // a cache hit never reaches the cancellation check
        assert_eq!(ln2(r, Fast), first);
    });
}

// === power ===

#[test]
fn power_fast_large_fractional_exponent() {
    let expected = 1.5f64.powf(200.5);
    assert_close(&pow(Fast, "1.5", "200.5"), expected, expected * 1e-11);
}

#[test]
fn power_edge_cases() {
    assert_eq!(kind_of(pow(Precise, "0", "0")), Err(ErrorKind::Domain));
    assert_eq!(kind_of(pow(Precise, "-8", "0.5")), Err(ErrorKind::Domain));
    assert_eq!(pow(Precise, "0", "5").map(|v| v.to_string()), Ok("0".to_string()));
    assert_eq!(pow(Precise, "5", "0").map(|v| v.to_string()), Ok("1".to_string()));
}

#[test]
fn power_with_integral_exponents_is_exact() {
    assert_eq!(pow(Precise, "2", "10").map(|v| v.to_string()), Ok("1024".to_string()));
    assert_eq!(pow(Precise, "2", "-1").map(|v| v.to_string()), Ok("0.5".to_string()));
    assert_eq!(pow(Precise, "-2", "3").map(|v| v.to_string()), Ok("-8".to_string()));
    assert_eq!(pow(Precise, "-1.5", "3").map(|v| v.to_string()), Ok("-3.375".to_string()));
}

#[test]
fn power_with_fractional_exponents() {
    assert_close(&pow(Fast, "2", "0.5"), std::f64::consts::SQRT_2, 1e-12);
    assert_close(&pow(Fast, "4", "1.5"), 8.0, 1e-10);
    assert_close(&pow(Fast, "2", "-1.5"), 2f64.powf(-1.5), 1e-12);
    assert_close(&pow(Fast, "2.5", "2.5"), 2.5f64.powf(2.5), 1e-10);
}

// === sqrt ===

#[test]
fn sqrt_two_precise() {
    let result = with_reducer(Precise, |r| sqrt(r, &n(Precise, "2")));
    assert_digits(&result, "1.4142135623730950488016887242096980785696");
}

#[test]
fn sqrt_domain() {
    let negative = with_reducer(Fast, |r| sqrt(r, &n(Fast, "-1")));
    assert_eq!(kind_of(negative), Err(ErrorKind::Domain));
    let zero = with_reducer(Fast, |r| sqrt(r, &n(Fast, "0")));
    assert_eq!(zero.map(|v| v.is_zero()), Ok(true));
}

// === Cancellation ===

#[test]
fn series_observe_cancellation() {
    with_reducer(Precise, |r| {
        r.token().cancel();
        assert!(exp(r, &n(Precise, "1")).is_err_and(|e| e.is_cancelled()));
        assert!(ln(r, &n(Precise, "1.05")).is_err_and(|e| e.is_cancelled()));
    });
}

mod proptest_elementary {
    use proptest::prelude::*;

    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn exp_inverts_ln(x in 0.01f64..100.0) {
            let text = format!("{x:.6}");
            let value: f64 = text.parse().unwrap_or(1.0);
            let back = with_reducer(Fast, |r| {
                ln(r, &n(Fast, &text)).and_then(|l| exp(r, &l))
            });
            let back = back.map(|v| v.to_f64()).unwrap_or(f64::NAN);
            prop_assert!((back - value).abs() <= value * 1e-9, "{back} vs {value}");
        }
    }
}
