//! Golden values and cross-implementation agreement.

use abacus_diagnostic::ErrorKind;
use pretty_assertions::assert_eq;

use crate::common::{eval_err, eval_ok, naive, precise};

// -- Scenarios --

#[test]
fn reference_scenarios() {
    let mut abacus = precise();
    assert_eq!(eval_ok(&mut abacus, "9.5+10"), "19.5");
    assert_eq!(eval_ok(&mut abacus, "7!"), "5040");
    assert_eq!(eval_ok(&mut abacus, "2^-1"), "0.5");
    assert_eq!(eval_err(&mut abacus, "0^0"), ErrorKind::Domain);
    assert_eq!(eval_err(&mut abacus, "ln(-1)"), ErrorKind::Domain);
    let root = eval_ok(&mut abacus, "sqrt2");
    assert!(
        root.starts_with("1.4142135623730950488016887242096980785696"),
        "{root}"
    );
}

#[test]
fn exact_integer_results() {
    let mut abacus = precise();
    assert_eq!(eval_ok(&mut abacus, "2^10"), "1024");
    assert_eq!(eval_ok(&mut abacus, "10nPr3"), "720");
    assert_eq!(eval_ok(&mut abacus, "52nCr5"), "2598960");
    assert_eq!(eval_ok(&mut abacus, "-2^3"), "-8");
    assert_eq!(eval_ok(&mut abacus, "abs(3-10)"), "7");
    assert_eq!(eval_ok(&mut abacus, "10nPr8"), "1814400");
    assert_eq!(eval_ok(&mut abacus, "1814400*1"), "1814400");
    assert_eq!(eval_ok(&mut abacus, "25000*1"), "25000");
}

// -- Agreement between implementations --

#[test]
fn naive_and_precise_agree() {
    let mut fast = naive();
    let mut slow = precise();
    for text in [
        "sin(1)+cos(2)",
        "tan(0.5)*sec(0.5)",
        "exp(1.5)",
        "ln(10)/ln(2)",
        "arctan(3)+arcsin(0.5)",
        "2^0.5",
        "1.5^2.5",
        "sqrt(10)",
        "arccot(-2)",
        "exp(70)",
        "1.5^200.5",
    ] {
        let a = fast.calculate(text).map(|v| v.to_f64());
        let b = slow.calculate(text).map(|v| v.to_f64());
        match (a, b) {
            (Ok(a), Ok(b)) => assert!((a - b).abs() <= 1e-9 * b.abs().max(1.0), "{text}: {a} vs {b}"),
            (a, b) => panic!("{text}: {a:?} vs {b:?}"),
        }
    }
}

#[test]
fn naive_large_exponents_stay_finite() {
    let mut abacus = naive();
    for (text, expected) in [
        ("exp(70)", 70f64.exp()),
        ("exp(-100)", (-100f64).exp()),
        ("1.5^200.5", 1.5f64.powf(200.5)),
    ] {
        let value = abacus.calculate(text).map(|v| v.to_f64());
        match value {
            Ok(v) => assert!((v - expected).abs() <= 1e-11 * expected, "{text}: {v} vs {expected}"),
            Err(e) => panic!("{text}: {e}"),
        }
    }
    assert_eq!(eval_err(&mut abacus, "exp(1000)"), ErrorKind::Domain);
}

// -- Failures --

#[test]
fn domain_failures() {
    let mut abacus = precise();
    for text in ["1/0", "sqrt(-4)", "arcsin(2)", "arcsec(0.5)", "(2.5)!", "(-2)^0.5", "ln0"] {
        assert_eq!(eval_err(&mut abacus, text), ErrorKind::Domain, "{text}");
    }
}

#[test]
fn unbound_names_fail_to_reduce() {
    let mut abacus = naive();
    assert_eq!(eval_err(&mut abacus, "q+1"), ErrorKind::Reduction);
}
