//! Timeouts and explicit cancellation.

use std::time::Duration;

use abacus_diagnostic::ErrorKind;
use abacus_eval::CancellationToken;
use pretty_assertions::assert_eq;

use crate::common::precise;

#[test]
fn long_factorial_times_out() {
    let abacus = precise();
    let tree = abacus.parse("100000!").unwrap();
    let result = abacus.evaluate_with_timeout(&tree, Duration::from_millis(20));
    assert_eq!(result.map(|r| r.value).map_err(|e| e.kind()), Err(ErrorKind::Cancelled));
}

#[test]
fn short_evaluation_beats_the_deadline() {
    let abacus = precise();
    let tree = abacus.parse("sqrt(16)+1").unwrap();
    let result = abacus.evaluate_with_timeout(&tree, Duration::from_secs(60)).unwrap();
    assert!((result.value.to_f64() - 5.0).abs() < 1e-12, "{}", result.value);
}

#[test]
fn engine_is_usable_after_a_timeout() {
    let mut abacus = precise();
    let slow = abacus.parse("100000!").unwrap();
    assert!(abacus
        .evaluate_with_timeout(&slow, Duration::from_millis(20))
        .is_err_and(|e| e.is_cancelled()));
    assert_eq!(abacus.calculate("6!").unwrap().to_string(), "720");
}

#[test]
fn cancelled_token_stops_evaluation() {
    let abacus = precise();
    let tree = abacus.parse("1+2").unwrap();
    let token = CancellationToken::new();
    token.cancel();
    let result = abacus.evaluate_with_token(&tree, token);
    assert!(result.is_err_and(|e| e.is_cancelled()));
}
