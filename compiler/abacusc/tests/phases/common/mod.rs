//! Shared test utilities for phase tests.

use abacus_diagnostic::ErrorKind;
use abacusc::{Abacus, Configuration};

/// An engine whose context uses the `precise` implementation.
pub fn precise() -> Abacus {
    Abacus::new(Configuration::new().with_number_implementation("precise"))
}

/// An engine whose context uses the `naive` implementation.
pub fn naive() -> Abacus {
    Abacus::new(Configuration::new())
}

/// Canonical tree form of `text`, panicking on failure.
pub fn parse_ok(text: &str) -> String {
    match naive().parse(text) {
        Ok(tree) => tree.to_string(),
        Err(e) => panic!("expected '{text}' to parse, got {e}"),
    }
}

/// Failure category of parsing `text`, panicking on success.
pub fn parse_err(text: &str) -> ErrorKind {
    match naive().parse(text) {
        Ok(tree) => panic!("expected '{text}' to fail, parsed as {tree}"),
        Err(e) => e.kind(),
    }
}

/// Calculate `text` and render the value, panicking on failure.
pub fn eval_ok(abacus: &mut Abacus, text: &str) -> String {
    match abacus.calculate(text) {
        Ok(value) => value.to_string(),
        Err(e) => panic!("expected '{text}' to evaluate, got {e}"),
    }
}

/// Failure category of calculating `text`, panicking on success.
pub fn eval_err(abacus: &mut Abacus, text: &str) -> ErrorKind {
    match abacus.calculate(text) {
        Ok(value) => panic!("expected '{text}' to fail, got {value}"),
        Err(e) => e.kind(),
    }
}
