//! Failure categories for malformed input.

use abacus_diagnostic::ErrorKind;
use pretty_assertions::assert_eq;

use crate::common::parse_err;

#[test]
fn unknown_characters_fail_to_tokenize() {
    assert_eq!(parse_err("1 $ 2"), ErrorKind::Tokenize);
    assert_eq!(parse_err("2 % 3"), ErrorKind::Tokenize);
}

#[test]
fn mismatched_parentheses() {
    assert_eq!(parse_err("(1+2"), ErrorKind::Parse);
    assert_eq!(parse_err("1+2)"), ErrorKind::Parse);
    assert_eq!(parse_err(")("), ErrorKind::Parse);
}

#[test]
fn missing_operands() {
    assert_eq!(parse_err("1+"), ErrorKind::Parse);
    assert_eq!(parse_err("*2"), ErrorKind::Parse);
}

#[test]
fn leftover_operands() {
    assert_eq!(parse_err("2 3"), ErrorKind::Parse);
}

#[test]
fn empty_input() {
    assert_eq!(parse_err(""), ErrorKind::Parse);
    assert_eq!(parse_err("   "), ErrorKind::Parse);
}
