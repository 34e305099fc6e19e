//! Golden tree forms for the standard grammar.

use pretty_assertions::assert_eq;

use crate::common::parse_ok;

// -- Scenarios --

#[test]
fn reference_scenarios() {
    assert_eq!(parse_ok("9.5+10"), "(9.5+10)");
    assert_eq!(parse_ok("7!"), "(7)!");
    assert_eq!(parse_ok("2^-1"), "(2^(1)`)");
    assert_eq!(parse_ok("0^0"), "(0^0)");
    assert_eq!(parse_ok("ln(-1)"), "ln((1)`)");
    assert_eq!(parse_ok("sqrt2"), "sqrt(2)");
}

#[test]
fn whitespace_does_not_change_the_tree() {
    for (spaced, compact) in [
        ("9.5 + 10", "9.5+10"),
        (" 2 ^ - 1 ", "2^-1"),
        ("sqrt 2", "sqrt2"),
        ("sin ( 1 ) * 2", "sin(1)*2"),
    ] {
        assert_eq!(parse_ok(spaced), parse_ok(compact));
    }
}

// -- Precedence and associativity --

#[test]
fn standard_precedence() {
    assert_eq!(parse_ok("1+2*3"), "(1+(2*3))");
    assert_eq!(parse_ok("1-6/3"), "(1-(6/3))");
    assert_eq!(parse_ok("2*3^2"), "(2*(3^2))");
    assert_eq!(parse_ok("(1+2)*3"), "((1+2)*3)");
}

#[test]
fn associativity() {
    assert_eq!(parse_ok("8-3-2"), "((8-3)-2)");
    assert_eq!(parse_ok("8/4/2"), "((8/4)/2)");
    assert_eq!(parse_ok("2^3^2"), "(2^(3^2))");
}

#[test]
fn word_operators() {
    assert_eq!(parse_ok("5nPr3"), "(5nPr3)");
    assert_eq!(parse_ok("5 nCr 2"), "(5nCr2)");
    assert_eq!(parse_ok("2*5nCr2"), "(2*(5nCr2))");
}

// -- Unary operators --

#[test]
fn unary_minus_by_position() {
    assert_eq!(parse_ok("-2"), "(2)`");
    assert_eq!(parse_ok("1-2"), "(1-2)");
    assert_eq!(parse_ok("3!-2"), "((3)!-2)");
    assert_eq!(parse_ok("-2^2"), "((2^2))`");
}

// -- Calls and assignment --

#[test]
fn function_calls() {
    assert_eq!(parse_ok("sin(cos(0))"), "sin(cos(0))");
    assert_eq!(parse_ok("sqrt(2+1)"), "sqrt((2+1))");
    assert_eq!(parse_ok("abs(x)*2"), "(abs(x)*2)");
}

#[test]
fn longest_name_wins() {
    assert_eq!(parse_ok("sin2"), "sin(2)");
    assert_eq!(parse_ok("sinx"), "sinx");
    assert_eq!(parse_ok("lnx"), "lnx");
}

#[test]
fn assignment_binds_loosest() {
    assert_eq!(parse_ok("x = 1 + 2"), "(x=(1+2))");
    assert_eq!(parse_ok("x = y = 3"), "(x=(y=3))");
    assert_eq!(parse_ok("f := x * 2"), "(f:=(x*2))");
}
