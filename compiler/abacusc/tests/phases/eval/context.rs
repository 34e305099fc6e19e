//! Bindings, reloads and configuration.

use abacus_diagnostic::ErrorKind;
use abacus_std::STANDARD_PLUGIN_ID;
use abacusc::{Abacus, Configuration};
use pretty_assertions::assert_eq;

use crate::common::{eval_err, eval_ok, naive, precise};

#[test]
fn chained_assignment() {
    let mut abacus = precise();
    assert_eq!(eval_ok(&mut abacus, "x = y = 3"), "3");
    assert_eq!(eval_ok(&mut abacus, "x + y"), "6");
}

#[test]
fn definitions_are_reevaluated() {
    let mut abacus = precise();
    eval_ok(&mut abacus, "r = 2");
    assert_eq!(eval_ok(&mut abacus, "area := 3 * r^2"), "12");
    eval_ok(&mut abacus, "r = 3");
    assert_eq!(eval_ok(&mut abacus, "area"), "27");
}

#[test]
fn self_reference_is_rejected() {
    let mut abacus = precise();
    assert_eq!(eval_err(&mut abacus, "a := a + 1"), ErrorKind::Reduction);
    assert!(abacus.context().definition("a").is_none());
}

#[test]
fn failed_calculation_commits_nothing() {
    let mut abacus = naive();
    assert_eq!(eval_err(&mut abacus, "x = sqrt(-1)"), ErrorKind::Domain);
    assert!(abacus.context().variables().is_empty());
}

#[test]
fn reload_clears_bindings() {
    let mut abacus = naive();
    eval_ok(&mut abacus, "x = 1");
    abacus.reload();
    assert_eq!(eval_err(&mut abacus, "x"), ErrorKind::Reduction);
    assert_eq!(eval_ok(&mut abacus, "1+1"), "2");
}

#[test]
fn environment_style_configuration() {
    let configuration = Configuration::from_lookup(|_| Some("precise".to_string()));
    let mut abacus = Abacus::new(configuration);
    assert_eq!(abacus.context().number_implementation(), Some("precise"));
    assert_eq!(eval_ok(&mut abacus, "1.5*4"), "6.0");
}

#[test]
fn unknown_implementation_falls_back() {
    let mut abacus = Abacus::new(Configuration::new().with_number_implementation("nope"));
    assert_eq!(abacus.context().number_implementation(), Some("naive"));
    assert_eq!(eval_ok(&mut abacus, "1.5*4"), "6");
}

#[test]
fn disabled_standard_plugin() {
    let mut abacus = Abacus::new(Configuration::new().with_disabled_plugin(STANDARD_PLUGIN_ID));
    assert_eq!(eval_err(&mut abacus, "1"), ErrorKind::Reduction);
    assert_eq!(eval_err(&mut abacus, "1+1"), ErrorKind::Tokenize);

    abacus.set_configuration(Configuration::new());
    assert_eq!(eval_ok(&mut abacus, "1+1"), "2");
}
