use std::time::Duration;

use abacus_diagnostic::ErrorKind;
use abacus_eval::{NativeFunction, Plugin, Registry};
use abacus_parse::TokenType;
use abacus_std::STANDARD_PLUGIN_ID;
use pretty_assertions::assert_eq;

use super::Abacus;
use crate::Configuration;

fn precise() -> Abacus {
    Abacus::new(Configuration::new().with_number_implementation("precise"))
}

fn value(abacus: &mut Abacus, text: &str) -> Result<String, ErrorKind> {
    abacus
        .calculate(text)
        .map(|v| v.to_string())
        .map_err(|e| e.kind())
}

/// Registers `double`, and nothing else.
struct DoublePlugin;

impl Plugin for DoublePlugin {
    fn id(&self) -> &str {
        "double"
    }

    fn on_enable(&self, registry: &mut Registry) {
        registry.register_function(
            "double",
            NativeFunction::new(|p| p.len() == 1, |_, p| p[0].add(&p[0])),
        );
    }
}

// === Pipeline ===

#[test]
fn tokenize_drops_whitespace() {
    let abacus = Abacus::default();
    let kinds: Vec<TokenType> = abacus
        .tokenize("sqrt 2 + x")
        .unwrap_or_else(|e| panic!("{e}"))
        .into_iter()
        .map(|t| t.kind)
        .collect();
    assert_eq!(
        kinds,
        vec![TokenType::Function, TokenType::Num, TokenType::Op, TokenType::Variable]
    );
}

#[test]
fn parse_renders_the_canonical_form() {
    let abacus = Abacus::default();
    let tree = abacus.parse("1 + 2 * 3").unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(tree.to_string(), "(1+(2*3))");
}

#[test]
fn calculate_in_each_implementation() {
    assert_eq!(value(&mut Abacus::default(), "9.5+10"), Ok("19.5".to_string()));
    assert_eq!(value(&mut precise(), "9.5+10"), Ok("19.5".to_string()));
    assert_eq!(value(&mut precise(), "1/0"), Err(ErrorKind::Domain));
}

// === Context ===

#[test]
fn calculate_commits_on_success() {
    let mut abacus = precise();
    assert_eq!(value(&mut abacus, "x = 4"), Ok("4".to_string()));
    assert_eq!(value(&mut abacus, "x * 2"), Ok("8".to_string()));
    assert!(abacus.context().variable("x").is_some());
}

#[test]
fn failures_leave_the_context_alone() {
    let mut abacus = precise();
    assert_eq!(value(&mut abacus, "y = 1/0"), Err(ErrorKind::Domain));
    assert!(abacus.context().variable("y").is_none());
    assert_eq!(value(&mut abacus, "y"), Err(ErrorKind::Reduction));
}

#[test]
fn evaluate_only_commits_when_applied() {
    let mut abacus = precise();
    let tree = abacus.parse("z = 3").unwrap_or_else(|e| panic!("{e}"));
    let result = abacus.evaluate(&tree).unwrap_or_else(|e| panic!("{e}"));
    assert!(result.context.variable("z").is_some());
    assert!(abacus.context().variable("z").is_none());

    abacus.apply_to_context(&result);
    assert_eq!(value(&mut abacus, "z + 1"), Ok("4".to_string()));
}

#[test]
fn definitions_follow_their_inputs() {
    let mut abacus = precise();
    assert_eq!(value(&mut abacus, "a = 2"), Ok("2".to_string()));
    assert_eq!(value(&mut abacus, "b := a * 10"), Ok("20".to_string()));
    assert_eq!(value(&mut abacus, "a = 5"), Ok("5".to_string()));
    assert_eq!(value(&mut abacus, "b"), Ok("50".to_string()));
}

// === Reload and configuration ===

#[test]
fn reload_clears_bindings() {
    let mut abacus = precise();
    value(&mut abacus, "x = 1").unwrap_or_else(|e| panic!("{e:?}"));
    abacus.reload();
    assert!(abacus.context().variable("x").is_none());
    assert_eq!(abacus.context().number_implementation(), Some("precise"));
}

#[test]
fn unknown_implementation_falls_back_to_the_default() {
    let abacus = Abacus::new(Configuration::new().with_number_implementation("bogus"));
    assert_eq!(abacus.context().number_implementation(), Some("naive"));
}

#[test]
fn set_configuration_switches_implementation() {
    let mut abacus = Abacus::default();
    assert_eq!(value(&mut abacus, "1/4"), Ok("0.25".to_string()));
    abacus.set_configuration(Configuration::new().with_number_implementation("precise"));
    assert_eq!(abacus.context().number_implementation(), Some("precise"));
}

#[test]
fn disabling_the_standard_plugin_leaves_nothing_to_evaluate_with() {
    let mut abacus =
        Abacus::new(Configuration::new().with_disabled_plugin(STANDARD_PLUGIN_ID));
    assert!(abacus.registry().is_empty());
    assert_eq!(abacus.context().number_implementation(), None);
    assert_eq!(value(&mut abacus, "1"), Err(ErrorKind::Reduction));
    assert_eq!(value(&mut abacus, "1+1"), Err(ErrorKind::Tokenize));
}

#[test]
fn added_plugins_take_effect_on_reload() {
    let mut abacus = precise();
    assert!(abacus.add_plugin(Box::new(DoublePlugin)));
    assert_eq!(abacus.tokenize("double").map(|t| t[0].kind), Ok(TokenType::Variable));
    abacus.reload();
    assert_eq!(value(&mut abacus, "double(4)"), Ok("8".to_string()));

    assert!(abacus.remove_plugin("double"));
    abacus.reload();
    assert_eq!(abacus.tokenize("double").map(|t| t[0].kind), Ok(TokenType::Variable));
}

// === Timeouts ===

#[test]
fn timeout_returns_the_value_when_in_time() {
    let mut abacus = precise();
    let value = abacus
        .calculate_with_timeout("x = 6 * 7", Duration::from_secs(30))
        .map(|v| v.to_string());
    assert_eq!(value, Ok("42".to_string()));
    assert!(abacus.context().variable("x").is_some());
}

#[test]
fn timeout_cancels_long_evaluations() {
    let mut abacus = precise();
    let result = abacus.calculate_with_timeout("x = 100000!", Duration::from_millis(20));
    assert!(result.is_err_and(|e| e.is_cancelled()));
    assert!(abacus.context().variable("x").is_none());
}

// === Documentation ===

#[test]
fn documentation_lookup() {
    let abacus = Abacus::default();
    let entry = abacus.documentation("sqrt").map(|d| d.name.as_str());
    assert_eq!(entry, Some("Square Root"));
    assert!(abacus.documentation("nope").is_none());
    let found: Vec<&str> = abacus
        .search_documentation("ARCTAN")
        .into_iter()
        .map(|d| d.code_name.as_str())
        .collect();
    assert_eq!(found, vec!["arctan"]);
}
