//! The standard Abacus plugin.
//!
//! Registers the `naive` and `precise` number implementations, the usual
//! operators (`+ - * / ^ ! nPr nCr`, prefix negation `` ` ``, and the
//! assignment forms `=` and `:=`), the elementary functions, and their
//! documentation.
//!
//! The function bodies are public so other plugins can build on them.

pub mod elementary;
pub mod implementations;
pub mod operators;
pub mod trig;

mod docs;

use abacus_eval::{NativeFunction, Plugin, Registry};
use abacus_number::Number;
use tracing::debug;

/// Identifier of [`StandardPlugin`].
pub const STANDARD_PLUGIN_ID: &str = "standard";

#[derive(Clone, Copy, Debug, Default)]
pub struct StandardPlugin;

fn unary(params: &[Number]) -> bool {
    params.len() == 1
}

fn positive(params: &[Number]) -> bool {
    matches!(params, [x] if x.signum() > 0)
}

fn non_negative(params: &[Number]) -> bool {
    matches!(params, [x] if x.signum() >= 0)
}

fn within_unit(params: &[Number]) -> bool {
    matches!(params, [x] if trig::within_unit(x))
}

fn outside_unit(params: &[Number]) -> bool {
    matches!(params, [x] if trig::outside_unit(x))
}

fn functions() -> [(&'static str, NativeFunction); 16] {
    [
        ("abs", NativeFunction::new(unary, |_, p| Ok(p[0].abs()))),
        ("exp", NativeFunction::new(unary, |r, p| elementary::exp(r, &p[0]))),
        ("ln", NativeFunction::new(positive, |r, p| elementary::ln(r, &p[0]))),
        ("sqrt", NativeFunction::new(non_negative, |r, p| elementary::sqrt(r, &p[0]))),
        ("sin", NativeFunction::new(unary, |r, p| trig::sin(r, &p[0]))),
        ("cos", NativeFunction::new(unary, |r, p| trig::cos(r, &p[0]))),
        ("tan", NativeFunction::new(unary, |r, p| trig::tan(r, &p[0]))),
        ("sec", NativeFunction::new(unary, |r, p| trig::sec(r, &p[0]))),
        ("csc", NativeFunction::new(unary, |r, p| trig::csc(r, &p[0]))),
        ("cot", NativeFunction::new(unary, |r, p| trig::cot(r, &p[0]))),
        ("arcsin", NativeFunction::new(within_unit, |r, p| trig::arcsin(r, &p[0]))),
        ("arccos", NativeFunction::new(within_unit, |r, p| trig::arccos(r, &p[0]))),
        ("arctan", NativeFunction::new(unary, |r, p| trig::arctan(r, &p[0]))),
        ("arcsec", NativeFunction::new(outside_unit, |r, p| trig::arcsec(r, &p[0]))),
        ("arccsc", NativeFunction::new(outside_unit, |r, p| trig::arccsc(r, &p[0]))),
        ("arccot", NativeFunction::new(unary, |r, p| trig::arccot(r, &p[0]))),
    ]
}

impl Plugin for StandardPlugin {
    fn id(&self) -> &str {
        STANDARD_PLUGIN_ID
    }

    fn on_enable(&self, registry: &mut Registry) {
        registry.register_number_implementation(implementations::NAIVE, implementations::naive());
        registry
            .register_number_implementation(implementations::PRECISE, implementations::precise());
        operators::register(registry);
        for (name, function) in functions() {
            registry.register_function(name, function);
        }
        docs::register(registry);
        debug!("standard plugin enabled");
    }
}


#[cfg(test)]
mod tests {
    use abacus_eval::DocumentationKind;
    use abacus_ir::{Grammar, SymbolKind};
    use pretty_assertions::assert_eq;

    use super::test_support::manager;

    #[test]
    fn registers_the_full_catalog() {
        let manager = manager();
        let registry = manager.registry();
        assert_eq!(
            registry.names(SymbolKind::Operator),
            vec!["!", "*", "+", "-", "/", "^", "`", "nCr", "nPr"]
        );
        assert_eq!(registry.names(SymbolKind::TreeValueOperator), vec![":=", "="]);
        assert_eq!(registry.names(SymbolKind::Function).len(), 16);
        assert_eq!(registry.number_implementation_names(), vec!["naive", "precise"]);
    }

    #[test]
    fn every_function_is_documented() {
        let manager = manager();
        let registry = manager.registry();
        for name in registry.names(SymbolKind::Function) {
            assert!(
                registry
                    .documentation(&name, DocumentationKind::Function)
                    .is_some(),
                "{name} has no documentation"
            );
        }
        assert_eq!(registry.all_documentation().len(), 16);
    }
}
