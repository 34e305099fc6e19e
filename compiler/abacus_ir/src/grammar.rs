//! Read-only view of the loaded grammar.
//!
//! The plugin registry lives in the evaluator crate, but the tokenizer and
//! parser must know which operator and function names exist. The registry
//! implements [`Grammar`]; front-end components implement [`GrammarListener`]
//! and rebuild their mirrors whenever plugins load or unload.

use crate::OperatorSpec;

/// The four disjoint name spaces a plugin can register into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Operator,
    TreeValueOperator,
    Function,
    TreeValueFunction,
}

impl SymbolKind {
    pub const ALL: [SymbolKind; 4] = [
        SymbolKind::Operator,
        SymbolKind::TreeValueOperator,
        SymbolKind::Function,
        SymbolKind::TreeValueFunction,
    ];

    #[inline]
    pub fn is_operator(self) -> bool {
        matches!(self, SymbolKind::Operator | SymbolKind::TreeValueOperator)
    }

    #[inline]
    pub fn is_tree_value(self) -> bool {
        matches!(
            self,
            SymbolKind::TreeValueOperator | SymbolKind::TreeValueFunction
        )
    }
}

pub trait Grammar {
    /// Every name registered under `kind`.
    fn names(&self, kind: SymbolKind) -> Vec<String>;

    /// Grammar attributes of an operator registered under `kind`.
    ///
    /// Always `None` for function kinds.
    fn operator_spec(&self, kind: SymbolKind, name: &str) -> Option<OperatorSpec>;
}

/// Notified by the plugin manager around every load and unload.
///
/// `on_load` runs after all plugins have registered; `on_unload` runs before
/// the registries are cleared, so the names being removed are still visible.
pub trait GrammarListener {
    fn on_load(&mut self, grammar: &dyn Grammar);
    fn on_unload(&mut self, grammar: &dyn Grammar);
}
