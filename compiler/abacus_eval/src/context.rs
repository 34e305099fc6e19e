//! Variable and definition bindings.

use abacus_ir::TreeNode;
use abacus_number::Number;
use rustc_hash::FxHashMap;

/// Bindings visible to an evaluation.
///
/// Variables hold values. Definitions hold unreduced trees that are
/// re-evaluated on every reference, so `y := x * 2` follows later changes
/// to `x`.
#[derive(Clone, Debug, Default)]
pub struct EvaluationContext {
    number_implementation: Option<String>,
    variables: FxHashMap<String, Number>,
    definitions: FxHashMap<String, TreeNode>,
}

impl EvaluationContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_implementation(name: impl Into<String>) -> Self {
        EvaluationContext {
            number_implementation: Some(name.into()),
            ..Self::default()
        }
    }

    /// Name of the number implementation literals are read in.
    pub fn number_implementation(&self) -> Option<&str> {
        self.number_implementation.as_deref()
    }

    pub fn set_number_implementation(&mut self, name: impl Into<String>) {
        self.number_implementation = Some(name.into());
    }

    pub fn variable(&self, name: &str) -> Option<&Number> {
        self.variables.get(name)
    }

    pub fn set_variable(&mut self, name: impl Into<String>, value: Number) {
        self.variables.insert(name.into(), value);
    }

    pub fn definition(&self, name: &str) -> Option<&TreeNode> {
        self.definitions.get(name)
    }

    pub fn set_definition(&mut self, name: impl Into<String>, tree: TreeNode) {
        self.definitions.insert(name.into(), tree);
    }

    /// Bound variable names, sorted.
    pub fn variables(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.variables.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Defined names, sorted.
    pub fn definitions(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.definitions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn clear_variables(&mut self) {
        self.variables.clear();
    }

    pub fn clear_definitions(&mut self) {
        self.definitions.clear();
    }

    /// Copy every binding from `other` into `self`, overwriting on conflict.
    pub fn apply(&mut self, other: &EvaluationContext) {
        if let Some(name) = &other.number_implementation {
            self.number_implementation = Some(name.clone());
        }
        for (name, value) in &other.variables {
            self.variables.insert(name.clone(), value.clone());
        }
        for (name, tree) in &other.definitions {
            self.definitions.insert(name.clone(), tree.clone());
        }
    }
}
