//! Everything the loaded plugins registered.
//!
//! Besides the name tables the registry owns the per-representation caches
//! (pi, the factorial table, and named constants such as `ln 2`). They are
//! append-only while loaded, guarded by `parking_lot` mutexes so a shared
//! `&Registry` can fill them during evaluation, and dropped on unload.
//!
//! Cache fills never hold a lock while computing, so a computation may
//! itself consult other caches.

use std::sync::Arc;

use abacus_diagnostic::{unknown_number_implementation, AbacusResult};
use abacus_ir::{Grammar, OperatorSpec, SymbolKind};
use abacus_number::{Number, NumberKind};
use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::function::{
    Documentation, DocumentationKind, NumberFunction, NumberImplementation, NumberOperator,
    TreeValueFunction, TreeValueOperator,
};
use crate::{EvalResult, PromotionManager};

#[derive(Default)]
pub struct Registry {
    operators: FxHashMap<String, NumberOperator>,
    tree_value_operators: FxHashMap<String, TreeValueOperator>,
    functions: FxHashMap<String, Arc<dyn NumberFunction>>,
    tree_value_functions: FxHashMap<String, Arc<dyn TreeValueFunction>>,
    implementations: FxHashMap<String, NumberImplementation>,
    documentation: Vec<Documentation>,
    promotions: PromotionManager,

    pi: Mutex<FxHashMap<NumberKind, Number>>,
    factorials: Mutex<FxHashMap<NumberKind, Vec<Number>>>,
    constants: Mutex<FxHashMap<(&'static str, NumberKind), Number>>,
}

fn sorted_keys<V>(map: &FxHashMap<String, V>) -> Vec<String> {
    let mut names: Vec<String> = map.keys().cloned().collect();
    names.sort_unstable();
    names
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    // Registration

    pub fn register_operator(&mut self, name: impl Into<String>, operator: NumberOperator) {
        self.operators.insert(name.into(), operator);
    }

    pub fn register_tree_value_operator(
        &mut self,
        name: impl Into<String>,
        operator: TreeValueOperator,
    ) {
        self.tree_value_operators.insert(name.into(), operator);
    }

    pub fn register_function(
        &mut self,
        name: impl Into<String>,
        function: impl NumberFunction + 'static,
    ) {
        self.functions.insert(name.into(), Arc::new(function));
    }

    pub fn register_tree_value_function(
        &mut self,
        name: impl Into<String>,
        function: impl TreeValueFunction + 'static,
    ) {
        self.tree_value_functions
            .insert(name.into(), Arc::new(function));
    }

    pub fn register_number_implementation(
        &mut self,
        name: impl Into<String>,
        implementation: NumberImplementation,
    ) {
        self.implementations.insert(name.into(), implementation);
    }

    /// Later entries for the same `(code_name, kind)` replace earlier ones.
    pub fn register_documentation(&mut self, entry: Documentation) {
        self.documentation
            .retain(|d| !(d.code_name == entry.code_name && d.kind == entry.kind));
        self.documentation.push(entry);
    }

    // Lookup

    pub fn operator(&self, name: &str) -> Option<&NumberOperator> {
        self.operators.get(name)
    }

    pub fn tree_value_operator(&self, name: &str) -> Option<&TreeValueOperator> {
        self.tree_value_operators.get(name)
    }

    pub fn function(&self, name: &str) -> Option<&Arc<dyn NumberFunction>> {
        self.functions.get(name)
    }

    pub fn tree_value_function(&self, name: &str) -> Option<&Arc<dyn TreeValueFunction>> {
        self.tree_value_functions.get(name)
    }

    pub fn number_implementation(&self, name: &str) -> AbacusResult<&NumberImplementation> {
        self.implementations
            .get(name)
            .ok_or_else(|| unknown_number_implementation(name))
    }

    pub fn number_implementation_names(&self) -> Vec<String> {
        sorted_keys(&self.implementations)
    }

    /// The implementation registered for a representation, with its name.
    pub fn implementation_for_kind(&self, kind: NumberKind) -> Option<(&str, &NumberImplementation)> {
        self.implementations
            .iter()
            .find(|(_, i)| i.kind == kind)
            .map(|(name, i)| (name.as_str(), i))
    }

    pub fn documentation(&self, code_name: &str, kind: DocumentationKind) -> Option<&Documentation> {
        self.documentation
            .iter()
            .find(|d| d.code_name == code_name && d.kind == kind)
    }

    pub fn all_documentation(&self) -> &[Documentation] {
        &self.documentation
    }

    pub fn promotions(&self) -> &PromotionManager {
        &self.promotions
    }

    pub(crate) fn rebuild_promotions(&mut self) {
        self.promotions = PromotionManager::from_implementations(
            self.implementations.iter().map(|(name, i)| (name.as_str(), i)),
        );
    }

    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
            && self.tree_value_operators.is_empty()
            && self.functions.is_empty()
            && self.tree_value_functions.is_empty()
            && self.implementations.is_empty()
    }

    /// Drop every registration and cache.
    pub(crate) fn clear(&mut self) {
        self.operators.clear();
        self.tree_value_operators.clear();
        self.functions.clear();
        self.tree_value_functions.clear();
        self.implementations.clear();
        self.documentation.clear();
        self.promotions.clear();
        self.pi.get_mut().clear();
        self.factorials.get_mut().clear();
        self.constants.get_mut().clear();
    }

    // Caches

    pub(crate) fn cached_pi(&self, kind: NumberKind) -> Option<Number> {
        self.pi.lock().get(&kind).cloned()
    }

    pub(crate) fn store_pi(&self, kind: NumberKind, value: Number) {
        debug!(%kind, "cached pi");
        self.pi.lock().insert(kind, value);
    }

    /// `key` for `kind`, computing it with `compute` on first use.
    pub fn memoize(
        &self,
        key: &'static str,
        kind: NumberKind,
        compute: impl FnOnce() -> EvalResult,
    ) -> EvalResult {
        if let Some(value) = self.constants.lock().get(&(key, kind)) {
            return Ok(value.clone());
        }
        let value = compute()?;
        debug!(key, %kind, "cached constant");
        self.constants.lock().insert((key, kind), value.clone());
        Ok(value)
    }

    /// `n!` in `kind`, extending the table as needed.
    ///
    /// `check` runs once per new table entry; an error from it aborts the
    /// extension, keeping the entries computed so far. The new entries are
    /// computed from a copy of the last one with the table unlocked, so
    /// `check` may itself ask for factorials.
    pub fn factorial(
        &self,
        kind: NumberKind,
        n: u64,
        check: impl FnMut() -> AbacusResult<()>,
    ) -> EvalResult {
        let index = usize::try_from(n).unwrap_or(usize::MAX);
        let (start, last) = {
            let mut tables = self.factorials.lock();
            let table = tables
                .entry(kind)
                .or_insert_with(|| vec![Number::one(kind), Number::one(kind)]);
            if let Some(value) = table.get(index) {
                return Ok(value.clone());
            }
            let last = table.last().cloned().unwrap_or_else(|| Number::one(kind));
            (table.len(), last)
        };

        let mut fresh = Vec::new();
        let outcome = extend_factorials(kind, start..=index, last, check, &mut fresh);

        let mut tables = self.factorials.lock();
        let table = tables
            .entry(kind)
            .or_insert_with(|| vec![Number::one(kind), Number::one(kind)]);
        // another caller may have extended the table meanwhile
        if table.len() >= start {
            let known = table.len() - start;
            table.extend(fresh.into_iter().skip(known));
        }
        outcome
    }
}

/// Push `k!` for each `k` in `range` onto `fresh`, starting from
/// `last = (range.start - 1)!`. Returns the final entry.
fn extend_factorials(
    kind: NumberKind,
    range: std::ops::RangeInclusive<usize>,
    mut last: Number,
    mut check: impl FnMut() -> AbacusResult<()>,
    fresh: &mut Vec<Number>,
) -> EvalResult {
    for k in range {
        check()?;
        let factor = Number::from_i64(kind, i64::try_from(k).unwrap_or(i64::MAX));
        last = last.mul(&factor)?;
        fresh.push(last.clone());
    }
    Ok(last)
}

impl Grammar for Registry {
    fn names(&self, kind: SymbolKind) -> Vec<String> {
        match kind {
            SymbolKind::Operator => sorted_keys(&self.operators),
            SymbolKind::TreeValueOperator => sorted_keys(&self.tree_value_operators),
            SymbolKind::Function => sorted_keys(&self.functions),
            SymbolKind::TreeValueFunction => sorted_keys(&self.tree_value_functions),
        }
    }

    fn operator_spec(&self, kind: SymbolKind, name: &str) -> Option<OperatorSpec> {
        match kind {
            SymbolKind::Operator => self.operators.get(name).map(|o| o.spec),
            SymbolKind::TreeValueOperator => self.tree_value_operators.get(name).map(|o| o.spec),
            SymbolKind::Function | SymbolKind::TreeValueFunction => None,
        }
    }
}
