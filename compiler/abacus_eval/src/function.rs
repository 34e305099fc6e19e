//! What plugins register: functions, operators, implementations, docs.

use std::fmt;
use std::sync::Arc;

use abacus_ir::{OperatorSpec, TreeNode};
use abacus_number::{Number, NumberKind};
use rustc_hash::FxHashMap;

use crate::{EvalResult, Reducer};

/// A function over already-reduced numbers.
///
/// All arguments share one representation by the time `apply` runs; the
/// reducer promotes them first. `matches_params` is the domain check: when
/// it returns `false` the reducer reports a domain failure without calling
/// `apply`.
pub trait NumberFunction: Send + Sync {
    fn matches_params(&self, params: &[Number]) -> bool;

    fn apply(&self, reducer: &Reducer<'_>, params: &[Number]) -> EvalResult;
}

/// A function over unreduced subtrees.
///
/// Receives the reducer mutably so it can reduce whichever children it
/// needs and update the context.
pub trait TreeValueFunction: Send + Sync {
    fn matches_params(&self, params: &[&TreeNode]) -> bool;

    fn apply(&self, reducer: &mut Reducer<'_>, params: &[&TreeNode]) -> EvalResult;
}

/// [`NumberFunction`] assembled from two plain functions.
#[derive(Clone, Copy)]
pub struct NativeFunction {
    matches: fn(&[Number]) -> bool,
    apply: fn(&Reducer<'_>, &[Number]) -> EvalResult,
}

impl NativeFunction {
    pub const fn new(
        matches: fn(&[Number]) -> bool,
        apply: fn(&Reducer<'_>, &[Number]) -> EvalResult,
    ) -> Self {
        NativeFunction { matches, apply }
    }
}

impl NumberFunction for NativeFunction {
    fn matches_params(&self, params: &[Number]) -> bool {
        (self.matches)(params)
    }

    fn apply(&self, reducer: &Reducer<'_>, params: &[Number]) -> EvalResult {
        (self.apply)(reducer, params)
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("NativeFunction")
    }
}

#[derive(Clone)]
pub struct NumberOperator {
    pub spec: OperatorSpec,
    pub function: Arc<dyn NumberFunction>,
}

impl NumberOperator {
    pub fn new(spec: OperatorSpec, function: impl NumberFunction + 'static) -> Self {
        NumberOperator {
            spec,
            function: Arc::new(function),
        }
    }
}

#[derive(Clone)]
pub struct TreeValueOperator {
    pub spec: OperatorSpec,
    pub function: Arc<dyn TreeValueFunction>,
}

impl TreeValueOperator {
    pub fn new(spec: OperatorSpec, function: impl TreeValueFunction + 'static) -> Self {
        TreeValueOperator {
            spec,
            function: Arc::new(function),
        }
    }
}

/// Converts a number into another representation.
pub type PromotionFn = fn(&Number) -> EvalResult;

/// Produces pi in one representation.
pub type PiFn = fn(&Reducer<'_>) -> EvalResult;

/// A number representation as a plugin registers it.
#[derive(Clone)]
pub struct NumberImplementation {
    pub kind: NumberKind,
    /// Mixed operands are promoted toward the highest priority.
    pub priority: i32,
    /// Target implementation name to conversion.
    pub promotions: FxHashMap<String, PromotionFn>,
    pub pi: PiFn,
}

impl NumberImplementation {
    pub fn new(kind: NumberKind, priority: i32, pi: PiFn) -> Self {
        NumberImplementation {
            kind,
            priority,
            promotions: FxHashMap::default(),
            pi,
        }
    }

    #[must_use]
    pub fn with_promotion(mut self, target: impl Into<String>, path: PromotionFn) -> Self {
        self.promotions.insert(target.into(), path);
        self
    }

    pub fn instance_for_string(&self, text: &str) -> EvalResult {
        Number::parse(self.kind, text)
    }

    pub fn instance_for_pi(&self, reducer: &Reducer<'_>) -> EvalResult {
        (self.pi)(reducer)
    }
}

impl fmt::Debug for NumberImplementation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NumberImplementation")
            .field("kind", &self.kind)
            .field("priority", &self.priority)
            .field("promotions", &self.promotions.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DocumentationKind {
    Function,
    TreeValueFunction,
}

/// Help text for one registered name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Documentation {
    pub code_name: String,
    pub name: String,
    pub description: String,
    pub long_description: String,
    pub kind: DocumentationKind,
}

impl Documentation {
    pub fn new(
        code_name: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        long_description: impl Into<String>,
        kind: DocumentationKind,
    ) -> Self {
        Documentation {
            code_name: code_name.into(),
            name: name.into(),
            description: description.into(),
            long_description: long_description.into(),
            kind,
        }
    }

    /// Whether any of the fields a user would search contains `query`,
    /// case-insensitively.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        [&self.code_name, &self.name, &self.description, &self.long_description]
            .iter()
            .any(|field| field.to_lowercase().contains(&query))
    }
}
