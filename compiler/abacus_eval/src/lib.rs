//! Abacus evaluation layer.
//!
//! # Architecture
//!
//! - [`PluginManager`] owns the plugins and the [`Registry`] they fill, and
//!   drives the load/unload lifecycle
//! - [`Registry`] maps names to [`NumberOperator`]s, [`NumberFunction`]s,
//!   tree-value variants, [`NumberImplementation`]s and [`Documentation`],
//!   and holds the per-representation caches
//! - [`PromotionManager`] moves mixed operands to a common representation,
//!   which [`NumberRange`] also uses for containment checks
//! - [`Reducer`] walks a [`TreeNode`](abacus_ir::TreeNode) and produces a
//!   [`Number`], checking a [`CancellationToken`] at every node
//!
//! The registry implements [`Grammar`](abacus_ir::Grammar), which is all the
//! front end ever sees of it.

mod cancel;
mod context;
mod function;
mod plugin;
mod promotion;
mod range;
mod reducer;
mod registry;

use abacus_diagnostic::AbacusResult;
use abacus_number::Number;

pub use cancel::CancellationToken;
pub use context::EvaluationContext;
pub use function::{
    Documentation, DocumentationKind, NativeFunction, NumberFunction, NumberImplementation,
    NumberOperator, PiFn, PromotionFn, TreeValueFunction, TreeValueOperator,
};
pub use plugin::{Plugin, PluginManager};
pub use promotion::PromotionManager;
pub use range::NumberRange;
pub use reducer::Reducer;
pub use registry::Registry;

/// Result of reducing a node.
pub type EvalResult = AbacusResult<Number>;

/// A value and the context it was computed in.
///
/// The context carries any assignments the evaluation made; committing it is
/// up to the caller.
#[derive(Clone, Debug)]
pub struct EvaluationResult {
    pub value: Number,
    pub context: EvaluationContext,
}

/// Reduce `tree` against a copy of `base`.
pub fn evaluate(
    registry: &Registry,
    base: &EvaluationContext,
    tree: &abacus_ir::TreeNode,
    token: CancellationToken,
) -> AbacusResult<EvaluationResult> {
    let mut reducer = Reducer::new(registry, base.clone(), token)?;
    let value = reducer.reduce(tree)?;
    Ok(EvaluationResult {
        value,
        context: reducer.into_context(),
    })
}
