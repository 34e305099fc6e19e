//! Post-order tree reduction.
//!
//! A [`Reducer`] borrows the registry, owns a scratch [`EvaluationContext`],
//! and carries the [`CancellationToken`] of the evaluation it belongs to.
//! The token is checked on entry to every node and after each child, so a
//! cancelled evaluation stops at the next node boundary. Library functions
//! can also poll it through [`Reducer::check_cancelled`] inside long loops.

use abacus_diagnostic::{
    domain_error, no_number_implementation, recursive_definition, undefined_variable,
    unknown_function, unknown_operator, AbacusResult,
};
use abacus_ir::{ensure_sufficient_stack, TreeNode};
use abacus_number::{Number, NumberKind};
use tracing::trace;

use crate::function::{NumberFunction, TreeValueFunction};
use crate::{CancellationToken, EvalResult, EvaluationContext, Registry};

pub struct Reducer<'r> {
    registry: &'r Registry,
    context: EvaluationContext,
    token: CancellationToken,
    kind: NumberKind,
    /// Definitions currently being expanded, innermost last.
    expanding: Vec<String>,
}

impl<'r> Reducer<'r> {
    /// Fails when the context names no implementation, or one the registry
    /// does not know.
    pub fn new(
        registry: &'r Registry,
        context: EvaluationContext,
        token: CancellationToken,
    ) -> AbacusResult<Self> {
        let name = context
            .number_implementation()
            .ok_or_else(no_number_implementation)?;
        let kind = registry.number_implementation(name)?.kind;
        Ok(Reducer {
            registry,
            context,
            token,
            kind,
            expanding: Vec::new(),
        })
    }

    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    /// Representation literals are read in.
    pub fn kind(&self) -> NumberKind {
        self.kind
    }

    pub fn context(&self) -> &EvaluationContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut EvaluationContext {
        &mut self.context
    }

    pub fn into_context(self) -> EvaluationContext {
        self.context
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    #[inline]
    pub fn check_cancelled(&self) -> AbacusResult<()> {
        self.token.check()
    }

    /// Pi in `kind`, computed once per loaded configuration.
    pub fn pi(&self, kind: NumberKind) -> EvalResult {
        if let Some(pi) = self.registry.cached_pi(kind) {
            return Ok(pi);
        }
        let (name, implementation) = self
            .registry
            .implementation_for_kind(kind)
            .ok_or_else(|| domain_error("pi", format!("no implementation for '{kind}'")))?;
        trace!(name, "computing pi");
        let pi = implementation.instance_for_pi(self)?;
        self.registry.store_pi(kind, pi.clone());
        Ok(pi)
    }

    /// `n!` in `kind` from the shared table.
    pub fn factorial(&self, kind: NumberKind, n: u64) -> EvalResult {
        self.registry.factorial(kind, n, || self.check_cancelled())
    }

    pub fn reduce(&mut self, node: &TreeNode) -> EvalResult {
        ensure_sufficient_stack(|| self.reduce_node(node))
    }

    fn reduce_node(&mut self, node: &TreeNode) -> EvalResult {
        self.check_cancelled()?;
        let registry = self.registry;
        match node {
            TreeNode::Number(text) => Number::parse(self.kind, text),
            TreeNode::Variable(name) => self.lookup(name),
            TreeNode::Binary { op, left, right } => {
                let left = self.reduce_child(left)?;
                let right = self.reduce_child(right)?;
                let operator = registry.operator(op).ok_or_else(|| unknown_operator(op))?;
                self.apply_number_function(op, operator.function.as_ref(), &[left, right])
            }
            TreeNode::Unary { op, operand, .. } => {
                let operand = self.reduce_child(operand)?;
                let operator = registry.operator(op).ok_or_else(|| unknown_operator(op))?;
                self.apply_number_function(op, operator.function.as_ref(), &[operand])
            }
            TreeNode::Call { name, args } => {
                let function = registry.function(name).ok_or_else(|| unknown_function(name))?;
                let mut values = Vec::with_capacity(args.len());
                for arg in args {
                    values.push(self.reduce_child(arg)?);
                }
                self.apply_number_function(name, function.as_ref(), &values)
            }
            TreeNode::TreeValueBinary { op, left, right } => {
                let operator = registry
                    .tree_value_operator(op)
                    .ok_or_else(|| unknown_operator(op))?;
                self.apply_tree_value(op, operator.function.as_ref(), &[left.as_ref(), right.as_ref()])
            }
            TreeNode::TreeValueUnary { op, operand, .. } => {
                let operator = registry
                    .tree_value_operator(op)
                    .ok_or_else(|| unknown_operator(op))?;
                self.apply_tree_value(op, operator.function.as_ref(), &[operand.as_ref()])
            }
            TreeNode::TreeValueCall { name, args } => {
                let function = registry
                    .tree_value_function(name)
                    .ok_or_else(|| unknown_function(name))?;
                let args: Vec<&TreeNode> = args.iter().collect();
                self.apply_tree_value(name, function.as_ref(), &args)
            }
        }
    }

    fn reduce_child(&mut self, child: &TreeNode) -> EvalResult {
        let value = self.reduce(child)?;
        self.check_cancelled()?;
        Ok(value)
    }

    fn apply_number_function(
        &self,
        name: &str,
        function: &dyn NumberFunction,
        params: &[Number],
    ) -> EvalResult {
        let params = self.registry.promotions().promote(params)?;
        if !function.matches_params(&params) {
            return Err(domain_error(name, "arguments are outside the domain"));
        }
        function.apply(self, &params)
    }

    fn apply_tree_value(
        &mut self,
        name: &str,
        function: &dyn TreeValueFunction,
        params: &[&TreeNode],
    ) -> EvalResult {
        if !function.matches_params(params) {
            return Err(domain_error(name, "arguments are outside the domain"));
        }
        function.apply(self, params)
    }

    fn lookup(&mut self, name: &str) -> EvalResult {
        if let Some(value) = self.context.variable(name) {
            return Ok(value.clone());
        }
        let Some(tree) = self.context.definition(name).cloned() else {
            return Err(undefined_variable(name));
        };
        if self.expanding.iter().any(|n| n == name) {
            return Err(recursive_definition(name));
        }
        self.expanding.push(name.to_string());
        let value = self.reduce(&tree);
        self.expanding.pop();
        value
    }
}
