//! Standard operators.
//!
//! Arithmetic, power, factorial, permutations and combinations operate on
//! reduced numbers. `=` and `:=` are tree-value operators: they receive the
//! variable node and the unreduced right-hand side.

use abacus_diagnostic::domain_error;
use abacus_eval::{
    EvalResult, NativeFunction, NumberOperator, Reducer, Registry, TreeValueFunction,
    TreeValueOperator,
};
use abacus_ir::{Associativity, OperatorSpec, TreeNode};
use abacus_number::Number;
use tracing::trace;

use crate::elementary::{exceeds, int, power};

fn unary(params: &[Number]) -> bool {
    params.len() == 1
}

fn binary(params: &[Number]) -> bool {
    params.len() == 2
}

fn integral_pair(params: &[Number]) -> bool {
    params.len() == 2 && params.iter().all(Number::is_integer)
}

fn add(_: &Reducer<'_>, p: &[Number]) -> EvalResult {
    p[0].add(&p[1])
}

fn subtract(_: &Reducer<'_>, p: &[Number]) -> EvalResult {
    p[0].sub(&p[1])
}

fn multiply(_: &Reducer<'_>, p: &[Number]) -> EvalResult {
    p[0].mul(&p[1])
}

fn divide(_: &Reducer<'_>, p: &[Number]) -> EvalResult {
    p[0].div(&p[1])
}

fn negate(_: &Reducer<'_>, p: &[Number]) -> EvalResult {
    Ok(p[0].neg())
}

fn caret_matches(params: &[Number]) -> bool {
    let [base, exponent] = params else {
        return false;
    };
    !(base.is_zero() && exponent.is_zero())
        && !(base.signum() < 0 && !exponent.fractional_part().is_zero())
}

fn caret(r: &Reducer<'_>, p: &[Number]) -> EvalResult {
    power(r, &p[0], &p[1])
}

fn factorial_matches(params: &[Number]) -> bool {
    matches!(params, [n] if n.is_integer() && n.signum() >= 0)
}

fn factorial(r: &Reducer<'_>, p: &[Number]) -> EvalResult {
    let n = p[0]
        .to_i64()
        .and_then(|n| u64::try_from(n).ok())
        .ok_or_else(|| domain_error("!", format!("{} is out of range", p[0])))?;
    r.factorial(p[0].kind(), n)
}

fn permutations(r: &Reducer<'_>, p: &[Number]) -> EvalResult {
    npr(r, &p[0], &p[1])
}

fn combinations(r: &Reducer<'_>, p: &[Number]) -> EvalResult {
    ncr(r, &p[0], &p[1])
}

/// Ordered selections of `k` out of `n`: the falling product
/// `n (n-1) ... (n-k+1)`.
///
/// Zero when `n < k`, `n < 0`, `k < 0`, or `n = 0` with `k != 0`.
pub fn npr(r: &Reducer<'_>, n: &Number, k: &Number) -> EvalResult {
    let kind = n.kind();
    if exceeds(k, n)? || n.signum() < 0 || k.signum() < 0 || (n.is_zero() && !k.is_zero()) {
        return Ok(Number::zero(kind));
    }
    let one = int(kind, 1);
    let mut total = one.clone();
    let mut factor = n.clone();
    let mut remaining = k.clone();
    while remaining.signum() > 0 {
        r.check_cancelled()?;
        total = total.mul(&factor)?;
        factor = factor.sub(&one)?;
        remaining = remaining.sub(&one)?;
    }
    trace!(%n, %k, "permutations");
    Ok(total)
}

/// Unordered selections of `k` out of `n`: `nPr / k!`.
pub fn ncr(r: &Reducer<'_>, n: &Number, k: &Number) -> EvalResult {
    let selections = npr(r, n, k)?;
    if selections.is_zero() {
        return Ok(selections);
    }
    let k = k
        .to_i64()
        .and_then(|k| u64::try_from(k).ok())
        .ok_or_else(|| domain_error("nCr", format!("{k} is out of range")))?;
    selections.div(&r.factorial(n.kind(), k)?)
}

/// `x = value`: reduce the right side and bind it.
pub struct SetVariable;

impl TreeValueFunction for SetVariable {
    fn matches_params(&self, params: &[&TreeNode]) -> bool {
        matches!(params, [target, _] if target.as_variable().is_some())
    }

    fn apply(&self, reducer: &mut Reducer<'_>, params: &[&TreeNode]) -> EvalResult {
        let value = reducer.reduce(params[1])?;
        if let Some(name) = params[0].as_variable() {
            reducer.context_mut().set_variable(name, value.clone());
        }
        Ok(value)
    }
}

/// `x := tree`: store the right side unreduced and yield its current value.
pub struct Define;

impl TreeValueFunction for Define {
    fn matches_params(&self, params: &[&TreeNode]) -> bool {
        matches!(params, [target, _] if target.as_variable().is_some())
    }

    fn apply(&self, reducer: &mut Reducer<'_>, params: &[&TreeNode]) -> EvalResult {
        if let Some(name) = params[0].as_variable() {
            reducer.context_mut().set_definition(name, params[1].clone());
        }
        reducer.reduce(params[1])
    }
}

const OPERATORS: &[(&str, OperatorSpec, NativeFunction)] = &[
    (
        "+",
        OperatorSpec::infix(Associativity::Left, 0),
        NativeFunction::new(binary, add),
    ),
    (
        "-",
        OperatorSpec::infix(Associativity::Left, 0),
        NativeFunction::new(binary, subtract),
    ),
    ("`", OperatorSpec::prefix(0), NativeFunction::new(unary, negate)),
    (
        "*",
        OperatorSpec::infix(Associativity::Left, 1),
        NativeFunction::new(binary, multiply),
    ),
    (
        "/",
        OperatorSpec::infix(Associativity::Left, 1),
        NativeFunction::new(binary, divide),
    ),
    (
        "^",
        OperatorSpec::infix(Associativity::Right, 2),
        NativeFunction::new(caret_matches, caret),
    ),
    (
        "!",
        OperatorSpec::postfix(0),
        NativeFunction::new(factorial_matches, factorial),
    ),
    (
        "nPr",
        OperatorSpec::infix(Associativity::Right, 1),
        NativeFunction::new(integral_pair, permutations),
    ),
    (
        "nCr",
        OperatorSpec::infix(Associativity::Right, 1),
        NativeFunction::new(integral_pair, combinations),
    ),
];

pub fn register(registry: &mut Registry) {
    for &(name, spec, function) in OPERATORS {
        registry.register_operator(name, NumberOperator::new(spec, function));
    }
    let assignment = OperatorSpec::infix(Associativity::Right, -1);
    registry.register_tree_value_operator("=", TreeValueOperator::new(assignment, SetVariable));
    registry.register_tree_value_operator(":=", TreeValueOperator::new(assignment, Define));
}
