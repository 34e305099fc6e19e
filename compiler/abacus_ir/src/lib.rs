//! Abacus IR - shared data model
//!
//! This crate holds the types that both the front end (tokenizer, parser)
//! and the back end (evaluator, plugins) agree on:
//! - [`TreeNode`], the expression tree produced by the parser
//! - [`OperatorSpec`], the grammar-level description of an operator
//! - [`Grammar`] and [`GrammarListener`], the seam through which the plugin
//!   registry announces what names exist without the parser depending on
//!   the evaluator
//! - [`ensure_sufficient_stack`] for recursive walks over deep trees

mod grammar;
mod operator;
mod stack;
mod tree;

pub use grammar::{Grammar, GrammarListener, SymbolKind};
pub use operator::{Associativity, Fixity, OperatorSpec};
pub use stack::ensure_sufficient_stack;
pub use tree::TreeNode;
