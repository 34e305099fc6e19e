//! Expression trees.
//!
//! Each node exclusively owns its children. The `Display` impl produces the
//! canonical fully-parenthesized form used as a golden oracle in tests:
//!
//! | Node        | Rendering        |
//! |-------------|------------------|
//! | number      | `2.5`            |
//! | variable    | `x`              |
//! | binary      | `(left+right)`   |
//! | unary       | `(operand)!`     |
//! | call        | `f(a, b)`        |
//!
//! Tree-value nodes render the same way as their ordinary counterparts.

use std::fmt;

use crate::{ensure_sufficient_stack, Fixity};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TreeNode {
    /// Numeric literal text, converted to a number at reduction time using
    /// whichever representation is active.
    Number(String),
    Variable(String),
    Binary {
        op: String,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
    Unary {
        op: String,
        fixity: Fixity,
        operand: Box<TreeNode>,
    },
    Call {
        name: String,
        args: Vec<TreeNode>,
    },
    /// Binary operator whose operands are handed over unreduced.
    TreeValueBinary {
        op: String,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
    TreeValueUnary {
        op: String,
        fixity: Fixity,
        operand: Box<TreeNode>,
    },
    TreeValueCall {
        name: String,
        args: Vec<TreeNode>,
    },
}

impl TreeNode {
    pub fn number(text: impl Into<String>) -> Self {
        TreeNode::Number(text.into())
    }

    pub fn variable(name: impl Into<String>) -> Self {
        TreeNode::Variable(name.into())
    }

    pub fn binary(op: impl Into<String>, left: TreeNode, right: TreeNode) -> Self {
        TreeNode::Binary {
            op: op.into(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn unary(op: impl Into<String>, fixity: Fixity, operand: TreeNode) -> Self {
        TreeNode::Unary {
            op: op.into(),
            fixity,
            operand: Box::new(operand),
        }
    }

    pub fn call(name: impl Into<String>, args: Vec<TreeNode>) -> Self {
        TreeNode::Call {
            name: name.into(),
            args,
        }
    }

    pub fn tree_value_binary(op: impl Into<String>, left: TreeNode, right: TreeNode) -> Self {
        TreeNode::TreeValueBinary {
            op: op.into(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn tree_value_unary(op: impl Into<String>, fixity: Fixity, operand: TreeNode) -> Self {
        TreeNode::TreeValueUnary {
            op: op.into(),
            fixity,
            operand: Box::new(operand),
        }
    }

    pub fn tree_value_call(name: impl Into<String>, args: Vec<TreeNode>) -> Self {
        TreeNode::TreeValueCall {
            name: name.into(),
            args,
        }
    }

    /// Whether reduction hands this node's children over unreduced.
    pub fn is_tree_value(&self) -> bool {
        matches!(
            self,
            TreeNode::TreeValueBinary { .. }
                | TreeNode::TreeValueUnary { .. }
                | TreeNode::TreeValueCall { .. }
        )
    }

    /// The variable name, if this node is a bare variable.
    pub fn as_variable(&self) -> Option<&str> {
        match self {
            TreeNode::Variable(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ensure_sufficient_stack(|| match self {
            TreeNode::Number(text) | TreeNode::Variable(text) => f.write_str(text),
            TreeNode::Binary { op, left, right }
            | TreeNode::TreeValueBinary { op, left, right } => {
                write!(f, "({left}{op}{right})")
            }
            TreeNode::Unary { op, operand, .. } | TreeNode::TreeValueUnary { op, operand, .. } => {
                write!(f, "({operand}){op}")
            }
            TreeNode::Call { name, args } | TreeNode::TreeValueCall { name, args } => {
                write!(f, "{name}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(")")
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::TreeNode;
    use crate::Fixity;
    use pretty_assertions::assert_eq;

    #[test]
    fn binary_has_no_spaces() {
        let tree = TreeNode::binary("+", TreeNode::number("9.5"), TreeNode::number("10"));
        assert_eq!(tree.to_string(), "(9.5+10)");
    }

    #[test]
    fn unary_wraps_operand_for_both_sides() {
        let neg = TreeNode::unary("`", Fixity::Prefix, TreeNode::number("9.5"));
        let fact = TreeNode::unary("!", Fixity::Postfix, TreeNode::number("7"));
        assert_eq!(neg.to_string(), "(9.5)`");
        assert_eq!(fact.to_string(), "(7)!");
    }

    #[test]
    fn call_separates_arguments() {
        let inner = TreeNode::unary("`", Fixity::Prefix, TreeNode::number("1"));
        let tree = TreeNode::call("f", vec![inner, TreeNode::variable("x")]);
        assert_eq!(tree.to_string(), "f((1)`, x)");
        assert_eq!(TreeNode::call("g", vec![]).to_string(), "g()");
    }

    #[test]
    fn tree_value_nodes_render_like_ordinary_ones() {
        let set = TreeNode::tree_value_binary("=", TreeNode::variable("x"), TreeNode::number("2"));
        assert_eq!(set.to_string(), "(x=2)");
        assert!(set.is_tree_value());
        assert!(!TreeNode::number("2").is_tree_value());
    }

    #[test]
    fn as_variable() {
        assert_eq!(TreeNode::variable("x").as_variable(), Some("x"));
        assert_eq!(TreeNode::number("1").as_variable(), None);
    }
}
