//! Operator grammar attributes.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Associativity {
    Left,
    Right,
}

/// Where an operator sits relative to its operand(s).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Fixity {
    /// `a OP b`
    Infix,
    /// `OP a`
    Prefix,
    /// `a OP`
    Postfix,
}

impl Fixity {
    #[inline]
    pub fn is_unary(self) -> bool {
        !matches!(self, Fixity::Infix)
    }

    /// Number of operands the operator consumes.
    #[inline]
    pub fn arity(self) -> usize {
        if self.is_unary() {
            1
        } else {
            2
        }
    }
}

impl fmt::Display for Fixity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Fixity::Infix => "infix",
            Fixity::Prefix => "prefix",
            Fixity::Postfix => "postfix",
        })
    }
}

/// How the parser treats an operator name.
///
/// Higher `precedence` binds tighter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct OperatorSpec {
    pub associativity: Associativity,
    pub fixity: Fixity,
    pub precedence: i32,
}

impl OperatorSpec {
    pub const fn new(associativity: Associativity, fixity: Fixity, precedence: i32) -> Self {
        OperatorSpec {
            associativity,
            fixity,
            precedence,
        }
    }

    pub const fn infix(associativity: Associativity, precedence: i32) -> Self {
        Self::new(associativity, Fixity::Infix, precedence)
    }

    pub const fn prefix(precedence: i32) -> Self {
        Self::new(Associativity::Left, Fixity::Prefix, precedence)
    }

    pub const fn postfix(precedence: i32) -> Self {
        Self::new(Associativity::Left, Fixity::Postfix, precedence)
    }
}
