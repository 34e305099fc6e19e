//! Token kinds produced by the tokenizer.

use std::cmp::Ordering;
use std::fmt;

/// What a lexeme was recognized as.
///
/// The priority only matters when two patterns match the same number of
/// characters: `sin` is both a registered function and a valid variable
/// name, and the function wins because it ranks higher.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenType {
    /// Sentinel the parser places in front of a function's arguments.
    InternalFunctionEnd,
    Any,
    Whitespace,
    Comma,
    Variable,
    Op,
    TreeValueOp,
    Num,
    Function,
    TreeValueFunction,
    OpenParen,
    CloseParen,
}

impl TokenType {
    pub fn priority(self) -> i32 {
        match self {
            TokenType::InternalFunctionEnd => -1,
            TokenType::Any => 0,
            TokenType::Whitespace => 1,
            TokenType::Comma => 2,
            TokenType::Variable => 3,
            TokenType::Op | TokenType::TreeValueOp => 4,
            TokenType::Num => 5,
            TokenType::Function | TokenType::TreeValueFunction => 6,
            TokenType::OpenParen | TokenType::CloseParen => 7,
        }
    }

    /// Tie-break used by the lexer: higher priority sorts later and wins.
    pub fn by_priority(a: &TokenType, b: &TokenType) -> Ordering {
        a.priority().cmp(&b.priority())
    }

    #[inline]
    pub fn is_operator(self) -> bool {
        matches!(self, TokenType::Op | TokenType::TreeValueOp)
    }

    #[inline]
    pub fn is_function(self) -> bool {
        matches!(self, TokenType::Function | TokenType::TreeValueFunction)
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TokenType::InternalFunctionEnd => "function-end",
            TokenType::Any => "any",
            TokenType::Whitespace => "whitespace",
            TokenType::Comma => "comma",
            TokenType::Variable => "variable",
            TokenType::Op => "operator",
            TokenType::TreeValueOp => "tree-value operator",
            TokenType::Num => "number",
            TokenType::Function => "function",
            TokenType::TreeValueFunction => "tree-value function",
            TokenType::OpenParen => "open paren",
            TokenType::CloseParen => "close paren",
        })
    }
}

/// A lexeme and its kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenType,
    pub lexeme: String,
}

impl Token {
    pub fn new(kind: TokenType, lexeme: impl Into<String>) -> Self {
        Token {
            kind,
            lexeme: lexeme.into(),
        }
    }

    pub(crate) fn function_end() -> Self {
        Token::new(TokenType::InternalFunctionEnd, "")
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?})", self.kind, self.lexeme)
    }
}
