//! Failure taxonomy shared by every Abacus phase.
//!
//! Each phase reports failure as an [`AbacusError`] value instead of panicking,
//! so a front end can show a message and keep running. The error carries a
//! category ([`ErrorKind`]) for programmatic matching and a human-readable
//! detail string.
//!
//! Construct errors through the factory functions at the bottom of this module
//! (`division_by_zero()`, `unknown_operator(name)`, ...) rather than through the
//! variants directly; they keep the wording of common messages consistent.

use std::fmt;

/// Result alias used by all phases after lexing.
pub type AbacusResult<T> = Result<T, AbacusError>;

/// Fieldless failure category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// No pattern produced a non-empty match at some position.
    Tokenize,
    /// Mismatched parentheses, malformed call, trailing tokens.
    Parse,
    /// Argument outside a function's valid domain.
    Domain,
    /// No conversion path between two number representations.
    Promotion,
    /// A name is not bound in the current registry or context.
    Reduction,
    /// Cooperative cancellation was observed mid-evaluation.
    Cancelled,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Tokenize => "tokenize failure",
            ErrorKind::Parse => "parse failure",
            ErrorKind::Domain => "domain failure",
            ErrorKind::Promotion => "promotion failure",
            ErrorKind::Reduction => "reduction failure",
            ErrorKind::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A structured failure from any phase of the engine.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AbacusError {
    #[error("tokenize failure: {0}")]
    Tokenize(String),
    #[error("parse failure: {0}")]
    Parse(String),
    #[error("domain failure: {0}")]
    Domain(String),
    #[error("promotion failure: {0}")]
    Promotion(String),
    #[error("reduction failure: {0}")]
    Reduction(String),
    #[error("cancelled: {0}")]
    Cancelled(String),
}

impl AbacusError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AbacusError::Tokenize(_) => ErrorKind::Tokenize,
            AbacusError::Parse(_) => ErrorKind::Parse,
            AbacusError::Domain(_) => ErrorKind::Domain,
            AbacusError::Promotion(_) => ErrorKind::Promotion,
            AbacusError::Reduction(_) => ErrorKind::Reduction,
            AbacusError::Cancelled(_) => ErrorKind::Cancelled,
        }
    }

    /// The detail string without the category prefix.
    pub fn detail(&self) -> &str {
        match self {
            AbacusError::Tokenize(s)
            | AbacusError::Parse(s)
            | AbacusError::Domain(s)
            | AbacusError::Promotion(s)
            | AbacusError::Reduction(s)
            | AbacusError::Cancelled(s) => s,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.kind() == ErrorKind::Cancelled
    }
}

// Tokenize

#[cold]
pub fn no_token_at(offset: usize) -> AbacusError {
    AbacusError::Tokenize(format!("no token matches at offset {offset}"))
}

// Parse

#[cold]
pub fn mismatched_parentheses() -> AbacusError {
    AbacusError::Parse("mismatched parentheses".to_string())
}

#[cold]
pub fn missing_operand(op: &str) -> AbacusError {
    AbacusError::Parse(format!("operator '{op}' is missing an operand"))
}

#[cold]
pub fn unterminated_call(name: &str) -> AbacusError {
    AbacusError::Parse(format!("call to '{name}' is not terminated"))
}

#[cold]
pub fn trailing_tokens(count: usize) -> AbacusError {
    AbacusError::Parse(format!("{count} token(s) left over after parsing"))
}

#[cold]
pub fn empty_expression() -> AbacusError {
    AbacusError::Parse("expression is empty".to_string())
}

#[cold]
pub fn unknown_precedence(op: &str) -> AbacusError {
    AbacusError::Parse(format!("no precedence known for operator '{op}'"))
}

// Domain

#[cold]
pub fn division_by_zero() -> AbacusError {
    AbacusError::Domain("division by zero".to_string())
}

#[cold]
pub fn domain_error(function: &str, detail: impl fmt::Display) -> AbacusError {
    AbacusError::Domain(format!("{function}: {detail}"))
}

#[cold]
pub fn invalid_number(text: &str) -> AbacusError {
    AbacusError::Domain(format!("'{text}' is not a number"))
}

// Promotion

#[cold]
pub fn no_promotion_path(from: &str, to: &str) -> AbacusError {
    AbacusError::Promotion(format!("no promotion path from '{from}' to '{to}'"))
}

#[cold]
pub fn mixed_representations(left: &str, right: &str) -> AbacusError {
    AbacusError::Promotion(format!(
        "operands use different representations ('{left}' and '{right}')"
    ))
}

// Reduction

#[cold]
pub fn unknown_operator(name: &str) -> AbacusError {
    AbacusError::Reduction(format!("operator '{name}' is not registered"))
}

#[cold]
pub fn unknown_function(name: &str) -> AbacusError {
    AbacusError::Reduction(format!("function '{name}' is not registered"))
}

#[cold]
pub fn undefined_variable(name: &str) -> AbacusError {
    AbacusError::Reduction(format!("variable '{name}' is not defined"))
}

#[cold]
pub fn recursive_definition(name: &str) -> AbacusError {
    AbacusError::Reduction(format!("definition of '{name}' refers to itself"))
}

#[cold]
pub fn no_number_implementation() -> AbacusError {
    AbacusError::Reduction("no number implementation is loaded".to_string())
}

#[cold]
pub fn unknown_number_implementation(name: &str) -> AbacusError {
    AbacusError::Reduction(format!("number implementation '{name}' is not registered"))
}

// Cancelled

#[cold]
pub fn cancelled() -> AbacusError {
    AbacusError::Cancelled("evaluation was cancelled".to_string())
}

#[cold]
pub fn timed_out(millis: u128) -> AbacusError {
    AbacusError::Cancelled(format!("evaluation exceeded {millis} ms"))
}
