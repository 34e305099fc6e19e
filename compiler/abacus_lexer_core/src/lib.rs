//! Standalone pattern compiler and longest-match lexer.
//!
//! This crate has no knowledge of expressions, operators, or numbers. It
//! compiles a small regex dialect into a nondeterministic automaton
//! ([`Pattern`]) and runs every registered automaton in lockstep over the
//! input ([`Lexer`]), returning the longest match at each position.
//!
//! # Regex dialect
//!
//! | Syntax     | Meaning                                  |
//! |------------|------------------------------------------|
//! | `c`        | literal character                        |
//! | `\c`       | escaped literal (any character)          |
//! | `.`        | any single character                     |
//! | `[ab0-9]`  | class of literals and inclusive ranges   |
//! | `(...)`    | grouping                                 |
//! | `a\|b`     | alternation                              |
//! | `x+`       | one or more                              |
//! | `x*`       | zero or more                             |
//! | `x?`       | zero or one                              |
//!
//! Malformed patterns fail to compile with a [`PatternError`]; the lexer
//! simply refuses to register them.

mod lexer;
mod pattern;

pub use lexer::{Lexer, Match};
pub use pattern::{sanitize, NodeId, NodeKind, Pattern, PatternError, PatternNode};
