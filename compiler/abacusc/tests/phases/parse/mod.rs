//! Parser phase tests.
//!
//! Validates the canonical tree form produced for the standard grammar:
//! - Precedence and associativity of every standard operator
//! - Unary minus detection
//! - Function calls with and without parentheses
//! - Assignment forms
//! - Failure categories for malformed input
//!
//! # Test Organization
//!
//! - `grammar` - Golden tree forms
//! - `errors` - Tokenize and parse failures

mod errors;
mod grammar;
