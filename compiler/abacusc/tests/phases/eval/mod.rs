//! Evaluation phase tests.
//!
//! Validates the whole pipeline from text to value:
//! - Golden values in the `precise` implementation
//! - Agreement between `naive` and `precise`
//! - Domain failures
//! - Variables, definitions and reloads
//! - Timeouts and disabled plugins
//!
//! # Test Organization
//!
//! - `values` - Golden values and cross-implementation agreement
//! - `context` - Bindings, reloads and configuration
//! - `cancellation` - Timeouts

mod cancellation;
mod context;
mod values;
