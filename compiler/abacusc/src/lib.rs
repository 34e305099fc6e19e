//! Abacus front end.
//!
//! Ties the pieces together:
//!
//! ```text
//! text ──► LexerTokenizer ──► Vec<Token>
//!                                 │
//!                                 ▼
//!                      ShuntingYardParser ──► TreeNode
//!                                                 │
//!                                                 ▼
//!                              Reducer (Registry, EvaluationContext) ──► Number
//! ```
//!
//! [`Abacus`] owns one loaded plugin set and the context that persists
//! between calculations. The `abacus` binary is a thin shell over it.

mod abacus;
pub mod commands;
mod config;

use std::sync::Once;

pub use abacus::Abacus;
pub use config::{Configuration, DEFAULT_NUMBER_IMPLEMENTATION, NUMBER_ENV};

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber writing to stderr when `RUST_LOG` is set.
/// Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}
