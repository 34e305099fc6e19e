//! Command handlers for the `abacus` CLI.
//!
//! Handlers return their output as text instead of printing it, so the
//! binary decides where it goes and tests can compare it directly.

mod repl;

use std::fmt::Write as _;
use std::time::Duration;

use abacus_diagnostic::AbacusResult;

use crate::{Abacus, Configuration};

pub use repl::run_repl;

/// Options shared by every command.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CliOptions {
    pub configuration: Configuration,
    pub timeout: Option<Duration>,
}

/// Split `args` into options and positional arguments.
///
/// `configuration` is the starting point, usually read from the
/// environment; flags override it.
pub fn parse_options(
    args: &[String],
    configuration: Configuration,
) -> Result<(CliOptions, Vec<String>), String> {
    let mut options = CliOptions {
        configuration,
        timeout: None,
    };
    let mut positional = Vec::new();
    for arg in args {
        if options.configuration.apply_flag(arg) {
            continue;
        }
        if let Some(millis) = arg.strip_prefix("--timeout=") {
            let millis: u64 = millis
                .parse()
                .map_err(|_| format!("invalid timeout '{millis}', expected milliseconds"))?;
            options.timeout = Some(Duration::from_millis(millis));
        } else if arg.starts_with("--") {
            return Err(format!("unknown option '{arg}'"));
        } else {
            positional.push(arg.clone());
        }
    }
    Ok((options, positional))
}

/// Evaluate `text` and render the value.
pub fn eval_expression(
    abacus: &mut Abacus,
    text: &str,
    timeout: Option<Duration>,
) -> AbacusResult<String> {
    let value = match timeout {
        Some(limit) => abacus.calculate_with_timeout(text, limit)?,
        None => abacus.calculate(text)?,
    };
    Ok(value.to_string())
}

/// The canonical parenthesized form of `text`.
pub fn parse_expression(abacus: &Abacus, text: &str) -> AbacusResult<String> {
    Ok(abacus.parse(text)?.to_string())
}

/// One line per token.
pub fn lex_expression(abacus: &Abacus, text: &str) -> AbacusResult<String> {
    let tokens = abacus.tokenize(text)?;
    let mut out = String::new();
    for token in &tokens {
        let _ = writeln!(out, "{token}");
    }
    Ok(out)
}

/// Help text for `name`, or the entries mentioning it when no function has
/// that exact name.
pub fn describe(abacus: &Abacus, name: &str) -> Option<String> {
    if let Some(entry) = abacus.documentation(name) {
        return Some(format!(
            "{} ({})\n  {}\n\n{}\n",
            entry.name, entry.code_name, entry.description, entry.long_description
        ));
    }
    let related = abacus.search_documentation(name);
    if related.is_empty() {
        return None;
    }
    let mut out = String::new();
    for entry in related {
        let _ = writeln!(out, "{:<8} {}", entry.code_name, entry.description);
    }
    Some(out)
}
