//! Line-oriented session over one [`Abacus`].
//!
//! Every line is calculated against the same context, so assignments and
//! definitions carry over. Lines starting with `:` are session commands.

use std::io::{self, BufRead, Write};
use std::time::Duration;

use super::{describe, eval_expression};
use crate::Abacus;

const HELP: &str = "\
:vars          list variables and definitions
:doc <name>    show documentation
:reload        reload plugins and clear bindings
:quit          leave the session
";

/// Read lines from `input` until EOF or `:quit`, writing results and errors
/// to `output`.
pub fn run_repl(
    abacus: &mut Abacus,
    timeout: Option<Duration>,
    input: impl BufRead,
    mut output: impl Write,
) -> io::Result<()> {
    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match line {
            ":quit" | ":q" | "exit" => break,
            ":help" => output.write_all(HELP.as_bytes())?,
            ":reload" => {
                abacus.reload();
                writeln!(output, "reloaded")?;
            }
            ":vars" => list_bindings(abacus, &mut output)?,
            _ => {
                if let Some(name) = line.strip_prefix(":doc") {
                    match describe(abacus, name.trim()) {
                        Some(text) => output.write_all(text.as_bytes())?,
                        None => writeln!(output, "no documentation for '{}'", name.trim())?,
                    }
                    continue;
                }
                match eval_expression(abacus, line, timeout) {
                    Ok(value) => writeln!(output, "{value}")?,
                    Err(e) => writeln!(output, "error: {e}")?,
                }
            }
        }
        output.flush()?;
    }
    Ok(())
}

fn list_bindings(abacus: &Abacus, output: &mut impl Write) -> io::Result<()> {
    let context = abacus.context();
    for name in context.variables() {
        if let Some(value) = context.variable(name) {
            writeln!(output, "{name} = {value}")?;
        }
    }
    for name in context.definitions() {
        if let Some(tree) = context.definition(name) {
            writeln!(output, "{name} := {tree}")?;
        }
    }
    Ok(())
}
