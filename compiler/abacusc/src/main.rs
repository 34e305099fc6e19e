//! Abacus calculator CLI.

use std::io;

use abacusc::commands::{
    describe, eval_expression, lex_expression, parse_expression, parse_options, run_repl,
};
use abacusc::{init_tracing, Abacus, Configuration};

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = args[1].as_str();
    if matches!(command, "help" | "--help" | "-h") {
        print_usage();
        return;
    }
    if matches!(command, "version" | "--version" | "-V") {
        println!("Abacus {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    let (options, rest) = match parse_options(&args[2..], Configuration::from_env()) {
        Ok(parsed) => parsed,
        Err(message) => {
            eprintln!("error: {message}");
            std::process::exit(1);
        }
    };
    let mut abacus = Abacus::new(options.configuration);
    let expression = rest.join(" ");

    match command {
        "eval" => {
            if rest.is_empty() {
                eprintln!("Usage: abacus eval <expression> [options]");
                std::process::exit(1);
            }
            match eval_expression(&mut abacus, &expression, options.timeout) {
                Ok(value) => println!("{value}"),
                Err(e) => fail(&e),
            }
        }
        "parse" => {
            if rest.is_empty() {
                eprintln!("Usage: abacus parse <expression>");
                std::process::exit(1);
            }
            match parse_expression(&abacus, &expression) {
                Ok(tree) => println!("{tree}"),
                Err(e) => fail(&e),
            }
        }
        "lex" => {
            if rest.is_empty() {
                eprintln!("Usage: abacus lex <expression>");
                std::process::exit(1);
            }
            match lex_expression(&abacus, &expression) {
                Ok(tokens) => print!("{tokens}"),
                Err(e) => fail(&e),
            }
        }
        "doc" => {
            if rest.is_empty() {
                eprintln!("Usage: abacus doc <name>");
                std::process::exit(1);
            }
            match describe(&abacus, &expression) {
                Some(text) => print!("{text}"),
                None => {
                    eprintln!("no documentation for '{expression}'");
                    std::process::exit(1);
                }
            }
        }
        "repl" => {
            let stdin = io::stdin();
            if let Err(e) = run_repl(&mut abacus, options.timeout, stdin.lock(), io::stdout()) {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn fail(error: &abacus_diagnostic::AbacusError) -> ! {
    eprintln!("error: {error}");
    std::process::exit(1);
}

fn print_usage() {
    println!("Abacus, an extensible expression calculator");
    println!();
    println!("Usage: abacus <command> [options]");
    println!();
    println!("Commands:");
    println!("  eval <expr>        Evaluate an expression and print the value");
    println!("  parse <expr>       Print the fully parenthesized tree");
    println!("  lex <expr>         Print the token stream");
    println!("  doc <name>         Show documentation for a function");
    println!("  repl               Start an interactive session");
    println!("  help               Show this help message");
    println!("  version            Show version information");
    println!();
    println!("Options:");
    println!("  --number=<name>    Number implementation: naive, precise (env: ABACUS_NUMBER)");
    println!("  --disable=<ids>    Comma-separated plugin ids to leave unloaded");
    println!("  --timeout=<ms>     Cancel evaluation after this many milliseconds");
    println!();
    println!("Set RUST_LOG (e.g. RUST_LOG=abacus_eval=debug) for tracing output.");
}
