//! Garnet CLI
//!
//! `garnet` starts a REPL, `garnet <file>` runs a script.

use std::io::{self, BufRead, Write};
use std::process;

use garnet::{
    ast_listing, exit_code, token_listing, Session, EXIT_COMPILE_ERROR, EXIT_NO_INPUT, EXIT_OK,
    EXIT_USAGE,
};
use garnet_diagnostic::DiagnosticQueue;

/// Install the tracing subscriber when `GARNET_LOG` is set.
///
/// `GARNET_LOG=garnet_eval=debug garnet script.rb` traces every function
/// call as an indented tree on stderr.
fn init_tracing() {
    use tracing_subscriber::{prelude::*, EnvFilter};

    let Ok(filter) = EnvFilter::try_from_env("GARNET_LOG") else {
        return;
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_tree::HierarchicalLayer::new(2)
                .with_targets(true)
                .with_bracketed_fields(true),
        )
        .init();
}

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let code = match args.first().map(String::as_str) {
        None => repl(),
        Some("help" | "--help" | "-h") => {
            print_usage();
            EXIT_OK
        }
        Some("version" | "--version" | "-V") => {
            println!("Garnet {}", env!("CARGO_PKG_VERSION"));
            EXIT_OK
        }
        Some("run") => with_single_file(&args[1..], "run", run_file),
        Some("lex") => with_single_file(&args[1..], "lex", lex_file),
        Some("parse") => with_single_file(&args[1..], "parse", parse_file),
        Some(_) => with_single_file(&args, "", run_file),
    };
    process::exit(code);
}

fn print_usage() {
    println!("Garnet - a small Ruby-flavoured scripting language");
    println!();
    println!("Usage: garnet [command] [file]");
    println!();
    println!("Commands:");
    println!("  <file>               Run a script");
    println!("  run <file>           Run a script");
    println!("  lex <file>           Print the token stream");
    println!("  parse <file>         Print the syntax tree");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("With no arguments, starts an interactive session.");
    println!();
    println!("Environment:");
    println!("  GARNET_LOG=<filter>  Enable tracing, e.g. GARNET_LOG=garnet_eval=debug");
}

/// Exactly one file argument, or a usage error.
fn with_single_file(args: &[String], command: &str, f: fn(&str, &str) -> i32) -> i32 {
    match args {
        [path] => match std::fs::read_to_string(path) {
            Ok(source) => f(path, &source),
            Err(err) => {
                eprintln!("error: cannot read '{path}': {err}");
                EXIT_NO_INPUT
            }
        },
        _ => {
            if command.is_empty() {
                eprintln!("Usage: garnet [script]");
            } else {
                eprintln!("Usage: garnet {command} <file>");
            }
            EXIT_USAGE
        }
    }
}

fn run_file(_path: &str, source: &str) -> i32 {
    let result = Session::new().run(source);
    if let Err(err) = &result {
        eprintln!("{err}");
    }
    exit_code(&result)
}

fn lex_file(_path: &str, source: &str) -> i32 {
    let lexed = garnet_lexer::lex(source);
    print!("{}", token_listing(&lexed.tokens));

    let mut queue = DiagnosticQueue::new();
    queue.extend(lexed.diagnostics());
    report_compile_errors(&mut queue)
}

fn parse_file(_path: &str, source: &str) -> i32 {
    let lexed = garnet_lexer::lex(source);
    let parsed = garnet_parse::parse(&lexed.tokens);
    print!("{}", ast_listing(&parsed.statements));

    let mut queue = DiagnosticQueue::new();
    queue.extend(lexed.diagnostics());
    queue.extend(parsed.diagnostics());
    report_compile_errors(&mut queue)
}

fn report_compile_errors(queue: &mut DiagnosticQueue) -> i32 {
    if queue.has_errors().is_none() {
        return EXIT_OK;
    }
    for diag in queue.flush() {
        eprintln!("{diag}");
    }
    EXIT_COMPILE_ERROR
}

/// Read-eval-print loop over stdin. Errors are reported and the session
/// carries on; end of input exits cleanly.
fn repl() -> i32 {
    let mut session = Session::new();
    let stdin = io::stdin();
    let mut line = String::new();

    loop {
        print!("> ");
        let _ = io::stdout().flush();

        line.clear();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => {
                println!();
                return EXIT_OK;
            }
            Ok(_) => {}
            Err(err) => {
                eprintln!("error: {err}");
                return EXIT_NO_INPUT;
            }
        }

        let mut source = line.trim_end_matches(['\n', '\r']).to_owned();
        source.push('\n');
        if let Err(err) = session.run(&source) {
            eprintln!("{err}");
        }
    }
}
