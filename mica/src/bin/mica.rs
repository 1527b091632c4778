//! Mica command-line interface
//!
//! Usage:
//!   mica file.mica                  # Analyze and run a program
//!   mica file.mica --tokens         # Print the token stream and exit
//!   mica file.mica --emit-ast       # Print the AST as JSON and exit
//!   mica file.mica --emit-events    # After the run, print the memory
//!                                   # event trace as JSON lines

use std::env;
use std::fs;
use std::process::ExitCode;

use mica::events::MemoryEvent;

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();

    let mut path = None;
    let mut tokens = false;
    let mut emit_ast = false;
    let mut emit_events = false;

    for arg in &args {
        match arg.as_str() {
            "--tokens" => tokens = true,
            "--emit-ast" => emit_ast = true,
            "--emit-events" => emit_events = true,
            "--help" | "-h" => {
                print_usage();
                return ExitCode::SUCCESS;
            }
            other if other.starts_with("--") => {
                eprintln!("unknown option: {}", other);
                print_usage();
                return ExitCode::FAILURE;
            }
            other => path = Some(other.to_string()),
        }
    }

    let Some(path) = path else {
        print_usage();
        return ExitCode::FAILURE;
    };

    let source = match fs::read_to_string(&path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("error: cannot read {}: {}", path, e);
            return ExitCode::FAILURE;
        }
    };

    if tokens {
        return print_tokens(&source);
    }

    let program = match mica::parse(&source) {
        Ok(program) => program,
        Err(e) => {
            eprintln!("parse error: {}", e);
            let context = e.format_with_context(&source);
            if !context.is_empty() {
                eprintln!("{}", context);
            }
            return ExitCode::FAILURE;
        }
    };

    if emit_ast {
        match serde_json::to_string_pretty(&program) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("error: cannot serialize AST: {}", e);
                return ExitCode::FAILURE;
            }
        }
        return ExitCode::SUCCESS;
    }

    let diagnostics = mica::analyze(&program);
    if !diagnostics.is_empty() {
        eprintln!("{} diagnostic(s):", diagnostics.len());
        for diagnostic in &diagnostics {
            eprintln!("  {}", diagnostic);
        }
        return ExitCode::FAILURE;
    }

    let mut trace: Vec<MemoryEvent> = Vec::new();
    let result = mica::run(
        &program,
        |line| println!("{}", line),
        |event| {
            if emit_events {
                trace.push(event);
            }
        },
    );

    if let Err(e) = result {
        eprintln!("runtime error: {}", e);
        return ExitCode::FAILURE;
    }

    for event in &trace {
        match serde_json::to_string(event) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("error: cannot serialize event: {}", e);
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}

fn print_tokens(source: &str) -> ExitCode {
    match mica::lex(source) {
        Ok(tokens) => {
            for token in tokens {
                println!(
                    "{}:{}\t{:?}\t{}",
                    token.span.start_line, token.span.start_column, token.token, token.text
                );
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("lex error: {}", e);
            let context = e.format_with_context(source);
            if !context.is_empty() {
                eprintln!("{}", context);
            }
            ExitCode::FAILURE
        }
    }
}

fn print_usage() {
    eprintln!("Usage: mica <file> [--tokens] [--emit-ast] [--emit-events]");
}
