//! Library surface for hosts.
//!
//! The pipeline is strictly sequential: lex, parse, analyze, run. Hosts
//! call `analyze` and only proceed to `run` when the diagnostic list is
//! empty; `run_source` packages that policy.

use mica_parser::ast::Program;
use mica_parser::error::{LexError, ParseError};
use mica_parser::lexer::SpannedToken;
use thiserror::Error;

use crate::analysis::{self, Diagnostic};
use crate::events::MemoryEvent;
use crate::interp::{Interpreter, RuntimeError};

/// Tokenize a source string eagerly, stopping at the first lexical error.
pub fn lex(source: &str) -> Result<Vec<SpannedToken<'_>>, LexError> {
    let mut tokens = Vec::new();
    for result in mica_parser::tokenize(source) {
        tokens.push(result?);
    }
    Ok(tokens)
}

/// Parse a source string into a [`Program`].
pub fn parse(source: &str) -> Result<Program, ParseError> {
    mica_parser::parse(source)
}

/// Analyze a program, returning every diagnostic. Source-level problems
/// never abort the analyzer.
pub fn analyze(program: &Program) -> Vec<Diagnostic> {
    analysis::analyze(program)
}

/// Execute a program, sending output lines and memory events to the given
/// sinks. Callers are expected to have analyzed the program first.
pub fn run(
    program: &Program,
    on_output: impl FnMut(String),
    on_event: impl FnMut(MemoryEvent),
) -> Result<(), RuntimeError> {
    Interpreter::new(on_output, on_event).run(program)
}

/// Failure of the whole pipeline, by stage.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("analysis rejected the program with {} diagnostic(s)", .0.len())]
    Rejected(Vec<Diagnostic>),

    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

/// Parse, analyze, and (when analysis is clean) run a source string.
pub fn run_source(
    source: &str,
    on_output: impl FnMut(String),
    on_event: impl FnMut(MemoryEvent),
) -> Result<(), PipelineError> {
    let program = parse(source)?;
    let diagnostics = analyze(&program);
    if !diagnostics.is_empty() {
        return Err(PipelineError::Rejected(diagnostics));
    }
    run(&program, on_output, on_event)?;
    Ok(())
}
