//! mica
//!
//! Static analyzer and tracing interpreter for Mica, a small
//! statically-typed, indentation-delimited teaching language. The
//! pipeline runs lexer, parser, analyzer, and interpreter in sequence;
//! the interpreter emits a memory-event trace (scope lifetimes, binding
//! declarations, updates, and moves) suitable for stepwise visualization.
//!
//! # Example
//!
//! ```
//! let program = mica::parse("fn main():\n    print(\"Hello, World!\")\n").unwrap();
//! assert!(mica::analyze(&program).is_empty());
//!
//! let mut lines = Vec::new();
//! mica::run(&program, |line| lines.push(line), |_event| {}).unwrap();
//! assert_eq!(lines, vec!["Hello, World!".to_string()]);
//! ```

pub mod analysis;
pub mod api;
pub mod events;
pub mod interp;

// Re-export the front end so hosts depend on one crate
pub use mica_parser::{ast, error, span, token, types};

pub use analysis::{Analyzer, Diagnostic};
pub use api::{analyze, lex, parse, run, run_source, PipelineError};
pub use events::MemoryEvent;
pub use interp::{Interpreter, RuntimeError, Value};

#[cfg(test)]
mod tests {
    #[test]
    fn test_pipeline_surface() {
        let source = "fn main():\n    let x: int = 2 + 3\n    print(to_string(x))\n";

        let tokens = crate::lex(source).unwrap();
        assert!(!tokens.is_empty());

        let program = crate::parse(source).unwrap();
        assert!(crate::analyze(&program).is_empty());

        let mut lines = Vec::new();
        crate::run(&program, |line| lines.push(line), |_| {}).unwrap();
        assert_eq!(lines, vec!["5".to_string()]);
    }
}
