//! End-to-end pipeline tests over the `run_source` surface.

use mica::{run_source, MemoryEvent, PipelineError};
use pretty_assertions::assert_eq;

#[test]
fn test_run_source_happy_path() {
    let mut lines = Vec::new();
    run_source(
        "fn main():\n    print(\"Hello, World!\")\n",
        |line| lines.push(line),
        |_| {},
    )
    .unwrap();
    assert_eq!(lines, vec!["Hello, World!".to_string()]);
}

#[test]
fn test_run_source_stops_on_diagnostics() {
    let source = "struct U:\n    name: str\nfn main():\n    let a: U = U { name: \"x\" }\n    let b: U = a\n    print(a.name)\n";
    let mut lines = Vec::new();
    let result = run_source(source, |line| lines.push(line), |_| {});

    let Err(PipelineError::Rejected(diagnostics)) = result else {
        panic!("expected rejection, got {:?}", result.err());
    };
    assert!(diagnostics
        .iter()
        .any(|d| d.to_string().contains("Use of moved value 'a'")));
    // Rejected programs never execute
    assert!(lines.is_empty());
}

#[test]
fn test_run_source_surfaces_parse_errors() {
    let result = run_source("fn main(:\n", |_| {}, |_| {});
    assert!(matches!(result, Err(PipelineError::Parse(_))));
}

#[test]
fn test_run_source_surfaces_runtime_errors_with_output() {
    let source = "fn main():\n    print(\"before\")\n    print(to_string(1 / 0))\n";
    let mut lines = Vec::new();
    let result = run_source(source, |line| lines.push(line), |_| {});

    assert!(matches!(result, Err(PipelineError::Runtime(_))));
    // Output produced before the failure is preserved
    assert_eq!(lines, vec!["before".to_string()]);
}

#[test]
fn test_event_stream_serializes_for_hosts() {
    let mut events: Vec<MemoryEvent> = Vec::new();
    run_source(
        "fn main():\n    let x: int = 1\n",
        |_| {},
        |event| events.push(event),
    )
    .unwrap();

    let lines: Vec<String> = events
        .iter()
        .map(|e| serde_json::to_string(e).unwrap())
        .collect();

    assert!(lines.iter().any(|l| l.contains("\"ENTER_SCOPE\"")));
    assert!(lines.iter().any(|l| l.contains("\"DECLARE\"")));
    assert!(lines.iter().any(|l| l.contains("\"EXIT_SCOPE\"")));

    let first: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
    assert_eq!(first["kind"], "ENTER_SCOPE");
    assert!(first["scopeId"].is_number());
}

#[test]
fn test_pipeline_is_deterministic() {
    let source = "fn main():\n    for n in range(3):\n        print(to_string(n * n))\n";

    let mut first = (Vec::new(), Vec::new());
    run_source(source, |l| first.0.push(l), |e| first.1.push(e)).unwrap();

    let mut second = (Vec::new(), Vec::new());
    run_source(source, |l| second.0.push(l), |e| second.1.push(e)).unwrap();

    assert_eq!(first.0, second.0);
    assert_eq!(first.1, second.1);
}
