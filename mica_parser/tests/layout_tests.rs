//! Layout invariants over the public tokenize/parse API.

use mica_parser::{parse, tokenize, LexError, Token};

const PROGRAMS: &[&str] = &[
    "fn main():\n    print(\"Hello, World!\")\n",
    "struct U:\n    name: str\nfn main():\n    let a: U = U { name: \"x\" }\n    let b: U = a\n    print(a.name)\n",
    "fn main():\n    let start: int = 10\n    let adder = |x|:\n        return x + start\n    print(to_string(adder(5)))\n",
    "enum State:\n    Idle\n    Stopped { reason: str }\nfn main():\n    let s: State = State::Stopped { reason: \"Done\" }\n    match s:\n        State::Stopped { reason } => print(\"Stopped: \" + reason)\n        State::Idle => print(\"Idle\")\n",
    "struct P<T>:\n    x: T\ntrait Show:\n    fn desc() -> str\nimpl Show for P<int>:\n    fn desc() -> str:\n        return \"x=\" + to_string(this.x)\nfn main():\n    let p: P<int> = P { x: 7 }\n    print(p.desc())\n",
    "fn main():\n    let mut total = 0\n    for n in range(5):\n        if n > 2:\n            total = total + n\n    while total > 0:\n        total = total - 1\n",
];

/// Every program that lexes successfully has balanced INDENT/DEDENT counts
/// and ends with a single EOF token.
#[test]
fn test_balanced_layout() {
    for source in PROGRAMS {
        let tokens: Vec<_> = tokenize(source)
            .into_iter()
            .map(|r| r.unwrap_or_else(|e| panic!("lex error in {:?}: {}", source, e)))
            .collect();

        let indents = tokens.iter().filter(|t| t.token == Token::Indent).count();
        let dedents = tokens.iter().filter(|t| t.token == Token::Dedent).count();
        assert_eq!(indents, dedents, "unbalanced layout in: {}", source);

        let eofs = tokens.iter().filter(|t| t.token == Token::Eof).count();
        assert_eq!(eofs, 1);
        assert_eq!(tokens.last().map(|t| t.token), Some(Token::Eof));
    }
}

/// The same corpus parses, and parses identically on repeat runs.
#[test]
fn test_corpus_parses_deterministically() {
    for source in PROGRAMS {
        let first = parse(source).unwrap_or_else(|e| panic!("parse error in {:?}: {}", source, e));
        let second = parse(source).unwrap_or_else(|e| panic!("parse error in {:?}: {}", source, e));
        assert_eq!(first, second);
    }
}

#[test]
fn test_dedent_to_unknown_level_is_an_error() {
    let source = "if a:\n      b\n   c\n";
    let has_indent_error = tokenize(source).iter().any(|r| {
        matches!(
            r,
            Err(LexError::InconsistentIndentation { .. })
        )
    });
    assert!(has_indent_error);
}

#[test]
fn test_error_positions_are_reported() {
    let err = parse("fn main():\n    let x = @\n").unwrap_err();
    let span = err.span();
    assert_eq!(span.start_line, 2);
}
