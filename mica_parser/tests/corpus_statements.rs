//! Statement-level parser tests.

use mica_parser::ast::{Pattern, PatternBinding, Stmt, VariantKind};
use mica_parser::types::Type;
use mica_parser::parse;
use pretty_assertions::assert_eq;

fn parse_ok(source: &str) -> Vec<Stmt> {
    parse(source)
        .unwrap_or_else(|e| panic!("failed to parse:\n{}\nerror: {}", source, e))
        .items
}

fn parse_one(source: &str) -> Stmt {
    let mut items = parse_ok(source);
    assert_eq!(items.len(), 1, "expected one statement in: {}", source);
    items.remove(0)
}

// =============================================================================
// Function definitions
// =============================================================================

#[test]
fn test_function_definition() {
    let Stmt::Function(f) = parse_one("fn add(a: int, b: int) -> int:\n    return a + b\n")
    else {
        panic!("expected function");
    };
    assert_eq!(f.name, "add");
    assert_eq!(f.params.len(), 2);
    assert_eq!(f.params[0].name, "a");
    assert_eq!(f.params[0].ty, Type::Int);
    assert_eq!(f.return_type, Some(Type::Int));
    assert_eq!(f.body.stmts.len(), 1);
}

#[test]
fn test_function_without_return_type() {
    let Stmt::Function(f) = parse_one("fn greet(name: str):\n    print(name)\n") else {
        panic!("expected function");
    };
    assert_eq!(f.return_type, None);
}

#[test]
fn test_function_multiline_params() {
    // Brackets suppress layout, so parameter lists may span lines
    let Stmt::Function(f) = parse_one("fn add(\n    a: int,\n    b: int\n) -> int:\n    return a + b\n")
    else {
        panic!("expected function");
    };
    assert_eq!(f.params.len(), 2);
}

// =============================================================================
// Struct definitions
// =============================================================================

#[test]
fn test_struct_definition() {
    let Stmt::Struct(s) = parse_one("struct Point:\n    x: int\n    y: int\n") else {
        panic!("expected struct");
    };
    assert_eq!(s.name, "Point");
    assert_eq!(s.type_param, None);
    assert_eq!(s.fields.len(), 2);
    assert_eq!(s.fields[1].name, "y");
}

#[test]
fn test_generic_struct_definition() {
    let Stmt::Struct(s) = parse_one("struct Box<T>:\n    value: T\n") else {
        panic!("expected struct");
    };
    assert_eq!(s.type_param.as_deref(), Some("T"));
    assert_eq!(s.fields[0].ty, Type::named("T"));
}

// =============================================================================
// Enum definitions
// =============================================================================

#[test]
fn test_enum_definition_variant_kinds() {
    let Stmt::Enum(e) = parse_one(
        "enum Shape:\n    Empty\n    Circle { radius: int }\n    Pair(int, int)\n",
    ) else {
        panic!("expected enum");
    };
    assert_eq!(e.name, "Shape");
    assert_eq!(e.variants.len(), 3);
    assert_eq!(e.variants[0].kind, VariantKind::Unit);
    assert_eq!(e.variants[1].kind, VariantKind::Struct);
    assert_eq!(e.variants[1].fields[0].name, "radius");
    assert_eq!(e.variants[2].kind, VariantKind::Tuple);
    assert_eq!(e.variants[2].fields.len(), 2);
    assert_eq!(e.variants[2].fields[0].name, "0");
}

// =============================================================================
// Traits and impls
// =============================================================================

#[test]
fn test_trait_definition() {
    let Stmt::Trait(t) = parse_one("trait Show:\n    fn desc() -> str\n") else {
        panic!("expected trait");
    };
    assert_eq!(t.name, "Show");
    assert_eq!(t.methods.len(), 1);
    assert_eq!(t.methods[0].name, "desc");
    assert_eq!(t.methods[0].return_type, Some(Type::Str));
}

#[test]
fn test_impl_block() {
    let Stmt::Impl(i) = parse_one(
        "impl Show for Point:\n    fn desc() -> str:\n        return \"point\"\n",
    ) else {
        panic!("expected impl");
    };
    assert_eq!(i.trait_name, "Show");
    assert_eq!(i.target, Type::named("Point"));
    assert_eq!(i.methods.len(), 1);
}

#[test]
fn test_impl_for_generic_target() {
    let Stmt::Impl(i) = parse_one(
        "impl Show for P<int>:\n    fn desc() -> str:\n        return \"p\"\n",
    ) else {
        panic!("expected impl");
    };
    assert_eq!(i.target.to_string(), "P<int>");
}

// =============================================================================
// Extern declarations
// =============================================================================

#[test]
fn test_extern_fn() {
    let Stmt::ExternFn(e) = parse_one("extern fn alert(msg: str)\n") else {
        panic!("expected extern fn");
    };
    assert_eq!(e.name, "alert");
    assert_eq!(e.params.len(), 1);
}

#[test]
fn test_extern_fn_return_type_rejected() {
    assert!(parse("extern fn f(x: int) -> int\n").is_err());
}

// =============================================================================
// Let / assignment
// =============================================================================

#[test]
fn test_let_forms() {
    let Stmt::VarDecl(v) = parse_one("let x: int = 1\n") else {
        panic!("expected var decl");
    };
    assert_eq!(v.name, "x");
    assert_eq!(v.ty, Some(Type::Int));
    assert!(!v.mutable);
    assert!(v.init.is_some());

    let Stmt::VarDecl(v) = parse_one("let mut count = 0\n") else {
        panic!("expected var decl");
    };
    assert!(v.mutable);
    assert_eq!(v.ty, None);

    let Stmt::VarDecl(v) = parse_one("let pending: [int]\n") else {
        panic!("expected var decl");
    };
    assert!(v.init.is_none());
    assert_eq!(v.ty, Some(Type::Array(Box::new(Type::Int))));

    // `any` and `[any]` are the sentinel, not a nominal type
    let Stmt::VarDecl(v) = parse_one("let anything: any = 1\n") else {
        panic!("expected var decl");
    };
    assert_eq!(v.ty, Some(Type::Any));

    let Stmt::VarDecl(v) = parse_one("let mixed: [any] = []\n") else {
        panic!("expected var decl");
    };
    assert_eq!(v.ty, Some(Type::Array(Box::new(Type::Any))));
}

#[test]
fn test_destructuring() {
    let Stmt::Destructuring(d) = parse_one("let (a, b) = pair\n") else {
        panic!("expected destructuring");
    };
    assert_eq!(d.names, vec!["a".to_string(), "b".to_string()]);
    assert!(!d.mutable);
}

#[test]
fn test_assignment_vs_expression_statement() {
    assert!(matches!(parse_one("x = 1\n"), Stmt::Assignment(_)));
    assert!(matches!(parse_one("x == 1\n"), Stmt::Expr(_)));
    assert!(matches!(parse_one("f(x)\n"), Stmt::Expr(_)));
}

// =============================================================================
// Control flow
// =============================================================================

#[test]
fn test_if_else() {
    let Stmt::If(i) = parse_one("if ready:\n    go()\nelse:\n    wait()\n") else {
        panic!("expected if");
    };
    assert_eq!(i.then_block.stmts.len(), 1);
    assert!(i.else_block.is_some());
}

#[test]
fn test_if_without_else() {
    let Stmt::If(i) = parse_one("if ready:\n    go()\n") else {
        panic!("expected if");
    };
    assert!(i.else_block.is_none());
}

#[test]
fn test_while() {
    let Stmt::While(w) = parse_one("while n < 10:\n    n = n + 1\n") else {
        panic!("expected while");
    };
    assert_eq!(w.body.stmts.len(), 1);
}

#[test]
fn test_for() {
    let Stmt::For(f) = parse_one("for item in range(3):\n    print(item)\n") else {
        panic!("expected for");
    };
    assert_eq!(f.item, "item");
}

#[test]
fn test_return_with_and_without_value() {
    let src = "fn f() -> int:\n    return 1\nfn g():\n    return\n";
    let items = parse_ok(src);
    let Stmt::Function(f) = &items[0] else {
        panic!("expected function");
    };
    let Stmt::Return(r) = &f.body.stmts[0] else {
        panic!("expected return");
    };
    assert!(r.value.is_some());

    let Stmt::Function(g) = &items[1] else {
        panic!("expected function");
    };
    let Stmt::Return(r) = &g.body.stmts[0] else {
        panic!("expected return");
    };
    assert!(r.value.is_none());
}

// =============================================================================
// Match
// =============================================================================

#[test]
fn test_match_patterns() {
    let src = "match s:\n    State::Stopped { reason } => print(reason)\n    Some(x) => print(x)\n    None => print(\"none\")\n    1 => print(\"one\")\n    other => print(other)\n    _ => print(\"any\")\n";
    let Stmt::Match(m) = parse_one(src) else {
        panic!("expected match");
    };
    assert_eq!(m.cases.len(), 6);

    let Pattern::Enum {
        enum_name,
        variant,
        binding,
        ..
    } = &m.cases[0].pattern
    else {
        panic!("expected enum pattern");
    };
    assert_eq!(enum_name.as_deref(), Some("State"));
    assert_eq!(variant, "Stopped");
    assert_eq!(
        binding,
        &PatternBinding::Fields(vec!["reason".to_string()])
    );

    let Pattern::Enum {
        enum_name, binding, ..
    } = &m.cases[1].pattern
    else {
        panic!("expected sugar pattern");
    };
    assert_eq!(enum_name, &None);
    assert_eq!(binding, &PatternBinding::Inner("x".to_string()));

    assert!(matches!(&m.cases[2].pattern, Pattern::Enum { variant, .. } if variant == "None"));
    assert!(matches!(&m.cases[3].pattern, Pattern::Literal { .. }));
    assert!(matches!(&m.cases[4].pattern, Pattern::Binding { .. }));
    assert!(matches!(&m.cases[5].pattern, Pattern::Wildcard { .. }));
}

#[test]
fn test_match_braced_body() {
    let src = "match s:\n    _ => { print(\"a\") print(\"b\") }\n";
    let Stmt::Match(m) = parse_one(src) else {
        panic!("expected match");
    };
    assert_eq!(m.cases[0].body.stmts.len(), 2);
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn test_first_error_aborts() {
    assert!(parse("fn f(:\n").is_err());
    assert!(parse("let = 3\n").is_err());
    assert!(parse("if:\n    x\n").is_err());
}

#[test]
fn test_parser_is_deterministic() {
    let src = "struct P:\n    x: int\nfn main():\n    let p = P { x: 1 }\n    print(p.x)\n";
    let a = parse(src).unwrap();
    let b = parse(src).unwrap();
    assert_eq!(a, b);
}
