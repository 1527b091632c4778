//! Expression-level parser tests.

use mica_parser::ast::{
    BinaryOp, Callee, Expr, LiteralValue, Stmt, VariantKind, VariantPayload,
};
use mica_parser::parse;
use pretty_assertions::assert_eq;

fn parse_expr(source: &str) -> Expr {
    let mut items = parse(source)
        .unwrap_or_else(|e| panic!("failed to parse:\n{}\nerror: {}", source, e))
        .items;
    assert_eq!(items.len(), 1, "expected one statement in: {}", source);
    match items.remove(0) {
        Stmt::Expr(e) => e.expr,
        other => panic!("expected expression statement, got {:?}", other),
    }
}

// =============================================================================
// Literals
// =============================================================================

#[test]
fn test_literals() {
    assert!(matches!(
        parse_expr("42\n"),
        Expr::Literal {
            value: LiteralValue::Int(42),
            ..
        }
    ));
    assert!(matches!(
        parse_expr("true\n"),
        Expr::Literal {
            value: LiteralValue::Bool(true),
            ..
        }
    ));

    let Expr::Literal {
        value: LiteralValue::Str(s),
        ..
    } = parse_expr("\"hello\"\n")
    else {
        panic!("expected string literal");
    };
    assert_eq!(s, "hello");
}

#[test]
fn test_int_literal_overflow_is_an_error() {
    assert!(parse("99999999999999999999999999\n").is_err());
}

// =============================================================================
// Binary operators and precedence
// =============================================================================

#[test]
fn test_precedence_mul_over_add() {
    // 1 + 2 * 3 parses as 1 + (2 * 3)
    let Expr::Binary { op, rhs, .. } = parse_expr("1 + 2 * 3\n") else {
        panic!("expected binary");
    };
    assert_eq!(op, BinaryOp::Add);
    assert!(matches!(
        *rhs,
        Expr::Binary {
            op: BinaryOp::Mul,
            ..
        }
    ));
}

#[test]
fn test_precedence_add_over_comparison() {
    // a + 1 < b parses as (a + 1) < b
    let Expr::Binary { op, lhs, .. } = parse_expr("a + 1 < b\n") else {
        panic!("expected binary");
    };
    assert_eq!(op, BinaryOp::Lt);
    assert!(matches!(
        *lhs,
        Expr::Binary {
            op: BinaryOp::Add,
            ..
        }
    ));
}

#[test]
fn test_left_associativity() {
    // 10 - 2 - 3 parses as (10 - 2) - 3
    let Expr::Binary { op, lhs, .. } = parse_expr("10 - 2 - 3\n") else {
        panic!("expected binary");
    };
    assert_eq!(op, BinaryOp::Sub);
    assert!(matches!(
        *lhs,
        Expr::Binary {
            op: BinaryOp::Sub,
            ..
        }
    ));
}

#[test]
fn test_parenthesized_grouping() {
    // (1 + 2) * 3
    let Expr::Binary { op, lhs, .. } = parse_expr("(1 + 2) * 3\n") else {
        panic!("expected binary");
    };
    assert_eq!(op, BinaryOp::Mul);
    assert!(matches!(
        *lhs,
        Expr::Binary {
            op: BinaryOp::Add,
            ..
        }
    ));
}

// =============================================================================
// Collections
// =============================================================================

#[test]
fn test_array_literal() {
    let Expr::Array { elements, .. } = parse_expr("[1, 2, 3]\n") else {
        panic!("expected array");
    };
    assert_eq!(elements.len(), 3);

    let Expr::Array { elements, .. } = parse_expr("[]\n") else {
        panic!("expected array");
    };
    assert!(elements.is_empty());
}

#[test]
fn test_tuple_literal() {
    let Expr::Tuple { elements, .. } = parse_expr("(1, \"two\", true)\n") else {
        panic!("expected tuple");
    };
    assert_eq!(elements.len(), 3);
}

// =============================================================================
// Calls, members, indexing
// =============================================================================

#[test]
fn test_function_call() {
    let Expr::Call { callee, args, .. } = parse_expr("add(1, 2)\n") else {
        panic!("expected call");
    };
    assert_eq!(
        callee,
        Callee::Function {
            name: "add".to_string()
        }
    );
    assert_eq!(args.len(), 2);
}

#[test]
fn test_method_call() {
    let Expr::Call { callee, args, .. } = parse_expr("p.desc()\n") else {
        panic!("expected call");
    };
    let Callee::Method { receiver, method } = callee else {
        panic!("expected method callee");
    };
    assert!(matches!(*receiver, Expr::Identifier { ref name, .. } if name == "p"));
    assert_eq!(method, "desc");
    assert!(args.is_empty());
}

#[test]
fn test_postfix_chain() {
    // a.b[0].c: member, index, member
    let Expr::Member { object, field, .. } = parse_expr("a.b[0].c\n") else {
        panic!("expected member");
    };
    assert_eq!(field, "c");
    assert!(matches!(*object, Expr::Index { .. }));
}

#[test]
fn test_call_on_non_name_rejected() {
    assert!(parse("f()(1)\n").is_err());
    assert!(parse("[f][0](1)\n").is_err());
}

// =============================================================================
// Struct init and enum variants
// =============================================================================

#[test]
fn test_struct_init() {
    let Expr::StructInit { name, fields, .. } = parse_expr("Point { x: 1, y: 2 }\n") else {
        panic!("expected struct init");
    };
    assert_eq!(name, "Point");
    assert_eq!(fields.len(), 2);
    assert_eq!(fields[0].name, "x");
}

#[test]
fn test_enum_variant_forms() {
    let Expr::EnumVariant { kind, .. } = parse_expr("State::Idle\n") else {
        panic!("expected enum variant");
    };
    assert_eq!(kind, VariantKind::Unit);

    let Expr::EnumVariant { kind, payload, .. } =
        parse_expr("State::Stopped { reason: \"done\" }\n")
    else {
        panic!("expected enum variant");
    };
    assert_eq!(kind, VariantKind::Struct);
    assert!(matches!(payload, VariantPayload::Struct(fields) if fields.len() == 1));

    let Expr::EnumVariant { kind, payload, .. } = parse_expr("Shape::Pair(1, 2)\n") else {
        panic!("expected enum variant");
    };
    assert_eq!(kind, VariantKind::Tuple);
    assert!(matches!(payload, VariantPayload::Tuple(args) if args.len() == 2));
}

#[test]
fn test_option_result_sugar() {
    let Expr::EnumVariant {
        enum_name,
        variant,
        payload,
        ..
    } = parse_expr("Some(5)\n")
    else {
        panic!("expected enum variant");
    };
    assert_eq!(enum_name, "Option");
    assert_eq!(variant, "Some");
    assert!(matches!(payload, VariantPayload::Tuple(args) if args.len() == 1));

    let Expr::EnumVariant {
        enum_name, variant, ..
    } = parse_expr("None\n")
    else {
        panic!("expected enum variant");
    };
    assert_eq!(enum_name, "Option");
    assert_eq!(variant, "None");

    let Expr::EnumVariant { enum_name, .. } = parse_expr("Ok(1)\n") else {
        panic!("expected enum variant");
    };
    assert_eq!(enum_name, "Result");

    let Expr::EnumVariant { enum_name, variant, .. } = parse_expr("Err(\"boom\")\n") else {
        panic!("expected enum variant");
    };
    assert_eq!(enum_name, "Result");
    assert_eq!(variant, "Err");
}

// =============================================================================
// Borrow and lambda
// =============================================================================

#[test]
fn test_borrow() {
    let Expr::Borrow { mutable, inner, .. } = parse_expr("&x\n") else {
        panic!("expected borrow");
    };
    assert!(!mutable);
    assert!(matches!(*inner, Expr::Identifier { .. }));

    let Expr::Borrow { mutable, .. } = parse_expr("&mut x\n") else {
        panic!("expected borrow");
    };
    assert!(mutable);
}

#[test]
fn test_lambda_single_expression_lowering() {
    // |x| x + 1 lowers to |x|: return x + 1
    let Expr::Lambda { params, body, .. } = parse_expr("|x| x + 1\n") else {
        panic!("expected lambda");
    };
    assert_eq!(params, vec!["x".to_string()]);
    assert_eq!(body.stmts.len(), 1);
    let Stmt::Return(r) = &body.stmts[0] else {
        panic!("expected lowered return");
    };
    assert!(r.value.is_some());
}

#[test]
fn test_lambda_block_body() {
    let source = "let f = |a, b|:\n    return a + b\n";
    let mut items = parse(source).unwrap().items;
    let Stmt::VarDecl(v) = items.remove(0) else {
        panic!("expected var decl");
    };
    let Some(Expr::Lambda { params, body, .. }) = v.init else {
        panic!("expected lambda initializer");
    };
    assert_eq!(params.len(), 2);
    assert_eq!(body.stmts.len(), 1);
}

#[test]
fn test_this_in_expressions() {
    let Expr::Member { object, field, .. } = parse_expr("this.x\n") else {
        panic!("expected member");
    };
    assert_eq!(field, "x");
    assert!(matches!(*object, Expr::Identifier { ref name, .. } if name == "this"));
}
