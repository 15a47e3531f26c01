//! Core parser tests.

use cambda_diagnostic::ErrorCode;
use cambda_ir::{ExprKind, FnValue, Literal, Name, Span};
use pretty_assertions::assert_eq;

use super::{parse_err, parse_one, reprint};
use crate::{Binding, ErrorContext, ParseConfig, ParseContext, ParseErrorKind, NATIVES};

// === Atoms ===

#[test]
fn test_parse_int() {
    let (context, root) = parse_one("42");
    assert_eq!(*context.arena().kind(root), ExprKind::Literal(Literal::Int(42)));
}

#[test]
fn test_parse_negative_float_with_exponent() {
    let (context, root) = parse_one("-3.5e-2");
    let ExprKind::Literal(literal) = *context.arena().kind(root) else {
        panic!("expected literal, got {:?}", context.arena().kind(root));
    };
    let value = literal.as_float().unwrap();
    assert!((value + 0.035).abs() < 1e-12, "got {value}");
}

#[test]
fn test_parse_float_forms() {
    assert_eq!(reprint("2.5"), "2.5");
    assert_eq!(reprint("1e+3"), "1000.0");
    assert_eq!(reprint("-0.25"), "-0.25");
}

#[test]
fn test_minus_alone_is_an_identifier() {
    let (context, root) = parse_one("-");
    assert_eq!(*context.arena().kind(root), ExprKind::Var(Name::of("-")));
}

#[test]
fn test_literal_keywords() {
    assert_eq!(reprint("true"), "true");
    assert_eq!(reprint("false"), "false");
    assert_eq!(reprint("nil"), "nil");
}

#[test]
fn test_reserved_identifier_is_keyword() {
    let (context, root) = parse_one("car");
    assert_eq!(*context.arena().kind(root), ExprKind::Keyword(Name::of("car")));
}

#[test]
fn test_hash_literal() {
    let (context, root) = parse_one(":key");
    assert_eq!(
        *context.arena().kind(root),
        ExprKind::Literal(Literal::Hash(Name::of("key")))
    );
    assert_eq!(context.arena().span(root), Span::new(1, 1, 4));
    assert_eq!(context.interner().lookup(Name::of("key")), Some("key"));
}

#[test]
fn test_variable_is_interned() {
    let (context, root) = parse_one("even?");
    assert_eq!(*context.arena().kind(root), ExprKind::Var(Name::of("even?")));
    assert_eq!(context.interner().lookup(Name::of("even?")), Some("even?"));
}

// === Spans ===

#[test]
fn test_identifier_span_length() {
    let (context, root) = parse_one("  foo");
    assert_eq!(context.arena().span(root), Span::new(1, 3, 3));
}

#[test]
fn test_call_span_covers_parens() {
    let (context, root) = parse_one("(f 1 2)");
    assert_eq!(context.arena().span(root), Span::new(1, 1, 7));
}

#[test]
fn test_construct_crossing_lines_is_multiline() {
    let (context, root) = parse_one("(f\n  1)");
    let span = context.arena().span(root);
    assert!(span.is_multiline());
    assert_eq!((span.line, span.col), (1, 1));

    let ExprKind::UnresolvedApp { args, .. } = *context.arena().kind(root) else {
        panic!("expected application");
    };
    let arg = context.arena().get_expr_list(args)[0];
    assert_eq!(context.arena().span(arg), Span::new(2, 3, 1));
}

#[test]
fn test_crlf_is_one_line_break() {
    let (context, root) = parse_one("(f\r\n\r\n  x)");
    let ExprKind::UnresolvedApp { args, .. } = *context.arena().kind(root) else {
        panic!("expected application");
    };
    let arg = context.arena().get_expr_list(args)[0];
    assert_eq!(context.arena().span(arg), Span::new(3, 3, 1));
}

// === Applications ===

#[test]
fn test_generic_call_stays_unresolved() {
    let (context, root) = parse_one("(- 3 -2)");
    let arena = context.arena();
    let ExprKind::UnresolvedApp { callee, args } = *arena.kind(root) else {
        panic!("expected application, got {:?}", arena.kind(root));
    };
    assert_eq!(*arena.kind(callee), ExprKind::Var(Name::of("-")));
    let args: Vec<_> = arena
        .get_expr_list(args)
        .iter()
        .map(|&id| *arena.kind(id))
        .collect();
    assert_eq!(
        args,
        vec![
            ExprKind::Literal(Literal::Int(3)),
            ExprKind::Literal(Literal::Int(-2)),
        ]
    );
}

#[test]
fn test_call_node_precedes_children() {
    let (context, root) = parse_one("(f (g 1))");
    let ExprKind::UnresolvedApp { callee, args } = *context.arena().kind(root) else {
        panic!("expected application");
    };
    assert!(root.index() < callee.index());
    assert!(callee.index() < context.arena().get_expr_list(args)[0].index());
}

#[test]
fn test_list_keywords_keep_keyword_callee() {
    let (context, root) = parse_one("(cons 1 (list 2 3 4))");
    let ExprKind::UnresolvedApp { callee, .. } = *context.arena().kind(root) else {
        panic!("expected application");
    };
    assert_eq!(*context.arena().kind(callee), ExprKind::Keyword(Name::of("cons")));
    assert_eq!(reprint("(car (cdr xs))"), "(car (cdr xs))");
}

#[test]
fn test_nested_head() {
    assert_eq!(reprint("((f 1) 2)"), "((f 1) 2)");
}

// === Special forms ===

#[test]
fn test_if_form() {
    let (context, root) = parse_one("(if true 1 2)");
    let arena = context.arena();
    let ExprKind::If {
        cond,
        then_branch,
        else_branch,
    } = *arena.kind(root)
    else {
        panic!("expected if, got {:?}", arena.kind(root));
    };
    assert_eq!(*arena.kind(cond), ExprKind::Literal(Literal::True));
    assert_eq!(*arena.kind(then_branch), ExprKind::Literal(Literal::Int(1)));
    assert_eq!(*arena.kind(else_branch), ExprKind::Literal(Literal::Int(2)));
}

#[test]
fn test_keyword_head_allocates_no_node() {
    let (context, _) = parse_one("(if true 1 2)");
    // Natives, then the if node and its three branches.
    assert_eq!(context.arena().len(), NATIVES.len() + 4);
}

#[test]
fn test_let_binds_for_later_siblings() {
    let mut context = ParseContext::default();
    let roots = context.parse_str("(let x 5) x").unwrap();
    assert_eq!(roots.len(), 2);
    let arena = context.arena();

    let ExprKind::Let { name, value } = *arena.kind(roots[0]) else {
        panic!("expected let, got {:?}", arena.kind(roots[0]));
    };
    assert_eq!(name, Name::of("x"));
    assert_eq!(*arena.kind(roots[1]), ExprKind::Var(name));

    let Some(Binding::Value(bound)) = context.scopes().resolve(name) else {
        panic!("x is not bound to a value");
    };
    assert_eq!(bound, value);
    assert_eq!(*arena.kind(bound), ExprKind::Literal(Literal::Int(5)));
}

#[test]
fn test_lambda_form() {
    let (context, root) = parse_one("(lambda (x y) (+ x y))");
    let arena = context.arena();
    let ExprKind::Literal(Literal::Fn(function)) = *arena.kind(root) else {
        panic!("expected function literal, got {:?}", arena.kind(root));
    };
    let FnValue::Lambda { params, body } = arena.get_fn(function) else {
        panic!("expected lambda");
    };
    assert_eq!(params, &vec![Name::of("x"), Name::of("y")]);
    assert!(matches!(arena.kind(*body), ExprKind::UnresolvedApp { .. }));
    assert_eq!(context.scopes().depth(), 1);
}

#[test]
fn test_lambda_params_do_not_leak() {
    let (context, _) = parse_one("(lambda (p) p)");
    assert_eq!(context.scopes().resolve(Name::of("p")), None);
}

#[test]
fn test_do_form_scopes_its_lets() {
    let (context, root) = parse_one("(do (let y :key) nil)");
    assert!(matches!(context.arena().kind(root), ExprKind::Do { .. }));
    assert_eq!(context.scopes().resolve(Name::of("y")), None);
    assert_eq!(context.display(root).to_string(), "(do (let y :key) nil)");
}

#[test]
fn test_empty_do() {
    assert_eq!(reprint("(do)"), "(do)");
}

#[test]
fn test_reprint_round_trip() {
    for source in [
        "(if true 1 -0.5)",
        "(lambda (x) (+ x 1))",
        "(let sq (lambda (n) (* n n)))",
        "(lambda () nil)",
        "(f :a :b)",
    ] {
        assert_eq!(reprint(source), source);
    }
}

// === Errors ===

#[test]
fn test_if_arity() {
    let error = parse_err("(if 1 2)");
    assert_eq!(
        error.kind,
        ParseErrorKind::WrongArgumentCount {
            form: "if",
            expected: 3,
            actual: 2,
        }
    );
    assert_eq!(error.context, Some(ErrorContext::IfForm));
    assert_eq!(error.span, Span::new(1, 1, 8));
}

#[test]
fn test_let_arity_and_name() {
    assert_eq!(
        parse_err("(let x)").kind,
        ParseErrorKind::WrongArgumentCount {
            form: "let",
            expected: 2,
            actual: 1,
        }
    );
    let error = parse_err("(let 5 3)");
    assert_eq!(error.kind, ParseErrorKind::ExpectedIdentifier);
    assert_eq!(error.span, Span::new(1, 6, 1));
    assert_eq!(parse_err("(let if 3)").kind, ParseErrorKind::ExpectedIdentifier);
}

#[test]
fn test_lambda_errors() {
    let error = parse_err("(lambda x x)");
    assert_eq!(error.kind, ParseErrorKind::ExpectedIdentifier);
    assert_eq!(error.context, Some(ErrorContext::LambdaParams));

    assert_eq!(parse_err("(lambda (if) 1)").kind, ParseErrorKind::ExpectedIdentifier);
    assert_eq!(parse_err("(lambda (x 1) x)").kind, ParseErrorKind::ExpectedIdentifier);
    assert_eq!(
        parse_err("(lambda (x) 1 2)").kind,
        ParseErrorKind::WrongArgumentCount {
            form: "lambda",
            expected: 2,
            actual: 3,
        }
    );
    assert_eq!(
        parse_err("(lambda (x))").kind,
        ParseErrorKind::WrongArgumentCount {
            form: "lambda",
            expected: 2,
            actual: 1,
        }
    );
}

#[test]
fn test_missing_right_paren() {
    let error = parse_err("(foo");
    assert_eq!(error.kind, ParseErrorKind::MissingRightParen);
    assert_eq!(error.span, Span::new(1, 1, 1));
    assert_eq!(error.code(), ErrorCode::E1001);

    let error = parse_err("(+ 1 (");
    assert_eq!(error.kind, ParseErrorKind::MissingRightParen);
    assert_eq!(error.span, Span::new(1, 6, 1));

    let error = parse_err("(lambda (x");
    assert_eq!(error.kind, ParseErrorKind::MissingRightParen);
    assert_eq!(error.span, Span::new(1, 9, 1));
}

#[test]
fn test_end_of_input_inside_call_is_missing_right_paren() {
    for source in ["(foo 1.", "(foo 1e+", "(if 1 2."] {
        let error = parse_err(source);
        assert_eq!(error.kind, ParseErrorKind::MissingRightParen, "{source}");
        assert_eq!(error.span, Span::new(1, 1, 1), "{source}");
    }

    // The innermost open call is the one reported.
    let error = parse_err("(f (g 1.");
    assert_eq!(error.kind, ParseErrorKind::MissingRightParen);
    assert_eq!(error.span, Span::new(1, 4, 1));
}

#[test]
fn test_stray_characters() {
    assert_eq!(parse_err(")").kind, ParseErrorKind::UnexpectedChar { found: ')' });
    assert_eq!(parse_err("()").kind, ParseErrorKind::UnexpectedChar { found: ')' });
    assert_eq!(parse_err("@").kind, ParseErrorKind::UnexpectedChar { found: '@' });

    let error = parse_err("(f é)");
    assert_eq!(error.kind, ParseErrorKind::UnexpectedChar { found: 'é' });
    assert_eq!(error.span, Span::new(1, 4, 1));
}

#[test]
fn test_number_errors() {
    assert_eq!(parse_err("1.e+2").kind, ParseErrorKind::ExponentAfterDecimalPoint);
    assert_eq!(parse_err("1e5").kind, ParseErrorKind::ExpectedSignAfterExponent);
    assert_eq!(parse_err("1.").kind, ParseErrorKind::UnexpectedEndOfInput);
    assert_eq!(parse_err("1.x").kind, ParseErrorKind::UnexpectedChar { found: 'x' });
    assert_eq!(parse_err("1e+").kind, ParseErrorKind::UnexpectedEndOfInput);

    let error = parse_err("99999999999999999999");
    assert_eq!(
        error.kind,
        ParseErrorKind::LiteralTooLarge {
            literal: "99999999999999999999".into(),
        }
    );
    assert_eq!(error.context, Some(ErrorContext::Number));
    assert_eq!(error.code(), ErrorCode::E0005);
}

#[test]
fn test_empty_keyword() {
    let error = parse_err(":");
    assert_eq!(error.kind, ParseErrorKind::EmptyKeyword);
    assert_eq!(error.span, Span::new(1, 1, 1));
    assert_eq!(parse_err("(f : x)").kind, ParseErrorKind::EmptyKeyword);
}

#[test]
fn test_out_of_memory() {
    let mut context = ParseContext::new(ParseConfig {
        arena_capacity: 3,
        ..ParseConfig::default()
    });
    let error = context.parse_str("(+ 1 2 3)").unwrap_err();
    assert!(matches!(error.kind, ParseErrorKind::OutOfMemory(_)));
    assert_eq!(error.code(), ErrorCode::E9001);
    assert_eq!(context.arena().len(), NATIVES.len());
}

// === Sections and recovery ===

#[test]
fn test_failed_expression_is_rolled_back() {
    let mut context = ParseContext::default();
    context.parse_str("(let a 1)").unwrap();
    let before = context.arena().clone();

    let error = context.parse_str("(if (let e 1) 2").unwrap_err();
    assert_eq!(error.kind, ParseErrorKind::MissingRightParen);
    assert_eq!(context.arena(), &before);
    assert_eq!(context.scopes().resolve(Name::of("e")), None);
    assert!(matches!(
        context.scopes().resolve(Name::of("a")),
        Some(Binding::Value(_))
    ));
    assert_eq!(context.scopes().depth(), 1);
    assert_eq!(context.arena().section_depth(), 0);
}

#[test]
fn test_failed_expression_restores_overwritten_binding() {
    let mut context = ParseContext::default();
    context.parse_str("(let x 1)").unwrap();
    let before = context.scopes().resolve(Name::of("x"));
    assert!(matches!(before, Some(Binding::Value(_))));

    let error = context.parse_str("(if (let x 2) 1)").unwrap_err();
    assert_eq!(
        error.kind,
        ParseErrorKind::WrongArgumentCount {
            form: "if",
            expected: 3,
            actual: 2,
        }
    );
    assert_eq!(context.scopes().resolve(Name::of("x")), before);
    assert_eq!(context.scopes().section_depth(), 0);

    let roots = context.parse_str("x").unwrap();
    context.resolve(roots[0]).unwrap();
}

#[test]
fn test_error_inside_do_pops_its_frame() {
    let mut context = ParseContext::default();
    let error = context.parse_str("(do (let c 1) (lambda (q) 1.)").unwrap_err();
    assert_eq!(error.kind, ParseErrorKind::UnexpectedChar { found: ')' });
    assert_eq!(context.scopes().depth(), 1);
    assert_eq!(context.scopes().resolve(Name::of("c")), None);
}

#[test]
fn test_next_expr_streams_roots() {
    let mut context = ParseContext::default();
    let source = cambda_lexer_core::SourceBuffer::new("1 (f 2)\n  :k  ");
    let mut parser = context.parser(&source);
    assert!(parser.next_expr().unwrap().is_some());
    assert!(parser.next_expr().unwrap().is_some());
    assert!(!parser.is_finished());
    assert!(parser.next_expr().unwrap().is_some());
    assert!(parser.is_finished());
    assert_eq!(parser.next_expr().unwrap(), None);
}

#[test]
fn test_streaming_resolution_sees_only_earlier_roots() {
    let mut context = ParseContext::default();
    let source = cambda_lexer_core::SourceBuffer::new("(let x 1) (+ x 1)");
    let mut parser = context.parser(&source);
    while let Some(root) = parser.next_expr().unwrap() {
        parser.resolve(root).unwrap();
    }

    let mut context = ParseContext::default();
    let source = cambda_lexer_core::SourceBuffer::new("y (let y 1)");
    let mut parser = context.parser(&source);
    let root = parser.next_expr().unwrap().unwrap();
    assert_eq!(parser.display(root).to_string(), "y");
    let error = parser.resolve(root).unwrap_err();
    assert_eq!(error.kind, ParseErrorKind::VariableNotFound { name: "y".into() });
}

#[test]
fn test_deep_nesting() {
    let depth = 5000;
    let source = format!("{}1{}", "(not ".repeat(depth), ")".repeat(depth));
    let mut context = ParseContext::new(ParseConfig {
        arena_capacity: 4 * depth,
        ..ParseConfig::default()
    });
    let roots = context.parse_str(&source).unwrap();
    assert_eq!(roots.len(), 1);
    context.resolve(roots[0]).unwrap();
}

#[test]
fn test_reset_reparse_is_identical() {
    let source = "(let sq (lambda (n) (* n n))) (sq 4) (do (let z :k) (if z 1 2.5))";
    let mut context = ParseContext::default();
    context.parse_str(source).unwrap();
    let first = context.arena().clone();

    context.reset();
    context.parse_str(source).unwrap();
    assert_eq!(context.arena(), &first);
}
