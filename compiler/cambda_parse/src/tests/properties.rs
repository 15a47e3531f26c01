//! Property tests over generated programs.

use cambda_ir::{keywords::RESERVED, ExprKind, Literal};
use proptest::prelude::*;

use crate::ParseContext;

fn ident() -> impl Strategy<Value = String> {
    "[a-z][a-z?_]{0,6}".prop_filter("reserved identifier", |text| {
        !RESERVED.contains(&text.as_str())
    })
}

fn atom() -> impl Strategy<Value = String> {
    prop_oneof![
        any::<i64>().prop_map(|n| n.to_string()),
        ident(),
        "[a-z]{1,6}".prop_map(|text| format!(":{text}")),
        Just("true".to_string()),
        Just("nil".to_string()),
    ]
}

/// Canonically spaced applications over atoms.
fn sexpr() -> impl Strategy<Value = String> {
    atom().prop_recursive(4, 48, 4, |inner| {
        (ident(), prop::collection::vec(inner, 0..4)).prop_map(|(head, args)| {
            let mut out = format!("({head}");
            for arg in args {
                out.push(' ');
                out.push_str(&arg);
            }
            out.push(')');
            out
        })
    })
}

proptest! {
    #[test]
    fn integers_parse_exactly(n in any::<i64>()) {
        let mut context = ParseContext::default();
        let roots = context.parse_str(&n.to_string()).unwrap();
        prop_assert_eq!(*context.arena().kind(roots[0]), ExprKind::Literal(Literal::Int(n)));
    }

    #[test]
    fn canonical_source_reprints_unchanged(source in sexpr()) {
        let mut context = ParseContext::default();
        let roots = context.parse_str(&source).unwrap();
        prop_assert_eq!(roots.len(), 1);
        prop_assert_eq!(context.display(roots[0]).to_string(), source);
    }

    #[test]
    fn layout_does_not_change_the_tree(source in sexpr()) {
        let mut context = ParseContext::default();
        let roots = context.parse_str(&source).unwrap();
        let expected = context.display(roots[0]).to_string();

        let mut spread = ParseContext::default();
        let roots = spread.parse_str(&source.replace(' ', "\n\t ")).unwrap();
        prop_assert_eq!(spread.display(roots[0]).to_string(), expected);
    }

    #[test]
    fn reset_reparse_is_deterministic(programs in prop::collection::vec(sexpr(), 1..5)) {
        let source = programs.join("\n");
        let mut context = ParseContext::default();
        context.parse_str(&source).unwrap();
        let first = context.arena().clone();
        context.reset();
        context.parse_str(&source).unwrap();
        prop_assert_eq!(context.arena(), &first);
    }

    #[test]
    fn arbitrary_input_leaves_context_balanced(source in "\\PC{0,40}") {
        let mut context = ParseContext::default();
        let _ = context.parse_str(&source);
        prop_assert_eq!(context.arena().section_depth(), 0);
        prop_assert_eq!(context.scopes().depth(), 1);
        prop_assert_eq!(context.scopes().section_depth(), 0);
    }
}
