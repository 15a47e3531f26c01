use super::*;

#[test]
fn test_define_and_resolve() {
    let mut scopes = ScopeChain::new();
    let x = Name::of("x");
    assert_eq!(scopes.resolve(x), None);
    assert_eq!(*scopes.define(x), Binding::Pending);
    *scopes.define(x) = Binding::Value(ExprId::new(3));
    assert_eq!(scopes.resolve(x), Some(Binding::Value(ExprId::new(3))));
}

#[test]
fn test_shadowing_and_pop() {
    let mut scopes = ScopeChain::new();
    let x = Name::of("x");
    *scopes.define(x) = Binding::Value(ExprId::new(0));
    scopes.push();
    *scopes.define(x) = Binding::Param;
    assert_eq!(scopes.resolve(x), Some(Binding::Param));
    assert!(scopes.is_defined_locally(x));
    assert!(scopes.pop());
    assert_eq!(scopes.resolve(x), Some(Binding::Value(ExprId::new(0))));
}

#[test]
fn test_outer_names_visible_inside() {
    let mut scopes = ScopeChain::new();
    let f = Name::of("f");
    *scopes.define(f) = Binding::Value(ExprId::new(1));
    scopes.push();
    scopes.push();
    assert_eq!(scopes.depth(), 3);
    assert_eq!(scopes.resolve(f), Some(Binding::Value(ExprId::new(1))));
    assert!(!scopes.is_defined_locally(f));
}

#[test]
fn test_global_frame_never_popped() {
    let mut scopes = ScopeChain::new();
    assert!(!scopes.pop());
    assert_eq!(scopes.depth(), 1);
}

#[test]
fn test_reused_frame_starts_empty() {
    let mut scopes = ScopeChain::new();
    let y = Name::of("y");
    scopes.push();
    *scopes.define(y) = Binding::Param;
    scopes.pop();
    scopes.push();
    assert_eq!(scopes.resolve(y), None);
}

#[test]
fn test_pop_section_restores_overwritten_bindings() {
    let mut scopes = ScopeChain::new();
    let (a, b) = (Name::of("a"), Name::of("b"));
    *scopes.define(a) = Binding::Value(ExprId::new(2));

    scopes.push_section();
    *scopes.define(a) = Binding::Pending;
    *scopes.define(a) = Binding::Value(ExprId::new(7));
    *scopes.define(b) = Binding::Value(ExprId::new(8));
    assert!(scopes.pop_section());

    assert_eq!(scopes.resolve(a), Some(Binding::Value(ExprId::new(2))));
    assert_eq!(scopes.resolve(b), None);
    assert_eq!(scopes.section_depth(), 0);
    assert!(!scopes.pop_section());
}

#[test]
fn test_section_ignores_frames_opened_inside() {
    let mut scopes = ScopeChain::new();
    let x = Name::of("x");
    scopes.push_section();
    scopes.push();
    *scopes.define(x) = Binding::Param;
    scopes.pop();
    *scopes.define(x) = Binding::Value(ExprId::new(1));
    assert!(scopes.pop_section());
    assert_eq!(scopes.resolve(x), None);
    assert_eq!(scopes.depth(), 1);
}

#[test]
fn test_commit_section_keeps_bindings() {
    let mut scopes = ScopeChain::new();
    let x = Name::of("x");
    scopes.push_section();
    *scopes.define(x) = Binding::Value(ExprId::new(4));
    assert!(scopes.commit_section());
    assert!(!scopes.commit_section());

    // A later rollback only undoes its own section.
    scopes.push_section();
    *scopes.define(x) = Binding::Value(ExprId::new(9));
    scopes.pop_section();
    assert_eq!(scopes.resolve(x), Some(Binding::Value(ExprId::new(4))));
}

#[test]
fn test_reset() {
    let mut scopes = ScopeChain::new();
    *scopes.define(Name::of("a")) = Binding::Param;
    scopes.push();
    scopes.push_section();
    scopes.reset();
    assert_eq!(scopes.depth(), 1);
    assert_eq!(scopes.section_depth(), 0);
    assert_eq!(scopes.resolve(Name::of("a")), None);
}
