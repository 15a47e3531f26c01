//! Name resolution.
//!
//! Walks a parsed tree against the scope chain:
//!
//! - every `Var` must be bound, else `VariableNotFound`
//! - an application whose callee is, or is bound to, a non-function literal
//!   is `NotCallable`
//! - lambda bodies resolve in a frame holding their parameters
//! - `do` bodies resolve in their own frame, with nested `let`s defined in
//!   order
//!
//! A `let` whose value is a lambda binds its name before the body is
//! resolved, so the function can call itself.

use cambda_ir::{
    ExprArena, ExprDisplay, ExprId, ExprKind, ExprRange, FnValue, Literal, Name, StringLookup,
};
use tracing::{debug, trace};

use crate::stack::ensure_sufficient_stack;
use crate::{Binding, ParseError, ParseErrorKind, ScopeChain};

/// Resolve every name under `root`.
///
/// Top-level `let`s define into the current frame of `scopes`, so resolving
/// roots in source order sees earlier definitions.
pub fn resolve<L: StringLookup + ?Sized>(
    arena: &ExprArena,
    lookup: &L,
    scopes: &mut ScopeChain,
    root: ExprId,
) -> Result<(), ParseError> {
    debug!(?root, "resolving");
    Resolver {
        arena,
        lookup,
        scopes,
    }
    .resolve_expr(root)
}

struct Resolver<'a, L: StringLookup + ?Sized> {
    arena: &'a ExprArena,
    lookup: &'a L,
    scopes: &'a mut ScopeChain,
}

impl<L: StringLookup + ?Sized> Resolver<'_, L> {
    fn resolve_expr(&mut self, id: ExprId) -> Result<(), ParseError> {
        ensure_sufficient_stack(|| self.resolve_expr_inner(id))
    }

    fn resolve_expr_inner(&mut self, id: ExprId) -> Result<(), ParseError> {
        let arena = self.arena;
        match *arena.kind(id) {
            ExprKind::Invalid | ExprKind::Keyword(_) => Ok(()),
            ExprKind::Var(name) => self.resolve_var(id, name).map(|_| ()),
            ExprKind::Literal(Literal::Fn(function)) => match arena.get_fn(function) {
                FnValue::Native { .. } => Ok(()),
                FnValue::Lambda { params, body } => {
                    let body = *body;
                    self.with_scope(|r| {
                        for &param in params {
                            *r.scopes.define(param) = Binding::Param;
                        }
                        r.resolve_expr(body)
                    })
                }
            },
            ExprKind::Literal(_) => Ok(()),
            ExprKind::UnresolvedApp { callee, args } => {
                self.resolve_expr(callee)?;
                self.check_callable(callee)?;
                self.resolve_list(args)
            }
            ExprKind::Let { name, value } => {
                if matches!(arena.kind(value), ExprKind::Literal(Literal::Fn(_))) {
                    *self.scopes.define(name) = Binding::Pending;
                }
                self.resolve_expr(value)?;
                *self.scopes.define(name) = Binding::Value(value);
                trace!(name = %self.lookup.display_name(name), "let bound");
                Ok(())
            }
            ExprKind::Do { exprs } => self.with_scope(|r| r.resolve_list(exprs)),
            ExprKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                self.resolve_expr(cond)?;
                self.resolve_expr(then_branch)?;
                self.resolve_expr(else_branch)
            }
        }
    }

    fn resolve_list(&mut self, list: ExprRange) -> Result<(), ParseError> {
        let arena = self.arena;
        for &id in arena.get_expr_list(list) {
            self.resolve_expr(id)?;
        }
        Ok(())
    }

    fn resolve_var(&self, id: ExprId, name: Name) -> Result<Binding, ParseError> {
        self.scopes.resolve(name).ok_or_else(|| {
            ParseError::new(
                ParseErrorKind::VariableNotFound {
                    name: self.lookup.display_name(name),
                },
                self.arena.span(id),
            )
        })
    }

    /// A callee is not callable when it is a non-function literal or a
    /// variable bound, through any chain of variables, to one.
    fn check_callable(&self, callee: ExprId) -> Result<(), ParseError> {
        match self.binding_target(callee) {
            Some(target) if !self.arena.kind(target).is_callable() => {}
            _ => return Ok(()),
        }
        Err(ParseError::new(
            ParseErrorKind::NotCallable {
                callee: ExprDisplay::new(self.arena, self.lookup, callee).to_string(),
            },
            self.arena.span(callee),
        ))
    }

    /// Follow `Var` to `Value` bindings from `id` to the first node that is
    /// not a variable. `None` if the chain ends at a parameter or a pending
    /// binding, or loops.
    fn binding_target(&self, id: ExprId) -> Option<ExprId> {
        let mut target = id;
        // A chain longer than the arena has revisited a node.
        for _ in 0..=self.arena.len() {
            let ExprKind::Var(name) = *self.arena.kind(target) else {
                return Some(target);
            };
            match self.scopes.resolve(name)? {
                Binding::Value(value) => target = value,
                Binding::Pending | Binding::Param => return None,
            }
        }
        None
    }

    fn with_scope<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        self.scopes.push();
        let result = f(self);
        self.scopes.pop();
        result
    }
}
