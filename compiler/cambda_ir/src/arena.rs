//! Arena allocation for the flat AST.
//!
//! One arena owns every node of a parse context. It has a fixed node
//! capacity and never grows: running out is an [`ArenaError`] the parser turns
//! into a diagnostic. Nodes are released only in bulk, by rolling back a
//! section or by [`ExprArena::reset`], with one exception: the most recent
//! node can be dropped with [`ExprArena::free_last`].
//!
//! # Sections
//!
//! ```text
//! push_section()      record (exprs, lists, fns) lengths
//!   alloc ...
//! pop_section()       truncate back to the recorded lengths
//! commit_section()    forget the checkpoint, keep the nodes
//! ```

use thiserror::Error;

use crate::{Expr, ExprId, ExprKind, ExprRange, FnId, FnValue, Span};

/// Node capacity used when none is configured.
pub const DEFAULT_NODE_CAPACITY: usize = 4096;

/// Arena allocation failure.
#[derive(Copy, Clone, Debug, Error, PartialEq, Eq)]
pub enum ArenaError {
    #[error("expression arena exhausted: all {capacity} nodes are in use")]
    Exhausted { capacity: usize },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Checkpoint {
    exprs: usize,
    expr_lists: usize,
    fns: usize,
}

/// Fixed-capacity storage for the expressions and function values of one
/// parse context.
///
/// Capacity counts expressions plus function values; list storage only holds
/// ids of nodes already counted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExprArena {
    /// All expressions (indexed by `ExprId`).
    exprs: Vec<Expr>,
    /// Flattened expression lists (call args, `do` bodies).
    expr_lists: Vec<ExprId>,
    /// Function values (indexed by `FnId`).
    fns: Vec<FnValue>,
    capacity: usize,
    sections: Vec<Checkpoint>,
}

impl ExprArena {
    /// Create an arena with [`DEFAULT_NODE_CAPACITY`].
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_NODE_CAPACITY)
    }

    /// Create an arena that holds at most `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        ExprArena {
            exprs: Vec::with_capacity(capacity.min(DEFAULT_NODE_CAPACITY)),
            expr_lists: Vec::new(),
            fns: Vec::new(),
            capacity,
            sections: Vec::new(),
        }
    }

    /// Maximum number of nodes.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of nodes still available.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.capacity - self.used()
    }

    #[inline]
    fn used(&self) -> usize {
        self.exprs.len() + self.fns.len()
    }

    fn reserve_node(&self) -> Result<(), ArenaError> {
        if self.used() >= self.capacity {
            tracing::debug!(capacity = self.capacity, "arena exhausted");
            return Err(ArenaError::Exhausted {
                capacity: self.capacity,
            });
        }
        Ok(())
    }

    // ===== Expression allocation =====

    /// Allocate expression, return ID.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "node count is bounded by the arena capacity"
    )]
    pub fn alloc_expr(&mut self, expr: Expr) -> Result<ExprId, ArenaError> {
        self.reserve_node()?;
        let id = ExprId::new(self.exprs.len() as u32);
        self.exprs.push(expr);
        Ok(id)
    }

    /// Release the most recent expression, returning it.
    ///
    /// Never reaches below the innermost open section. Returns `None` if
    /// there is nothing to release.
    pub fn free_last(&mut self) -> Option<Expr> {
        let floor = self.sections.last().map_or(0, |section| section.exprs);
        if self.exprs.len() > floor {
            self.exprs.pop()
        } else {
            None
        }
    }

    /// Substitute the node at `id`, keeping its index.
    ///
    /// Used to turn a call placeholder into its final variant once the head
    /// and arguments are known.
    ///
    /// # Panics
    /// Panics if `id` is out of bounds.
    #[track_caller]
    pub fn replace(&mut self, id: ExprId, expr: Expr) {
        self.exprs[id.index()] = expr;
    }

    /// Get expression by ID.
    ///
    /// # Panics
    /// Panics if `id` is out of bounds.
    #[inline]
    #[track_caller]
    pub fn get_expr(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }

    /// Get expression kind by ID.
    #[inline]
    #[track_caller]
    pub fn kind(&self, id: ExprId) -> &ExprKind {
        &self.exprs[id.index()].kind
    }

    /// Get expression span by ID.
    #[inline]
    #[track_caller]
    pub fn span(&self, id: ExprId) -> Span {
        self.exprs[id.index()].span
    }

    /// Get number of expressions.
    #[inline]
    pub fn len(&self) -> usize {
        self.exprs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.exprs.is_empty()
    }

    // ===== Expression list allocation =====

    /// Allocate expression list, return range.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "list entries reference nodes bounded by the arena capacity"
    )]
    pub fn alloc_expr_list(&mut self, exprs: &[ExprId]) -> ExprRange {
        let start = self.expr_lists.len() as u32;
        self.expr_lists.extend_from_slice(exprs);
        ExprRange::new(start, exprs.len() as u32)
    }

    /// Get expression list by range.
    #[inline]
    #[track_caller]
    pub fn get_expr_list(&self, range: ExprRange) -> &[ExprId] {
        let start = range.start as usize;
        &self.expr_lists[start..start + range.len()]
    }

    // ===== Function allocation =====

    /// Allocate a function value, return ID.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "function count is bounded by the arena capacity"
    )]
    pub fn alloc_fn(&mut self, value: FnValue) -> Result<FnId, ArenaError> {
        self.reserve_node()?;
        let id = FnId::new(self.fns.len() as u32);
        self.fns.push(value);
        Ok(id)
    }

    /// Get function value by ID.
    #[inline]
    #[track_caller]
    pub fn get_fn(&self, id: FnId) -> &FnValue {
        &self.fns[id.index()]
    }

    /// Get number of function values.
    #[inline]
    pub fn fn_count(&self) -> usize {
        self.fns.len()
    }

    // ===== Sections =====

    /// Record a checkpoint.
    pub fn push_section(&mut self) {
        self.sections.push(Checkpoint {
            exprs: self.exprs.len(),
            expr_lists: self.expr_lists.len(),
            fns: self.fns.len(),
        });
    }

    /// Discard everything allocated since the innermost checkpoint and drop
    /// the checkpoint. Returns `false` if no section is open.
    pub fn pop_section(&mut self) -> bool {
        let Some(checkpoint) = self.sections.pop() else {
            return false;
        };
        tracing::trace!(
            exprs = self.exprs.len() - checkpoint.exprs,
            fns = self.fns.len() - checkpoint.fns,
            "arena section rolled back"
        );
        self.exprs.truncate(checkpoint.exprs);
        self.expr_lists.truncate(checkpoint.expr_lists);
        self.fns.truncate(checkpoint.fns);
        true
    }

    /// Drop the innermost checkpoint, keeping its allocations. Returns
    /// `false` if no section is open.
    pub fn commit_section(&mut self) -> bool {
        self.sections.pop().is_some()
    }

    /// Number of open sections.
    #[inline]
    pub fn section_depth(&self) -> usize {
        self.sections.len()
    }

    /// Discard every node, list and section.
    pub fn reset(&mut self) {
        self.exprs.clear();
        self.expr_lists.clear();
        self.fns.clear();
        self.sections.clear();
    }
}

impl Default for ExprArena {
    fn default() -> Self {
        Self::new()
    }
}
