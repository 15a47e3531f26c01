//! Expression IDs and ranges for the flat AST.
//!
//! Children are `ExprId(u32)` indices into [`ExprArena`](crate::ExprArena)
//! instead of boxed nodes, and lists are [`ExprRange`]s into one flat list
//! store.

use std::fmt;

/// Index into the expression arena.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct ExprId(u32);

impl ExprId {
    /// Create a new `ExprId`.
    #[inline]
    pub const fn new(index: u32) -> Self {
        ExprId(index)
    }

    /// Get the index into the arena.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for ExprId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExprId({})", self.0)
    }
}

/// Range of expressions in the arena's flat list store.
///
/// - start: u32 - start index in the list store
/// - len: u32 - number of expressions
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
#[repr(C)]
pub struct ExprRange {
    pub start: u32,
    pub len: u32,
}

impl ExprRange {
    /// Empty range.
    pub const EMPTY: ExprRange = ExprRange { start: 0, len: 0 };

    /// Create a new range.
    #[inline]
    pub const fn new(start: u32, len: u32) -> Self {
        ExprRange { start, len }
    }

    /// Check if the range is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Get the number of expressions.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len as usize
    }
}

impl fmt::Debug for ExprRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExprRange({}..{})", self.start, self.start + self.len)
    }
}

/// Index of a function value in the arena.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct FnId(u32);

impl FnId {
    #[inline]
    pub const fn new(index: u32) -> Self {
        FnId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for FnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FnId({})", self.0)
    }
}

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::{ExprId, ExprRange, FnId};
    crate::static_assert_size!(ExprId, 4);
    crate::static_assert_size!(ExprRange, 8);
    crate::static_assert_size!(FnId, 4);
}
