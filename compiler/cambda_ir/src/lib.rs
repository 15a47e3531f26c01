//! Cambda IR - core data structures for the Cambda front end.
//!
//! This crate contains:
//! - Spans for source locations (line, column, length)
//! - Names: FNV-1a hashes of identifier text
//! - An open-addressing hash table and set keyed by those hashes
//! - The string interner built on the hash table
//! - The expression arena and AST node types
//!
//! # Design Philosophy
//!
//! - **Hash Everything**: identifiers compare as `Name(u64)`, never as strings
//! - **Flatten Everything**: no `Box<Expr>`, children are `ExprId(u32)` indices
//! - **Own Per Context**: interner, arena and scopes belong to one parse
//!   context, nothing is global
//!
//! Types that contain floats store them as u64 bits for Hash compatibility.

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-allocated types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod arena;
mod ast;
pub mod display;
mod expr_id;
mod interner;
pub mod keywords;
mod name;
mod span;
pub mod table;

pub use arena::{ArenaError, ExprArena, DEFAULT_NODE_CAPACITY};
pub use ast::{Expr, ExprKind, FnValue, Literal};
pub use display::ExprDisplay;
pub use expr_id::{ExprId, ExprRange, FnId};
pub use interner::{StringInterner, StringLookup};
pub use name::Name;
pub use span::Span;
pub use table::{HashSet, HashTable};
