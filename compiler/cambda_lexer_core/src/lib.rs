//! Low-level scanning for Cambda source text.
//!
//! A [`SourceBuffer`] owns the source bytes followed by a `0x00` sentinel and
//! zero padding; a [`Cursor`] walks it one character at a time, tracking the
//! line and column of the current position.
//!
//! This crate has no `cambda_*` dependencies so tools can scan source without
//! pulling in the parser.

mod cursor;
mod source_buffer;

pub use cursor::{is_ident_byte, Cursor, Position};
pub use source_buffer::SourceBuffer;
